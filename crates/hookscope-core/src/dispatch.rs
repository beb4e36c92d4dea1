//! Hook-type state machine: turns a hook invocation into resolved scopes.
//!
//! Pre-push produces one scope per pushed ref, lazily and in input order.
//! Staged-worktree hooks and message hooks produce exactly one scope. The
//! dispatcher only ever reads from the repository.

use std::path::PathBuf;

use tracing::debug;

use crate::error::HookError;
use crate::git::GitRefReader;
use crate::protocol::parse_pre_push;
use crate::resolve::{FileSetAggregator, RangeResolver};
use crate::types::{ChangeScope, HookType, RefUpdate, ResolvedScope};

/// Everything git hands a hook, per hook type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookInput {
    PrePush {
        remote_name: String,
        remote_url: String,
        stdin: String,
    },
    PreCommit,
    PreMergeCommit,
    CommitMsg {
        message_file: PathBuf,
    },
    PrepareCommitMsg {
        message_file: PathBuf,
    },
}

impl HookInput {
    /// Builds the input from the hook's positional arguments and, for
    /// pre-push, its stdin.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Other`] when a required argument is missing.
    pub fn from_args(hook: HookType, args: &[String], stdin: String) -> Result<Self, HookError> {
        let arg = |idx: usize, what: &str| {
            args.get(idx)
                .cloned()
                .ok_or_else(|| HookError::Other(format!("{hook} hook requires the {what} argument")))
        };

        Ok(match hook {
            HookType::PrePush => {
                let remote_name = arg(0, "remote name")?;
                let remote_url = args.get(1).cloned().unwrap_or_else(|| remote_name.clone());
                HookInput::PrePush {
                    remote_name,
                    remote_url,
                    stdin,
                }
            }
            HookType::PreCommit => HookInput::PreCommit,
            HookType::PreMergeCommit => HookInput::PreMergeCommit,
            HookType::CommitMsg => HookInput::CommitMsg {
                message_file: PathBuf::from(arg(0, "message file")?),
            },
            HookType::PrepareCommitMsg => HookInput::PrepareCommitMsg {
                message_file: PathBuf::from(arg(0, "message file")?),
            },
        })
    }

    pub fn hook_type(&self) -> HookType {
        match self {
            HookInput::PrePush { .. } => HookType::PrePush,
            HookInput::PreCommit => HookType::PreCommit,
            HookInput::PreMergeCommit => HookType::PreMergeCommit,
            HookInput::CommitMsg { .. } => HookType::CommitMsg,
            HookInput::PrepareCommitMsg { .. } => HookType::PrepareCommitMsg,
        }
    }
}

/// A scope that could not be resolved, with the ref it belonged to.
#[derive(Debug)]
pub struct ScopeFailure {
    pub subject: Option<RefUpdate>,
    pub error: HookError,
}

impl ScopeFailure {
    pub fn label(&self) -> String {
        match &self.subject {
            Some(update) => update.to_string(),
            None => "staged changes".to_string(),
        }
    }
}

pub type ScopeResult = Result<ResolvedScope, ScopeFailure>;

pub struct ScopeDispatcher<'a, R: GitRefReader> {
    git: &'a R,
}

impl<'a, R: GitRefReader> ScopeDispatcher<'a, R> {
    pub fn new(git: &'a R) -> Self {
        Self { git }
    }

    /// Starts resolving `input`.
    ///
    /// Pre-push input is parsed in full before anything is resolved, so a
    /// malformed line aborts the invocation before any check can run.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Protocol`] for malformed pre-push input.
    pub fn dispatch(&self, input: HookInput) -> Result<Scopes<'a, R>, HookError> {
        debug!(hook = %input.hook_type(), "dispatching");
        let pending = match input {
            HookInput::PrePush {
                remote_name,
                remote_url,
                stdin,
            } => {
                let updates = parse_pre_push(&stdin)?;
                debug!(
                    remote = %remote_name,
                    url = %remote_url,
                    refs = updates.len(),
                    "pre-push"
                );
                Pending::RefUpdates {
                    remote: remote_name,
                    updates: updates.into_iter(),
                }
            }
            HookInput::PreCommit | HookInput::PreMergeCommit => Pending::Staged,
            HookInput::CommitMsg { message_file } | HookInput::PrepareCommitMsg { message_file } => {
                Pending::Message(message_file)
            }
        };
        Ok(Scopes {
            git: self.git,
            pending,
        })
    }
}

enum Pending {
    RefUpdates {
        remote: String,
        updates: std::vec::IntoIter<RefUpdate>,
    },
    Staged,
    Message(PathBuf),
    Done,
}

/// Resolved scopes of one invocation, produced on demand.
pub struct Scopes<'a, R: GitRefReader> {
    git: &'a R,
    pending: Pending,
}

impl<'a, R: GitRefReader> Scopes<'a, R> {
    fn resolve_update(&self, remote: &str, update: RefUpdate) -> ScopeResult {
        let range = match RangeResolver::new(self.git, remote).resolve(&update) {
            Ok(range) => range,
            Err(error) => {
                return Err(ScopeFailure {
                    subject: Some(update),
                    error,
                })
            }
        };

        let scope = match range {
            None => Ok(ChangeScope::NoOp),
            Some(range) => FileSetAggregator::new(self.git).range_scope(range),
        };
        match scope {
            Ok(scope) => Ok(ResolvedScope {
                subject: Some(update),
                scope,
            }),
            Err(error) => Err(ScopeFailure {
                subject: Some(update),
                error,
            }),
        }
    }
}

impl<'a, R: GitRefReader> Iterator for Scopes<'a, R> {
    type Item = ScopeResult;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.pending, Pending::Done) {
            Pending::RefUpdates {
                remote,
                mut updates,
            } => {
                let update = updates.next()?;
                let item = self.resolve_update(&remote, update);
                self.pending = Pending::RefUpdates { remote, updates };
                Some(item)
            }
            Pending::Staged => Some(
                FileSetAggregator::new(self.git)
                    .worktree_scope()
                    .map(|scope| ResolvedScope {
                        subject: None,
                        scope,
                    })
                    .map_err(|error| ScopeFailure {
                        subject: None,
                        error,
                    }),
            ),
            Pending::Message(path) => Some(Ok(ResolvedScope {
                subject: None,
                scope: ChangeScope::MessageFile { path },
            })),
            Pending::Done => None,
        }
    }
}
