use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HookError;

/// The git hooks hookscope knows how to scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookType {
    PrePush,
    PreCommit,
    PreMergeCommit,
    CommitMsg,
    PrepareCommitMsg,
}

/// How a hook type's scope is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Commit ranges read from the pre-push protocol on stdin.
    RefUpdates,
    /// The staged index against HEAD.
    StagedWorktree,
    /// A commit message file passed as the first argument.
    MessageFile,
}

impl HookType {
    pub const ALL: [HookType; 5] = [
        HookType::PrePush,
        HookType::PreCommit,
        HookType::PreMergeCommit,
        HookType::CommitMsg,
        HookType::PrepareCommitMsg,
    ];

    /// The hook's file name inside the hooks directory.
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PrePush => "pre-push",
            HookType::PreCommit => "pre-commit",
            HookType::PreMergeCommit => "pre-merge-commit",
            HookType::CommitMsg => "commit-msg",
            HookType::PrepareCommitMsg => "prepare-commit-msg",
        }
    }

    pub fn scope_kind(&self) -> ScopeKind {
        match self {
            HookType::PrePush => ScopeKind::RefUpdates,
            HookType::PreCommit | HookType::PreMergeCommit => ScopeKind::StagedWorktree,
            HookType::CommitMsg | HookType::PrepareCommitMsg => ScopeKind::MessageFile,
        }
    }

    /// Whether git feeds this hook data on stdin that must be read.
    pub fn reads_stdin(&self) -> bool {
        self.scope_kind() == ScopeKind::RefUpdates
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HookType {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookType::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| HookError::UnknownHookType(s.to_string()))
    }
}
