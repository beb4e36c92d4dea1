use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use super::{ObjectId, RefUpdate};

/// A boundary over the commit graph: `end` and its ancestors, minus `start`
/// and everything reachable from `start` or any `hidden` tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRange {
    /// Exclusive lower bound. `None` means the whole history of `end`.
    pub start: Option<ObjectId>,
    /// Inclusive upper bound.
    pub end: ObjectId,
    /// Extra exclusion tips. Only set for rewritten history.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<ObjectId>,
}

impl CommitRange {
    pub fn new(start: Option<ObjectId>, end: ObjectId) -> Self {
        Self {
            start,
            end,
            hidden: Vec::new(),
        }
    }

    pub fn with_hidden(mut self, hidden: Vec<ObjectId>) -> Self {
        self.hidden = hidden;
        self
    }

    /// `start == end` can never enumerate a commit.
    pub fn is_trivially_empty(&self) -> bool {
        self.start.as_ref() == Some(&self.end)
    }
}

/// The unit handed to check execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ChangeScope {
    /// Nothing to check: a deletion or a range that introduces nothing.
    NoOp,
    /// Files introduced by the commits of a pushed range. Never empty.
    Range {
        range: CommitRange,
        files: BTreeSet<String>,
    },
    /// Files staged in the index.
    Worktree { files: BTreeSet<String> },
    /// The commit message file for message hooks.
    MessageFile { path: PathBuf },
}

impl ChangeScope {
    /// Builds a range scope, collapsing an empty file set to [`ChangeScope::NoOp`].
    pub fn range(range: CommitRange, files: BTreeSet<String>) -> Self {
        if files.is_empty() {
            ChangeScope::NoOp
        } else {
            ChangeScope::Range { range, files }
        }
    }

    /// Scopes with nothing in them pass without running any check.
    pub fn is_empty(&self) -> bool {
        match self {
            ChangeScope::NoOp => true,
            ChangeScope::Range { files, .. } | ChangeScope::Worktree { files } => files.is_empty(),
            ChangeScope::MessageFile { .. } => false,
        }
    }

    /// The files in scope. Message-file and no-op scopes have none.
    pub fn files(&self) -> Option<&BTreeSet<String>> {
        match self {
            ChangeScope::Range { files, .. } | ChangeScope::Worktree { files } => Some(files),
            ChangeScope::NoOp | ChangeScope::MessageFile { .. } => None,
        }
    }
}

/// One logical hook run: a scope and, for pre-push, the ref it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<RefUpdate>,
    pub scope: ChangeScope,
}

impl ResolvedScope {
    pub fn label(&self) -> String {
        match &self.subject {
            Some(update) => update.to_string(),
            None => match &self.scope {
                ChangeScope::MessageFile { path } => path.display().to_string(),
                _ => "staged changes".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(n: u8) -> ObjectId {
        ObjectId::parse(&format!("{n:040x}")).unwrap()
    }

    #[test]
    fn empty_range_collapses_to_noop() {
        let scope = ChangeScope::range(CommitRange::new(Some(oid(1)), oid(2)), BTreeSet::new());
        assert_eq!(scope, ChangeScope::NoOp);
        assert!(scope.is_empty());
    }

    #[test]
    fn message_file_scope_is_never_empty() {
        let scope = ChangeScope::MessageFile {
            path: PathBuf::from(".git/COMMIT_EDITMSG"),
        };
        assert!(!scope.is_empty());
        assert!(scope.files().is_none());
    }

    #[test]
    fn range_with_same_endpoints_is_trivially_empty() {
        assert!(CommitRange::new(Some(oid(3)), oid(3)).is_trivially_empty());
        assert!(!CommitRange::new(None, oid(3)).is_trivially_empty());
    }

    #[test]
    fn scope_serializes_with_kind_tag() {
        let files: BTreeSet<String> = ["src/lib.rs".to_string()].into();
        let scope = ChangeScope::Worktree { files };
        let value = serde_json::to_value(&scope).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"kind": "worktree", "files": ["src/lib.rs"]})
        );
    }
}
