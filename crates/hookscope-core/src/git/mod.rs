//! Read-only queries over a repository's commit graph.
//!
//! The resolver never walks history itself; every ancestry, range and diff
//! question goes through [`GitRefReader`]. [`GitCli`] answers them by running
//! `git` in the working tree.

pub mod cli;

use std::collections::BTreeSet;

use crate::error::HookError;
use crate::types::{CommitRange, ObjectId};

pub use cli::GitCli;

/// A remote-tracking ref and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingRef {
    pub name: String,
    pub target: ObjectId,
}

/// Query surface over the commit graph.
///
/// Every method is read-only. A sha that cannot be resolved is an error
/// ([`HookError::GitQuery`]), never an empty answer.
pub trait GitRefReader {
    /// Whether `ancestor` is reachable from `descendant` (a commit is its own ancestor).
    fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> Result<bool, HookError>;

    /// The best common ancestor of `a` and `b`, if the histories meet at all.
    fn merge_base(&self, a: &ObjectId, b: &ObjectId) -> Result<Option<ObjectId>, HookError>;

    /// Commits in `range`, newest first in topological order.
    fn rev_list(&self, range: &CommitRange) -> Result<Vec<ObjectId>, HookError>;

    /// Paths touched by `commit` relative to its parent.
    ///
    /// Root commits list every file. Merge commits list nothing: whatever
    /// they bring in is attributed to the merged commits themselves.
    fn changed_files(&self, commit: &ObjectId) -> Result<BTreeSet<String>, HookError>;

    /// Whether `id` names a commit present in the local object store.
    fn commit_exists(&self, id: &ObjectId) -> Result<bool, HookError>;

    /// Remote-tracking refs under `refs/remotes/<remote>/`, sorted by name.
    fn remote_refs(&self, remote: &str) -> Result<Vec<TrackingRef>, HookError>;

    /// Paths staged in the index relative to HEAD, excluding deletions.
    fn staged_files(&self) -> Result<BTreeSet<String>, HookError>;
}
