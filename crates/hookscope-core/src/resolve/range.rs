//! Commit boundaries for pre-push ref updates.
//!
//! Each [`RefUpdate`] is classified by what git tells us about the two tips:
//!
//! - **deletion**: nothing is pushed, so nothing is checked;
//! - **new branch**: the branch is measured from the closest point where it
//!   meets history the remote already has, via the remote's tracking refs;
//! - **fast-forward**: the literal `remote_sha..local_sha` range;
//! - **rewritten history** (force-push, rebase, amend): measured from the
//!   merge base of the two tips, minus anything the remote already carries
//!   under a sibling branch.
//!
//! A push that both rewrites history and merges in foreign commits can be
//! over- or under-reported by these rules. That behaviour is kept as is.

use tracing::debug;

use crate::error::HookError;
use crate::git::GitRefReader;
use crate::types::{CommitRange, ObjectId, RefUpdate};

/// Resolves ref updates pushed to one remote.
pub struct RangeResolver<'a, R: GitRefReader> {
    git: &'a R,
    remote: &'a str,
}

impl<'a, R: GitRefReader> RangeResolver<'a, R> {
    /// `remote` is the remote name git passes to the pre-push hook; its
    /// tracking refs are the "siblings" a pushed branch is compared against.
    pub fn new(git: &'a R, remote: &'a str) -> Self {
        Self { git, remote }
    }

    /// Computes the commit range `update` introduces, or `None` for a deletion.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::GitQuery`] when any ancestry or range query fails.
    pub fn resolve(&self, update: &RefUpdate) -> Result<Option<CommitRange>, HookError> {
        if update.is_deletion() {
            debug!(remote_ref = %update.remote_ref, "deletion, nothing to check");
            return Ok(None);
        }

        let local = &update.local_sha;
        if update.is_new_branch() {
            return self.new_branch(local).map(Some);
        }

        let remote = &update.remote_sha;
        if !self.git.commit_exists(remote)? {
            debug!(
                remote_ref = %update.remote_ref,
                remote_sha = %remote,
                "remote tip unknown locally, resolving as a new branch"
            );
            return self.new_branch(local).map(Some);
        }

        if self.git.is_ancestor(remote, local)? {
            debug!(
                remote_ref = %update.remote_ref,
                start = %remote,
                end = %local,
                "fast-forward"
            );
            return Ok(Some(CommitRange::new(Some(remote.clone()), local.clone())));
        }

        self.rewritten(update).map(Some)
    }

    fn new_branch(&self, local: &ObjectId) -> Result<CommitRange, HookError> {
        let mut best: Option<(usize, ObjectId)> = None;
        for sibling in self.git.remote_refs(self.remote)? {
            let Some(base) = self.git.merge_base(local, &sibling.target)? else {
                continue;
            };
            let pending = self
                .git
                .rev_list(&CommitRange::new(Some(base.clone()), local.clone()))?
                .len();
            if best.as_ref().map_or(true, |(fewest, _)| pending < *fewest) {
                best = Some((pending, base));
            }
        }

        let start = best.map(|(_, base)| base);
        match &start {
            Some(base) => debug!(start = %base, end = %local, "new branch"),
            None => debug!(end = %local, "new branch with no known base, checking full history"),
        }
        Ok(CommitRange::new(start, local.clone()))
    }

    fn rewritten(&self, update: &RefUpdate) -> Result<CommitRange, HookError> {
        let local = &update.local_sha;
        let start = self.git.merge_base(local, &update.remote_sha)?;

        let own = tracking_ref_name(self.remote, &update.remote_ref);
        let mut hidden: Vec<ObjectId> = self
            .git
            .remote_refs(self.remote)?
            .into_iter()
            .filter(|r| own.as_deref() != Some(r.name.as_str()))
            .map(|r| r.target)
            .collect();
        hidden.sort();
        hidden.dedup();

        debug!(
            remote_ref = %update.remote_ref,
            start = start.as_ref().map(ObjectId::as_str).unwrap_or("<root>"),
            end = %local,
            hidden = hidden.len(),
            "rewritten history"
        );
        Ok(CommitRange::new(start, local.clone()).with_hidden(hidden))
    }
}

/// The tracking ref git's default refspec maps a pushed branch to.
fn tracking_ref_name(remote: &str, remote_ref: &str) -> Option<String> {
    remote_ref
        .strip_prefix("refs/heads/")
        .map(|branch| format!("refs/remotes/{remote}/{branch}"))
}
