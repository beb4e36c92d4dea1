use std::collections::BTreeSet;

use tracing::debug;

use crate::error::HookError;
use crate::git::GitRefReader;
use crate::types::{ChangeScope, CommitRange};

/// Turns commit ranges and the index into file sets.
pub struct FileSetAggregator<'a, R: GitRefReader> {
    git: &'a R,
}

impl<'a, R: GitRefReader> FileSetAggregator<'a, R> {
    pub fn new(git: &'a R) -> Self {
        Self { git }
    }

    /// Union of the files each commit in `range` touches on its own.
    ///
    /// This is deliberately not a diff between the two endpoints: a merge in
    /// the range must not hide the files of the commits it brings in.
    pub fn range_files(&self, range: &CommitRange) -> Result<BTreeSet<String>, HookError> {
        let mut files = BTreeSet::new();
        if range.is_trivially_empty() {
            return Ok(files);
        }
        let commits = self.git.rev_list(range)?;
        for commit in &commits {
            files.extend(self.git.changed_files(commit)?);
        }
        debug!(
            commits = commits.len(),
            files = files.len(),
            end = %range.end,
            "aggregated range"
        );
        Ok(files)
    }

    /// The scope for a resolved range; empty ranges become [`ChangeScope::NoOp`].
    pub fn range_scope(&self, range: CommitRange) -> Result<ChangeScope, HookError> {
        let files = self.range_files(&range)?;
        Ok(ChangeScope::range(range, files))
    }

    /// The staged index against HEAD.
    pub fn worktree_scope(&self) -> Result<ChangeScope, HookError> {
        let files = self.git.staged_files()?;
        debug!(files = files.len(), "staged changes");
        Ok(ChangeScope::Worktree { files })
    }
}
