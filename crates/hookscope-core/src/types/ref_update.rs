use std::fmt;

use serde::Serialize;

use super::ObjectId;

/// One line of pre-push input: a ref's new local tip and its current remote tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefUpdate {
    pub local_ref: String,
    pub local_sha: ObjectId,
    pub remote_ref: String,
    pub remote_sha: ObjectId,
}

impl RefUpdate {
    /// The push removes `remote_ref`.
    pub fn is_deletion(&self) -> bool {
        self.local_sha.is_null()
    }

    /// `remote_ref` does not exist on the remote yet.
    pub fn is_new_branch(&self) -> bool {
        self.remote_sha.is_null()
    }
}

impl fmt::Display for RefUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_deletion() {
            write!(f, "{} (delete)", self.remote_ref)
        } else if self.is_new_branch() {
            write!(f, "{} -> {} (new)", self.local_ref, self.remote_ref)
        } else {
            write!(
                f,
                "{} -> {} ({}..{})",
                self.local_ref,
                self.remote_ref,
                self.remote_sha.short(),
                self.local_sha.short()
            )
        }
    }
}
