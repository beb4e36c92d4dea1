//! Parsing of the pre-push hook's stdin protocol.
//!
//! git writes one line per ref being pushed:
//!
//! ```text
//! <local-ref> SP <local-sha> SP <remote-ref> SP <remote-sha> LF
//! ```
//!
//! Deletions carry the all-zero sha as `<local-sha>`, new branches as
//! `<remote-sha>`.

use crate::error::HookError;
use crate::types::{ObjectId, RefUpdate};

/// Parses every line of pre-push input.
///
/// Blank lines are skipped. Any other line that does not hold exactly four
/// fields with valid object names fails the whole parse, so no ref is ever
/// scoped from partially trusted input.
///
/// # Errors
///
/// Returns [`HookError::Protocol`] naming the first malformed line (1-based).
pub fn parse_pre_push(input: &str) -> Result<Vec<RefUpdate>, HookError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<RefUpdate, HookError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[local_ref, local_sha, remote_ref, remote_sha] = fields.as_slice() else {
        return Err(HookError::protocol(
            line_no,
            format!("expected 4 fields, found {}", fields.len()),
        ));
    };

    let sha = |field: &str, what: &str| {
        ObjectId::parse(field).ok_or_else(|| {
            HookError::protocol(line_no, format!("invalid {what} sha {field:?}"))
        })
    };

    Ok(RefUpdate {
        local_ref: local_ref.to_string(),
        local_sha: sha(local_sha, "local")?,
        remote_ref: remote_ref.to_string(),
        remote_sha: sha(remote_sha, "remote")?,
    })
}
