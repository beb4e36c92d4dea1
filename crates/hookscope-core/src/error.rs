use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// A pre-push input line that does not hold four valid fields.
    #[error("Malformed pre-push input on line {line}: {reason}")]
    Protocol { line: usize, reason: String },

    /// Git could not answer an ancestry, range or diff question.
    #[error("git {command} failed: {message}")]
    GitQuery { command: String, message: String },

    #[error("No .hookscope.json found from {0}")]
    ConfigNotFound(PathBuf),

    #[error("Unknown hook type: {0}")]
    UnknownHookType(String),

    #[error("{0}")]
    Other(String),
}

impl HookError {
    pub(crate) fn protocol(line: usize, reason: impl Into<String>) -> Self {
        HookError::Protocol {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn git(command: impl Into<String>, message: impl Into<String>) -> Self {
        HookError::GitQuery {
            command: command.into(),
            message: message.into(),
        }
    }
}
