pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod git;
pub mod install;
pub mod protocol;
pub mod resolve;
pub mod runner;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{HookInput, ScopeDispatcher, ScopeFailure, ScopeResult, Scopes};
pub use error::HookError;
pub use git::{GitCli, GitRefReader};
pub use runner::{run_hook, CheckOutcome, CheckRunner, CommandRunner, HookReport, ScopeStatus};
pub use types::*;
