use hookscope_core::{HookType, ScopeDispatcher};

use crate::commands::{open_repo, read_hook_input};
use crate::output::Reporter;

/// Prints the scopes `hook` would check, without running anything.
pub fn run_scope(hook: HookType, args: &[String], reporter: &mut Reporter) -> bool {
    let Some(git) = open_repo(reporter) else {
        return false;
    };
    let Some((input, _)) = read_hook_input(hook, args, reporter) else {
        return false;
    };

    let dispatcher = ScopeDispatcher::new(&git);
    let scopes = match dispatcher.dispatch(input) {
        Ok(s) => s,
        Err(e) => {
            reporter.error(&format!("{e}"));
            return false;
        }
    };

    let mut success = true;
    for result in scopes {
        match result {
            Ok(resolved) => reporter.scope(&resolved),
            Err(failure) => {
                reporter.scope_failure(&failure);
                success = false;
            }
        }
    }
    success
}
