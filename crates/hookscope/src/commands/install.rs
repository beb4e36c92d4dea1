use hookscope_core::install::{install_hooks, uninstall_hooks};
use hookscope_core::HookType;

use crate::commands::open_repo;
use crate::output::Reporter;

pub fn run_install(hook_types: &[HookType], overwrite: bool, reporter: &mut Reporter) -> bool {
    let Some(git) = open_repo(reporter) else {
        return false;
    };

    let hooks: Vec<HookType> = if hook_types.is_empty() {
        vec![HookType::PreCommit]
    } else {
        hook_types.to_vec()
    };

    let exe = match std::env::current_exe() {
        Ok(p) => p,
        Err(e) => {
            reporter.error(&format!("Cannot locate the hookscope executable: {e}"));
            return false;
        }
    };

    let hooks_dir = match git.hooks_dir() {
        Ok(d) => d,
        Err(e) => {
            reporter.error(&format!("Cannot locate hooks directory: {e}"));
            return false;
        }
    };

    match install_hooks(&hooks_dir, &hooks, &exe, overwrite) {
        Ok(actions) => {
            for action in &actions {
                reporter.success(action);
            }
            true
        }
        Err(e) => {
            reporter.error(&format!("Failed to install hooks: {e}"));
            false
        }
    }
}

pub fn run_uninstall(hook_types: &[HookType], reporter: &mut Reporter) -> bool {
    let Some(git) = open_repo(reporter) else {
        return false;
    };

    let hooks: &[HookType] = if hook_types.is_empty() {
        &HookType::ALL
    } else {
        hook_types
    };

    let hooks_dir = match git.hooks_dir() {
        Ok(d) => d,
        Err(e) => {
            reporter.error(&format!("Cannot locate hooks directory: {e}"));
            return false;
        }
    };

    match uninstall_hooks(&hooks_dir, hooks) {
        Ok(actions) if actions.is_empty() => {
            reporter.info("No hookscope hooks installed");
            true
        }
        Ok(actions) => {
            for action in &actions {
                if action.starts_with("Skipped") {
                    reporter.warning(action);
                } else {
                    reporter.success(action);
                }
            }
            true
        }
        Err(e) => {
            reporter.error(&format!("Failed to uninstall hooks: {e}"));
            false
        }
    }
}
