pub mod install;
pub mod run;
pub mod scope;

use std::io::Read;
use std::path::PathBuf;

use hookscope_core::discovery::{discover_config, load_config, ProjectConfig};
use hookscope_core::{GitCli, HookInput, HookType};

use crate::output::Reporter;

/// Opens the repository containing the current directory.
pub(crate) fn open_repo(reporter: &mut Reporter) -> Option<GitCli> {
    let cwd = match std::env::current_dir() {
        Ok(c) => c,
        Err(e) => {
            reporter.error(&format!("Cannot get current directory: {e}"));
            return None;
        }
    };
    match GitCli::discover(&cwd) {
        Ok(git) => Some(git),
        Err(e) => {
            reporter.error(&format!("Not inside a git repository: {e}"));
            None
        }
    }
}

/// Loads `.hookscope.json`, from `config_override` or by walking up from
/// the repository root.
pub(crate) fn load_project(
    config_override: Option<&str>,
    git: &GitCli,
    reporter: &mut Reporter,
) -> Option<ProjectConfig> {
    let path = match config_override {
        Some(path) => PathBuf::from(path),
        None => match discover_config(git.root()) {
            Ok(p) => p,
            Err(e) => {
                reporter.error(&format!("{e}"));
                return None;
            }
        },
    };

    match load_config(&path) {
        Ok(c) => Some(c),
        Err(e) => {
            reporter.error(&format!("Failed to load {}: {e}", path.display()));
            None
        }
    }
}

/// Builds the hook input, reading stdin only for hooks git feeds through it.
pub(crate) fn read_hook_input(
    hook: HookType,
    args: &[String],
    reporter: &mut Reporter,
) -> Option<(HookInput, String)> {
    let mut stdin = String::new();
    if hook.reads_stdin() {
        if let Err(e) = std::io::stdin().read_to_string(&mut stdin) {
            reporter.error(&format!("Failed to read {hook} input: {e}"));
            return None;
        }
    }

    match HookInput::from_args(hook, args, stdin.clone()) {
        Ok(input) => Some((input, stdin)),
        Err(e) => {
            reporter.error(&format!("{e}"));
            None
        }
    }
}
