use std::path::Path;

use hookscope_core::install::find_legacy;
use hookscope_core::runner::run_legacy;
use hookscope_core::{run_hook, CommandRunner, HookType, ScopeDispatcher};
use tracing::{debug, info};

use crate::commands::{load_project, open_repo, read_hook_input};
use crate::output::Reporter;

/// Runs every configured check for `hook` over the scopes git's input
/// resolves to. Returns false if any scope or the legacy hook failed.
pub fn run_hook_command(
    hook: HookType,
    hook_dir: Option<&Path>,
    args: &[String],
    config_override: Option<&str>,
    reporter: &mut Reporter,
) -> bool {
    let Some(git) = open_repo(reporter) else {
        return false;
    };
    let Some(project) = load_project(config_override, &git, reporter) else {
        return false;
    };
    let checks = match project.checks() {
        Ok(c) => c,
        Err(e) => {
            reporter.error(&format!(
                "Invalid check in {}: {e}",
                project.config_path.display()
            ));
            return false;
        }
    };
    let Some((input, stdin)) = read_hook_input(hook, args, reporter) else {
        return false;
    };

    // Malformed input rejects the whole push before anything runs.
    let dispatcher = ScopeDispatcher::new(&git);
    let scopes = match dispatcher.dispatch(input) {
        Ok(s) => s,
        Err(e) => {
            reporter.error(&format!("{e}"));
            return false;
        }
    };

    let mut success = true;
    if let Some(legacy) = hook_dir.and_then(|dir| find_legacy(dir, hook)) {
        info!(path = %legacy.display(), "running legacy hook");
        match run_legacy(&legacy, args, &stdin) {
            Ok(outcome) => {
                reporter.check_output(&outcome.output, !outcome.passed);
                if outcome.passed {
                    reporter.success(&format!("{}: passed", legacy.display()));
                } else {
                    reporter.error(&format!("{}: failed", legacy.display()));
                    success = false;
                }
            }
            Err(e) => {
                reporter.error(&format!("{e}"));
                success = false;
            }
        }
    }

    debug!(checks = checks.len(), root = %git.root().display(), "running checks");
    let mut runner = CommandRunner::new(git.root(), checks);
    let report = run_hook(hook, scopes, &mut runner);
    reporter.report_hook(&report);

    if !report.passed() {
        let failed = report.failures().count();
        reporter.error(&format!(
            "{hook}: {failed} of {} scope(s) failed",
            report.entries.len()
        ));
        success = false;
    }

    success
}
