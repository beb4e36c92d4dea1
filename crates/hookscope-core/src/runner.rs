//! Running checks against resolved scopes and aggregating the result.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::{debug, info};

use crate::dispatch::ScopeResult;
use crate::error::HookError;
use crate::types::{ChangeScope, Check, HookType};

/// Pass/fail of one scope's check run plus everything the checks printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub passed: bool,
    pub output: String,
}

impl CheckOutcome {
    pub fn passed(output: impl Into<String>) -> Self {
        Self {
            passed: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            passed: false,
            output: output.into(),
        }
    }
}

/// Executes the configured checks for a scope.
pub trait CheckRunner {
    fn run(&mut self, hook: HookType, scope: &ChangeScope) -> CheckOutcome;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeStatus {
    /// Nothing in scope; no check was run.
    Skipped,
    Passed,
    Failed,
    /// The scope could not be resolved. Counts as a failure.
    Unresolved,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScopeReport {
    pub label: String,
    pub status: ScopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<ChangeScope>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub output: String,
}

/// The aggregate result of one hook invocation.
#[derive(Debug, Clone, Serialize)]
pub struct HookReport {
    pub hook: HookType,
    pub entries: Vec<ScopeReport>,
}

impl HookReport {
    pub fn new(hook: HookType) -> Self {
        Self {
            hook,
            entries: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e.status, ScopeStatus::Skipped | ScopeStatus::Passed))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScopeReport> {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, ScopeStatus::Failed | ScopeStatus::Unresolved))
    }
}

/// Runs checks over every scope, in order, without stopping at a failure.
///
/// Empty scopes pass without reaching `runner`. A scope that failed to
/// resolve is reported as unresolved with the error text as its output.
pub fn run_hook<I, C>(hook: HookType, scopes: I, runner: &mut C) -> HookReport
where
    I: IntoIterator<Item = ScopeResult>,
    C: CheckRunner + ?Sized,
{
    let mut report = HookReport::new(hook);
    for result in scopes {
        let entry = match result {
            Ok(resolved) => {
                let label = resolved.label();
                if resolved.scope.is_empty() {
                    debug!(%label, "empty scope, skipping checks");
                    ScopeReport {
                        label,
                        status: ScopeStatus::Skipped,
                        scope: Some(resolved.scope),
                        output: String::new(),
                    }
                } else {
                    let outcome = runner.run(hook, &resolved.scope);
                    ScopeReport {
                        label,
                        status: if outcome.passed {
                            ScopeStatus::Passed
                        } else {
                            ScopeStatus::Failed
                        },
                        scope: Some(resolved.scope),
                        output: outcome.output,
                    }
                }
            }
            Err(failure) => ScopeReport {
                label: failure.label(),
                status: ScopeStatus::Unresolved,
                scope: None,
                output: failure.error.to_string(),
            },
        };
        report.entries.push(entry);
    }
    report
}

/// Runs each configured check as an external command in the repository root.
pub struct CommandRunner {
    root: PathBuf,
    checks: Vec<Check>,
}

impl CommandRunner {
    pub fn new(root: impl Into<PathBuf>, checks: Vec<Check>) -> Self {
        Self {
            root: root.into(),
            checks,
        }
    }

    /// Arguments a check receives for `scope`, or `None` to skip it.
    fn arguments(check: &Check, scope: &ChangeScope) -> Option<Vec<String>> {
        let args: Vec<String> = match scope {
            ChangeScope::MessageFile { path } => {
                let path = path.to_string_lossy().into_owned();
                if check.matches(&path) {
                    vec![path]
                } else {
                    Vec::new()
                }
            }
            ChangeScope::NoOp => Vec::new(),
            ChangeScope::Range { files, .. } | ChangeScope::Worktree { files } => files
                .iter()
                .filter(|path| check.matches(path))
                .cloned()
                .collect(),
        };

        if args.is_empty() && !check.config.always_run {
            return None;
        }
        if check.config.pass_filenames {
            Some(args)
        } else {
            Some(Vec::new())
        }
    }

    fn execute(&self, check: &Check, args: &[String]) -> Result<CheckOutcome, HookError> {
        let (program, leading) = check
            .config
            .entry
            .split_first()
            .ok_or_else(|| HookError::Other(format!("Check '{}' has an empty entry", check.config.id)))?;

        let output = Command::new(program)
            .args(leading)
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| HookError::Other(format!("Failed to run {program}: {e}")))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        if output.status.success() {
            Ok(CheckOutcome::passed(text))
        } else {
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            text.push_str(&format!(
                "{} failed (exit code {code})\n",
                check.config.display_name()
            ));
            Ok(CheckOutcome::failed(text))
        }
    }
}

impl CheckRunner for CommandRunner {
    fn run(&mut self, hook: HookType, scope: &ChangeScope) -> CheckOutcome {
        let mut outcome = CheckOutcome::passed(String::new());
        for check in self.checks.iter().filter(|c| c.config.runs_for(hook)) {
            let Some(args) = Self::arguments(check, scope) else {
                debug!(check = %check.config.id, "no matching files, skipping");
                continue;
            };
            info!(check = %check.config.id, files = args.len(), "running check");
            let result = self
                .execute(check, &args)
                .unwrap_or_else(|e| CheckOutcome::failed(format!("{e}\n")));
            outcome.passed &= result.passed;
            outcome.output.push_str(&result.output);
        }
        outcome
    }
}

/// Runs a pre-existing hook that was moved aside at install time.
///
/// The legacy hook receives the same arguments and stdin git gave us.
pub fn run_legacy(path: &Path, args: &[String], stdin: &str) -> Result<CheckOutcome, HookError> {
    let mut child = Command::new(path)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| HookError::Other(format!("Failed to run {}: {e}", path.display())))?;

    if let Some(mut pipe) = child.stdin.take() {
        // A hook that exits without reading stdin closes the pipe early.
        if let Err(e) = pipe.write_all(stdin.as_bytes()) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }

    let output = child.wait_with_output()?;
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    if output.status.success() {
        Ok(CheckOutcome::passed(text))
    } else {
        Ok(CheckOutcome::failed(text))
    }
}
