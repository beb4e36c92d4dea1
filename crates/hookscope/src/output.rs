use colored::*;
use hookscope_core::{ChangeScope, HookReport, ResolvedScope, ScopeFailure, ScopeStatus};
use serde::Serialize;

/// Output mode for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Quiet,
}

/// Accumulated JSON result entry.
#[derive(Debug, Serialize, Clone)]
pub struct JsonResultEntry {
    #[serde(rename = "type")]
    pub result_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Accumulated JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub results: Vec<JsonResultEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<serde_json::Value>,
}

/// Reporter handles all output formatting.
pub struct Reporter {
    mode: OutputMode,
    json_results: Vec<JsonResultEntry>,
    json_scopes: Vec<serde_json::Value>,
}

impl Reporter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            json_results: Vec::new(),
            json_scopes: Vec::new(),
        }
    }

    fn push(&mut self, result_type: &str, message: &str, details: Option<&str>) {
        self.json_results.push(JsonResultEntry {
            result_type: result_type.to_string(),
            message: message.to_string(),
            details: details.map(str::to_string),
        });
    }

    pub fn error(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human | OutputMode::Quiet => {
                eprintln!("{} {}", "ERROR:".red(), message);
            }
            OutputMode::Json => self.push("error", message, None),
        }
    }

    pub fn warning(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                eprintln!("{} {}", "WARNING:".yellow(), message);
            }
            OutputMode::Json => self.push("warning", message, None),
            OutputMode::Quiet => {}
        }
    }

    pub fn success(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "✓".green(), message);
            }
            OutputMode::Json => self.push("success", message, None),
            OutputMode::Quiet => {}
        }
    }

    pub fn info(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "INFO:".blue(), message);
            }
            OutputMode::Json => self.push("info", message, None),
            OutputMode::Quiet => {}
        }
    }

    pub fn section(&mut self, title: &str) {
        if self.mode == OutputMode::Human {
            println!("{}", format!("=== {title} ===").cyan());
        }
    }

    /// Echoes what a check printed. Failing output is shown even when quiet.
    pub fn check_output(&mut self, output: &str, failed: bool) {
        if output.is_empty() {
            return;
        }
        match self.mode {
            OutputMode::Human => print!("{output}"),
            OutputMode::Quiet if failed => print!("{output}"),
            _ => {}
        }
    }

    pub fn report_hook(&mut self, report: &HookReport) {
        for entry in &report.entries {
            let failed = matches!(entry.status, ScopeStatus::Failed | ScopeStatus::Unresolved);
            if self.mode == OutputMode::Json {
                let kind = match entry.status {
                    ScopeStatus::Skipped => "info",
                    ScopeStatus::Passed => "success",
                    ScopeStatus::Failed | ScopeStatus::Unresolved => "error",
                };
                let details = (!entry.output.is_empty()).then_some(entry.output.as_str());
                let message = status_message(&entry.label, entry.status);
                self.push(kind, &message, details);
                continue;
            }

            if entry.status != ScopeStatus::Unresolved {
                self.check_output(&entry.output, failed);
            }
            let message = status_message(&entry.label, entry.status);
            match entry.status {
                ScopeStatus::Skipped => self.info(&message),
                ScopeStatus::Passed => self.success(&message),
                ScopeStatus::Failed => self.error(&message),
                ScopeStatus::Unresolved => {
                    self.error(&format!("{message}: {}", entry.output.trim_end()))
                }
            }
        }
    }

    pub fn scope(&mut self, resolved: &ResolvedScope) {
        match self.mode {
            OutputMode::Json => {
                if let Ok(value) = serde_json::to_value(resolved) {
                    self.json_scopes.push(value);
                }
            }
            OutputMode::Human => {
                self.section(&resolved.label());
                if resolved.scope.is_empty() {
                    println!("{}", "(nothing to check)".dimmed());
                } else if let ChangeScope::MessageFile { path } = &resolved.scope {
                    println!("{}", path.display());
                } else if let Some(files) = resolved.scope.files() {
                    for file in files {
                        println!("{file}");
                    }
                }
            }
            OutputMode::Quiet => {}
        }
    }

    pub fn scope_failure(&mut self, failure: &ScopeFailure) {
        self.error(&format!(
            "{}: could not resolve scope: {}",
            failure.label(),
            failure.error
        ));
    }

    pub fn finish(&self) {
        if self.mode == OutputMode::Json {
            let output = JsonOutput {
                results: self.json_results.clone(),
                scopes: self.json_scopes.clone(),
            };
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                println!("{json}");
            }
        }
    }
}

fn status_message(label: &str, status: ScopeStatus) -> String {
    match status {
        ScopeStatus::Skipped => format!("{label}: nothing to check"),
        ScopeStatus::Passed => format!("{label}: passed"),
        ScopeStatus::Failed => format!("{label}: failed"),
        ScopeStatus::Unresolved => format!("{label}: could not resolve scope"),
    }
}
