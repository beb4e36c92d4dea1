use regex::Regex;
use serde::{Deserialize, Serialize};

use super::HookType;
use crate::error::HookError;

/// A check entry in `.hookscope.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Program and leading arguments; scope files are appended.
    pub entry: Vec<String>,
    /// Hooks this check runs for. Empty means every hook.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<HookType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(default = "default_true")]
    pub pass_filenames: bool,
    #[serde(default)]
    pub always_run: bool,
}

fn default_true() -> bool {
    true
}

/// The `.hookscope.json` root document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookConfig {
    #[serde(default)]
    pub checks: Vec<CheckConfig>,
}

impl CheckConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn runs_for(&self, hook: HookType) -> bool {
        self.stages.is_empty() || self.stages.contains(&hook)
    }
}

/// A check with its file patterns compiled.
#[derive(Debug, Clone)]
pub struct Check {
    pub config: CheckConfig,
    files: Option<Regex>,
    exclude: Option<Regex>,
}

impl Check {
    pub fn compile(config: CheckConfig) -> Result<Self, HookError> {
        if config.entry.is_empty() {
            return Err(HookError::Other(format!(
                "Check '{}' has an empty entry",
                config.id
            )));
        }
        let files = config.files.as_deref().map(Regex::new).transpose()?;
        let exclude = config.exclude.as_deref().map(Regex::new).transpose()?;
        Ok(Self {
            config,
            files,
            exclude,
        })
    }

    /// Whether `path` passes this check's `files` and `exclude` patterns.
    pub fn matches(&self, path: &str) -> bool {
        let included = self.files.as_ref().map_or(true, |re| re.is_match(path));
        let excluded = self.exclude.as_ref().is_some_and(|re| re.is_match(path));
        included && !excluded
    }
}

impl HookConfig {
    pub fn compile(self) -> Result<Vec<Check>, HookError> {
        self.checks.into_iter().map(Check::compile).collect()
    }
}
