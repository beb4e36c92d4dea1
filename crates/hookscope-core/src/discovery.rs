use std::path::{Path, PathBuf};

use crate::error::HookError;
use crate::types::{Check, HookConfig};

pub const CONFIG_FILE_NAME: &str = ".hookscope.json";

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_path: PathBuf,
    pub project_root: PathBuf,
    pub config: HookConfig,
}

impl ProjectConfig {
    pub fn checks(&self) -> Result<Vec<Check>, HookError> {
        self.config.clone().compile()
    }
}

/// Walks up from `start_dir` looking for `.hookscope.json`, stopping at the
/// first directory that contains `.git`.
pub fn discover_config(start_dir: &Path) -> Result<PathBuf, HookError> {
    let mut current = start_dir.canonicalize()?;

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }

        if current.join(".git").exists() {
            break;
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => break,
        }
    }

    Err(HookError::ConfigNotFound(start_dir.to_path_buf()))
}

pub fn load_config(config_path: &Path) -> Result<ProjectConfig, HookError> {
    let config_path = config_path.canonicalize()?;

    let content = std::fs::read_to_string(&config_path)?;
    let config: HookConfig = serde_json::from_str(&content)?;

    let project_root = config_path
        .parent()
        .ok_or_else(|| HookError::Other("Invalid config path".into()))?
        .to_path_buf();

    Ok(ProjectConfig {
        config_path,
        project_root,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_config(tmp: &TempDir) -> PathBuf {
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{"checks": [{"id": "lint", "entry": ["true"], "files": "\\.rs$"}]}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn discover_from_project_root() {
        let tmp = TempDir::new().unwrap();
        let path = setup_config(&tmp);
        let found = discover_config(tmp.path()).unwrap();
        assert_eq!(found, path.canonicalize().unwrap());
    }

    #[test]
    fn discover_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        setup_config(&tmp);
        let sub = tmp.path().join("src").join("nested");
        std::fs::create_dir_all(&sub).unwrap();

        let found = discover_config(&sub).unwrap();
        assert!(found.ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn discover_stops_at_repository_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "{}").unwrap();
        let repo = tmp.path().join("inner");
        std::fs::create_dir_all(repo.join(".git")).unwrap();

        let result = discover_config(&repo);
        assert!(matches!(result, Err(HookError::ConfigNotFound(_))));
    }

    #[test]
    fn load_config_resolves_root_and_checks() {
        let tmp = TempDir::new().unwrap();
        let path = setup_config(&tmp);
        let project = load_config(&path).unwrap();
        assert_eq!(project.project_root, tmp.path().canonicalize().unwrap());
        let checks = project.checks().unwrap();
        assert_eq!(checks.len(), 1);
        assert!(checks[0].matches("src/lib.rs"));
    }

    #[test]
    fn load_config_rejects_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(load_config(&path), Err(HookError::Json(_))));
    }
}
