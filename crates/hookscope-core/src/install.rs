//! Installing and removing hookscope's wrapper scripts.
//!
//! Each wrapper is a small shell script in the repository's hooks directory
//! that hands its arguments to `hookscope run <hook>`. A hook that already
//! exists and was not written by hookscope is moved aside to
//! `<hook>.legacy`; `hookscope run` still executes it first.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::HookError;
use crate::types::HookType;

/// Line identifying a script as ours.
pub const HOOK_MARKER: &str = "# hookscope-managed";

const HOOK_TEMPLATE: &str = "#!/bin/sh
# hookscope-managed
# Regenerated by `hookscope install`; local edits will be lost.
HOOKSCOPE={exe}
exec \"$HOOKSCOPE\" run {hook} --hook-dir \"$(dirname \"$0\")\" -- \"$@\"
";

/// Renders the wrapper script for `hook`, invoking the binary at `exe`.
pub fn render_hook_script(hook: HookType, exe: &Path) -> String {
    HOOK_TEMPLATE
        .replace("{exe}", &shell_quote(&exe.to_string_lossy()))
        .replace("{hook}", hook.name())
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Whether the file at `path` is a hookscope wrapper.
pub fn is_managed(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| content.lines().any(|line| line == HOOK_MARKER))
        .unwrap_or(false)
}

pub fn legacy_path(hooks_dir: &Path, hook: HookType) -> PathBuf {
    hooks_dir.join(format!("{}.legacy", hook.name()))
}

/// Installs wrapper scripts for `hooks` into `hooks_dir`.
///
/// A foreign hook already in place is moved to `<hook>.legacy` unless
/// `overwrite` is set, in which case it is replaced. Returns one
/// human-readable line per action taken.
///
/// # Errors
///
/// Returns [`HookError::Io`] if the directory or a script cannot be written.
pub fn install_hooks(
    hooks_dir: &Path,
    hooks: &[HookType],
    exe: &Path,
    overwrite: bool,
) -> Result<Vec<String>, HookError> {
    fs::create_dir_all(hooks_dir)?;

    let mut actions = Vec::new();
    for hook in hooks {
        let hook_path = hooks_dir.join(hook.name());

        if hook_path.exists() && !is_managed(&hook_path) {
            if overwrite {
                actions.push(format!("Replaced existing {}", hook_path.display()));
            } else {
                let legacy = legacy_path(hooks_dir, *hook);
                fs::rename(&hook_path, &legacy)?;
                actions.push(format!(
                    "Moved existing {} to {}",
                    hook_path.display(),
                    legacy.display()
                ));
            }
        }

        fs::write(&hook_path, render_hook_script(*hook, exe))?;

        // Make executable on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o755);
            fs::set_permissions(&hook_path, perms)?;
        }

        debug!(hook = %hook, path = %hook_path.display(), "installed");
        actions.push(format!("Installed {}", hook_path.display()));
    }

    Ok(actions)
}

/// Removes hookscope's wrappers for `hooks`, restoring any legacy hook.
///
/// Hooks hookscope did not write are left untouched.
pub fn uninstall_hooks(hooks_dir: &Path, hooks: &[HookType]) -> Result<Vec<String>, HookError> {
    let mut actions = Vec::new();
    for hook in hooks {
        let hook_path = hooks_dir.join(hook.name());
        if !hook_path.exists() {
            continue;
        }
        if !is_managed(&hook_path) {
            actions.push(format!("Skipped {} (not installed by hookscope)", hook_path.display()));
            continue;
        }

        fs::remove_file(&hook_path)?;
        actions.push(format!("Removed {}", hook_path.display()));

        let legacy = legacy_path(hooks_dir, *hook);
        if legacy.exists() {
            fs::rename(&legacy, &hook_path)?;
            actions.push(format!("Restored {}", hook_path.display()));
        }
    }
    Ok(actions)
}

/// The legacy hook for `hook`, if one exists and can be executed.
pub fn find_legacy(hooks_dir: &Path, hook: HookType) -> Option<PathBuf> {
    let legacy = legacy_path(hooks_dir, hook);
    let meta = fs::metadata(&legacy).ok()?;
    if !meta.is_file() {
        return None;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if meta.permissions().mode() & 0o111 == 0 {
            return None;
        }
    }
    Some(legacy)
}
