#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const NULL_SHA: &str = "0000000000000000000000000000000000000000";

pub fn hookscope_cmd() -> assert_cmd::Command {
    cargo_bin_cmd!("hookscope")
}

/// A throwaway directory holding an upstream repository and its clones.
pub struct Sandbox {
    tmp: TempDir,
}

impl Sandbox {
    /// Creates a sandbox whose `upstream` repository has one commit on
    /// `master` adding `README`.
    pub fn new() -> Self {
        let sandbox = Self {
            tmp: TempDir::new().unwrap(),
        };
        let upstream = Repo::init(sandbox.tmp.path().join("upstream"));
        upstream.commit("README");
        sandbox
    }

    pub fn upstream(&self) -> Repo {
        Repo {
            path: self.tmp.path().join("upstream"),
        }
    }

    pub fn clone(&self, name: &str) -> Repo {
        let path = self.tmp.path().join(name);
        run_git(
            self.tmp.path(),
            &["clone", "-q", "upstream", path.to_str().unwrap()],
        );
        let repo = Repo { path };
        repo.configure();
        repo
    }

    /// A bare copy of upstream that clones can push to.
    pub fn bare_remote(&self) -> PathBuf {
        let path = self.tmp.path().join("remote.git");
        run_git(
            self.tmp.path(),
            &["clone", "-q", "--bare", "upstream", path.to_str().unwrap()],
        );
        path
    }

    pub fn clone_from(&self, remote: &Path, name: &str) -> Repo {
        let path = self.tmp.path().join(name);
        run_git(
            self.tmp.path(),
            &["clone", "-q", remote.to_str().unwrap(), path.to_str().unwrap()],
        );
        let repo = Repo { path };
        repo.configure();
        repo
    }
}

pub struct Repo {
    pub path: PathBuf,
}

impl Repo {
    fn init(path: PathBuf) -> Self {
        fs::create_dir_all(&path).unwrap();
        run_git(&path, &["init", "-q"]);
        run_git(&path, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        let repo = Self { path };
        repo.configure();
        repo
    }

    fn configure(&self) {
        self.git(&["config", "user.name", "Hook Tester"]);
        self.git(&["config", "user.email", "hooks@example.com"]);
        self.git(&["config", "commit.gpgsign", "false"]);
    }

    pub fn git(&self, args: &[&str]) -> String {
        run_git(&self.path, args)
    }

    pub fn write(&self, name: &str, content: &str) {
        let path = self.path.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Commits a new file named `name` and returns the new HEAD.
    pub fn commit(&self, name: &str) -> String {
        self.write(name, &format!("{name}\n"));
        self.git(&["add", name]);
        self.git(&["commit", "-q", "-n", "-m", &format!("add {name}")]);
        self.head()
    }

    pub fn head(&self) -> String {
        self.rev("HEAD")
    }

    pub fn rev(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev])
    }

    /// Writes `.hookscope.json` at the repository root.
    pub fn write_config(&self, json: &str) {
        self.write(".hookscope.json", json);
    }

    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = hookscope_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// One pre-push input line.
pub fn push_line(local_ref: &str, local_sha: &str, remote_ref: &str, remote_sha: &str) -> String {
    format!("{local_ref} {local_sha} {remote_ref} {remote_sha}\n")
}

/// Parses the JSON a `--json` invocation printed.
pub fn json_output(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).unwrap()
}
