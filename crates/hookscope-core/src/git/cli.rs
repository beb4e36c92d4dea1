use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::trace;

use super::{GitRefReader, TrackingRef};
use crate::error::HookError;
use crate::types::{CommitRange, ObjectId};

/// Statuses git uses for staged files that still exist (everything but `D`).
const STAGED_FILTER: &str = "--diff-filter=ACMRTUXB";

/// [`GitRefReader`] backed by the `git` executable, run in the working tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Uses `root` as the working tree without checking it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds the top level of the working tree containing `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::GitQuery`] when `start_dir` is not inside a
    /// git working tree.
    pub fn discover(start_dir: &Path) -> Result<Self, HookError> {
        let probe = Self::new(start_dir);
        let top = probe.capture(&["rev-parse", "--show-toplevel"])?;
        Ok(Self::new(top.trim_end()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory git runs hooks from, honouring `core.hooksPath`.
    pub fn hooks_dir(&self) -> Result<PathBuf, HookError> {
        let path = self.capture(&["rev-parse", "--git-path", "hooks"])?;
        let path = PathBuf::from(path.trim_end());
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.root.join(path))
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output, HookError> {
        trace!(root = %self.root.display(), ?args, "running git");
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| HookError::git(args.join(" "), format!("failed to run git: {e}")))
    }

    /// Runs git with `input` on stdin and waits for it to finish.
    fn run_with_input(&self, args: &[&str], input: &str) -> Result<Output, HookError> {
        trace!(root = %self.root.display(), ?args, input_len = input.len(), "running git");
        let failed =
            |e: std::io::Error| HookError::git(args.join(" "), format!("failed to run git: {e}"));
        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(failed)?;
        if let Some(mut pipe) = child.stdin.take() {
            pipe.write_all(input.as_bytes()).map_err(failed)?;
        }
        child.wait_with_output().map_err(failed)
    }

    /// Runs git and returns stdout, failing on a non-zero exit.
    fn capture(&self, args: &[&str]) -> Result<String, HookError> {
        let output = self.run(args)?;
        Self::stdout_of(args, output)
    }

    fn stdout_of(args: &[&str], output: Output) -> Result<String, HookError> {
        if !output.status.success() {
            return Err(HookError::git(
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        String::from_utf8(output.stdout)
            .map_err(|_| HookError::git(args.join(" "), "output is not valid UTF-8"))
    }

    /// Runs a git predicate: exit 0 is true, exit 1 is false, anything else fails.
    fn predicate(&self, args: &[&str]) -> Result<bool, HookError> {
        let output = self.run(args)?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(HookError::git(
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            )),
        }
    }

    fn capture_paths(&self, args: &[&str]) -> Result<BTreeSet<String>, HookError> {
        let stdout = self.capture(args)?;
        Ok(split_nul(&stdout))
    }

    fn parse_oids(command: &str, stdout: &str) -> Result<Vec<ObjectId>, HookError> {
        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                ObjectId::parse(line)
                    .ok_or_else(|| HookError::git(command, format!("unexpected output {line:?}")))
            })
            .collect()
    }
}

fn split_nul(stdout: &str) -> BTreeSet<String> {
    stdout
        .split('\0')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

impl GitRefReader for GitCli {
    fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> Result<bool, HookError> {
        self.predicate(&[
            "merge-base",
            "--is-ancestor",
            ancestor.as_str(),
            descendant.as_str(),
        ])
    }

    fn merge_base(&self, a: &ObjectId, b: &ObjectId) -> Result<Option<ObjectId>, HookError> {
        let args = ["merge-base", a.as_str(), b.as_str()];
        let output = self.run(&args)?;
        match output.status.code() {
            Some(0) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                Ok(Self::parse_oids("merge-base", &stdout)?.into_iter().next())
            }
            // Exit 1 with no output: the histories are unrelated.
            Some(1) if output.stdout.is_empty() && output.stderr.is_empty() => Ok(None),
            _ => Err(HookError::git(
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            )),
        }
    }

    fn rev_list(&self, range: &CommitRange) -> Result<Vec<ObjectId>, HookError> {
        // Revisions go through stdin; a remote can have more hidden tips
        // than fit on a command line.
        let mut revs = format!("{}\n", range.end);
        for id in range.start.iter().chain(range.hidden.iter()) {
            revs.push_str(&format!("^{id}\n"));
        }
        let args = ["rev-list", "--topo-order", "--stdin"];
        let output = self.run_with_input(&args, &revs)?;
        let stdout = Self::stdout_of(&args, output)?;
        Self::parse_oids("rev-list", &stdout)
    }

    fn changed_files(&self, commit: &ObjectId) -> Result<BTreeSet<String>, HookError> {
        self.capture_paths(&[
            "diff-tree",
            "--no-commit-id",
            "--name-only",
            "--no-ext-diff",
            "-r",
            "--root",
            "-z",
            commit.as_str(),
        ])
    }

    fn commit_exists(&self, id: &ObjectId) -> Result<bool, HookError> {
        let spec = format!("{id}^{{commit}}");
        let output = self.run(&["cat-file", "-e", &spec])?;
        Ok(output.status.success())
    }

    fn remote_refs(&self, remote: &str) -> Result<Vec<TrackingRef>, HookError> {
        let prefix = format!("refs/remotes/{remote}/");
        let stdout = self.capture(&[
            "for-each-ref",
            "--format=%(objectname) %(refname) %(symref)",
            &prefix,
        ])?;

        let mut refs = Vec::new();
        for line in stdout.lines() {
            let mut parts = line.splitn(3, ' ');
            let (Some(oid), Some(name)) = (parts.next(), parts.next()) else {
                continue;
            };
            // Symbolic refs such as `origin/HEAD` alias another tracking ref.
            if parts.next().is_some_and(|symref| !symref.is_empty()) {
                continue;
            }
            let target = ObjectId::parse(oid)
                .ok_or_else(|| HookError::git("for-each-ref", format!("bad object name {oid:?}")))?;
            refs.push(TrackingRef {
                name: name.to_string(),
                target,
            });
        }
        refs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(refs)
    }

    fn staged_files(&self) -> Result<BTreeSet<String>, HookError> {
        self.capture_paths(&[
            "diff",
            "--cached",
            "--name-only",
            "--no-ext-diff",
            "-z",
            STAGED_FILTER,
        ])
    }
}
