//! Test doubles: an in-memory commit graph and throwaway git repositories.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use crate::error::HookError;
use crate::git::{GitCli, GitRefReader, TrackingRef};
use crate::types::{CommitRange, ObjectId};

struct Node {
    parents: Vec<ObjectId>,
    files: BTreeSet<String>,
    seq: u32,
}

/// A commit graph held in memory. Commit ids are sequential, so a higher id
/// is always newer than its parents.
#[derive(Default)]
pub struct MemoryGraph {
    commits: HashMap<ObjectId, Node>,
    tracking: Vec<TrackingRef>,
    staged: BTreeSet<String>,
    next: u32,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, parents: &[&ObjectId], files: &[&str]) -> ObjectId {
        self.next += 1;
        let id = ObjectId::parse(&format!("{:040x}", self.next)).unwrap();
        self.commits.insert(
            id.clone(),
            Node {
                parents: parents.iter().map(|p| (*p).clone()).collect(),
                files: files.iter().map(|f| f.to_string()).collect(),
                seq: self.next,
            },
        );
        id
    }

    /// Points `refs/remotes/<remote>/<branch>` at `target`.
    pub fn track(&mut self, remote: &str, branch: &str, target: &ObjectId) {
        let name = format!("refs/remotes/{remote}/{branch}");
        self.tracking.retain(|r| r.name != name);
        self.tracking.push(TrackingRef {
            name,
            target: target.clone(),
        });
    }

    pub fn stage(&mut self, path: &str) {
        self.staged.insert(path.to_string());
    }

    fn node(&self, id: &ObjectId) -> Result<&Node, HookError> {
        self.commits
            .get(id)
            .ok_or_else(|| HookError::git("memory", format!("unknown commit {id}")))
    }

    fn reachable(&self, tip: &ObjectId) -> Result<HashSet<ObjectId>, HookError> {
        let mut seen = HashSet::new();
        let mut stack = vec![tip.clone()];
        while let Some(id) = stack.pop() {
            let node = self.node(&id)?;
            if seen.insert(id) {
                stack.extend(node.parents.iter().cloned());
            }
        }
        Ok(seen)
    }
}

impl GitRefReader for MemoryGraph {
    fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> Result<bool, HookError> {
        self.node(ancestor)?;
        Ok(self.reachable(descendant)?.contains(ancestor))
    }

    fn merge_base(&self, a: &ObjectId, b: &ObjectId) -> Result<Option<ObjectId>, HookError> {
        let from_a = self.reachable(a)?;
        let from_b = self.reachable(b)?;
        let common: Vec<&ObjectId> = from_a.intersection(&from_b).collect();
        Ok(common
            .iter()
            .filter_map(|id| self.commits.get(*id).map(|n| (*id, n.seq)))
            .max_by_key(|(_, seq)| *seq)
            .map(|(id, _)| id.clone()))
    }

    fn rev_list(&self, range: &CommitRange) -> Result<Vec<ObjectId>, HookError> {
        let mut included = self.reachable(&range.end)?;
        for tip in range.start.iter().chain(range.hidden.iter()) {
            for id in self.reachable(tip)? {
                included.remove(&id);
            }
        }
        let mut listed: Vec<ObjectId> = included.into_iter().collect();
        listed.sort_by_key(|id| std::cmp::Reverse(self.commits[id].seq));
        Ok(listed)
    }

    fn changed_files(&self, commit: &ObjectId) -> Result<BTreeSet<String>, HookError> {
        let node = self.node(commit)?;
        if node.parents.len() > 1 {
            Ok(BTreeSet::new())
        } else {
            Ok(node.files.clone())
        }
    }

    fn commit_exists(&self, id: &ObjectId) -> Result<bool, HookError> {
        Ok(self.commits.contains_key(id))
    }

    fn remote_refs(&self, remote: &str) -> Result<Vec<TrackingRef>, HookError> {
        let prefix = format!("refs/remotes/{remote}/");
        let mut refs: Vec<TrackingRef> = self
            .tracking
            .iter()
            .filter(|r| r.name.starts_with(&prefix))
            .cloned()
            .collect();
        refs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(refs)
    }

    fn staged_files(&self) -> Result<BTreeSet<String>, HookError> {
        Ok(self.staged.clone())
    }
}

/// A real git repository in a temporary directory.
pub struct GitFixture {
    dir: TempDir,
}

impl GitFixture {
    /// Creates an empty repository whose initial branch is `master`.
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fixture.git_cmd(&["init", "-q"]);
        fixture.git_cmd(&["symbolic-ref", "HEAD", "refs/heads/master"]);
        fixture.configure();
        fixture
    }

    fn configure(&self) {
        self.git_cmd(&["config", "user.name", "Hook Tester"]);
        self.git_cmd(&["config", "user.email", "tester@example.com"]);
        self.git_cmd(&["config", "commit.gpgsign", "false"]);
    }

    /// Clones this repository; the clone's `origin` points here.
    pub fn clone_into(&self) -> GitFixture {
        let clone = Self {
            dir: TempDir::new().unwrap(),
        };
        let output = Command::new("git")
            .args(["clone", "-q"])
            .arg(self.path())
            .arg(clone.path())
            .output()
            .expect("failed to run git clone");
        assert!(
            output.status.success(),
            "git clone failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        clone.configure();
        clone
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self) -> GitCli {
        GitCli::new(self.path())
    }

    /// Runs git in the repository, panicking on failure. Returns trimmed stdout.
    pub fn git_cmd(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    /// Commits a new empty file called `filename` with `filename` as the message.
    pub fn commit(&self, filename: &str) -> ObjectId {
        self.write(filename, "");
        self.git_cmd(&["add", filename]);
        self.git_cmd(&["commit", "-q", "-n", "-m", filename]);
        self.head()
    }

    pub fn head(&self) -> ObjectId {
        self.rev("HEAD")
    }

    pub fn rev(&self, spec: &str) -> ObjectId {
        ObjectId::parse(&self.git_cmd(&["rev-parse", spec])).unwrap()
    }
}
