//! Local git repository operations
//!
//! This module provides a wrapper around git2 for the repository state the
//! generators need:
//! - Repository discovery and validation
//! - Staged, unstaged, branch (three-dot) and single-commit diffs
//! - Default/current branch detection
//! - Staging, committing, branch creation and pushing
//! - Remote URL lookup

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{
    BranchType, Commit, Diff, DiffFormat, DiffOptions, ErrorCode, IndexAddOption, Oid,
    Repository, Tree,
};
use tracing::debug;

use crate::error::{AigitError, Result};

/// Name of the remote aigit pushes to and reads metadata from
const ORIGIN: &str = "origin";

/// Branch assumed when nothing else identifies the default branch
const FALLBACK_DEFAULT_BRANCH: &str = "main";

/// Length of the abbreviated commit hash reported after committing
const SHORT_HASH_LEN: usize = 7;

/// Wrapper for local git repository operations
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the git repository in the current directory
    pub fn open_current_dir() -> Result<Self> {
        Self::discover(".")
    }

    /// Discover a git repository from the given path
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| AigitError::NotGitRepository)?;
        Ok(Self { repo })
    }

    /// Get the repository root directory
    pub fn root_dir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(|p| p.to_path_buf())
            .ok_or(AigitError::NotGitRepository)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Diffs
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the diff of staged changes (index vs HEAD)
    pub fn staged_diff(&self) -> Result<String> {
        let diff = self.staged_changes()?;
        diff_to_text(&diff)
    }

    /// Get the diff of unstaged changes (working tree vs index)
    pub fn unstaged_diff(&self) -> Result<String> {
        let diff = self.unstaged_changes()?;
        diff_to_text(&diff)
    }

    /// Get the diff of `base...HEAD`
    ///
    /// Only changes introduced on the current branch since it diverged from
    /// `base` are included; commits made on `base` afterwards are not.
    pub fn branch_diff(&self, base: &str) -> Result<String> {
        let diff = self.three_dot_diff(base)?;
        diff_to_text(&diff)
    }

    /// Get the patch of a single commit against its first parent
    pub fn commit_diff(&self, rev: &str) -> Result<String> {
        let commit = self.resolve_commit(rev)?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };
        let tree = commit.tree()?;

        let diff = self.repo.diff_tree_to_tree(
            parent_tree.as_ref(),
            Some(&tree),
            Some(&mut DiffOptions::new()),
        )?;

        diff_to_text(&diff)
    }

    /// List files changed in `base...HEAD`
    ///
    /// This only backs optional prompt context, so failures degrade to an
    /// empty list. Use [`GitRepository::try_changed_files`] to see the error.
    pub fn changed_files(&self, base: &str) -> Vec<String> {
        self.try_changed_files(base).unwrap_or_else(|e| {
            debug!("Could not list changed files against {}: {}", base, e);
            Vec::new()
        })
    }

    /// List files changed in `base...HEAD`, surfacing failures
    pub fn try_changed_files(&self, base: &str) -> Result<Vec<String>> {
        let diff = self.three_dot_diff(base)?;
        Ok(delta_paths(&diff))
    }

    /// List staged files
    pub fn staged_files(&self) -> Result<Vec<String>> {
        let diff = self.staged_changes()?;
        Ok(delta_paths(&diff))
    }

    /// Check if there are staged changes
    pub fn has_staged_changes(&self) -> Result<bool> {
        Ok(self.staged_changes()?.deltas().len() > 0)
    }

    /// Check if there are unstaged changes to tracked files
    pub fn has_unstaged_changes(&self) -> Result<bool> {
        Ok(self.unstaged_changes()?.deltas().len() > 0)
    }

    fn staged_changes(&self) -> Result<Diff<'_>> {
        let head = self.head_tree()?;
        // Pick up writes made by the git CLI
        let mut index = self.repo.index()?;
        index.read(false)?;

        let diff = self.repo.diff_tree_to_index(
            head.as_ref(),
            Some(&index),
            Some(&mut DiffOptions::new()),
        )?;
        Ok(diff)
    }

    fn unstaged_changes(&self) -> Result<Diff<'_>> {
        let diff = self
            .repo
            .diff_index_to_workdir(None, Some(&mut DiffOptions::new()))?;
        Ok(diff)
    }

    fn three_dot_diff(&self, base: &str) -> Result<Diff<'_>> {
        let base_commit = self.resolve_commit(base)?;
        let head_commit = self.repo.head()?.peel_to_commit()?;

        let merge_base = self.repo.merge_base(base_commit.id(), head_commit.id())?;
        let base_tree = self.repo.find_commit(merge_base)?.tree()?;
        let head_tree = head_commit.tree()?;

        let diff = self.repo.diff_tree_to_tree(
            Some(&base_tree),
            Some(&head_tree),
            Some(&mut DiffOptions::new()),
        )?;
        Ok(diff)
    }

    /// Tree of HEAD, `None` before the first commit
    fn head_tree(&self) -> Result<Option<Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a revision to a commit, falling back to the origin branch
    fn resolve_commit(&self, rev: &str) -> Result<Commit<'_>> {
        let obj = self
            .repo
            .revparse_single(rev)
            .or_else(|_| {
                self.repo
                    .revparse_single(&format!("refs/remotes/{}/{}", ORIGIN, rev))
            })
            .map_err(|_| AigitError::RevisionNotFound(rev.to_string()))?;

        obj.peel_to_commit()
            .map_err(|_| AigitError::RevisionNotFound(rev.to_string()))
    }

    /// Check whether `rev` names a commit (or something peeling to one)
    pub fn is_commit(&self, rev: &str) -> bool {
        self.repo
            .revparse_single(rev)
            .and_then(|obj| obj.peel_to_commit())
            .is_ok()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Branches
    // ─────────────────────────────────────────────────────────────────────────

    /// Detect the default branch
    ///
    /// Resolution order: the remote's recorded default head, then a `main`
    /// branch (local or on origin), then `master`, then `"main"`.
    pub fn default_branch(&self) -> String {
        if let Some(name) = self.remote_default_branch() {
            return name;
        }

        for candidate in ["main", "master"] {
            if self.branch_exists(candidate) {
                return candidate.to_string();
            }
        }

        FALLBACK_DEFAULT_BRANCH.to_string()
    }

    fn remote_default_branch(&self) -> Option<String> {
        let reference = self
            .repo
            .find_reference(&format!("refs/remotes/{}/HEAD", ORIGIN))
            .ok()?;
        let target = reference.symbolic_target()?;
        target
            .strip_prefix(&format!("refs/remotes/{}/", ORIGIN))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    fn branch_exists(&self, name: &str) -> bool {
        self.repo.find_branch(name, BranchType::Local).is_ok()
            || self
                .repo
                .find_reference(&format!("refs/remotes/{}/{}", ORIGIN, name))
                .is_ok()
    }

    /// Get the current branch name
    ///
    /// Before the first commit this is the branch HEAD points to. A detached
    /// HEAD is an error.
    pub fn current_branch(&self) -> Result<String> {
        match self.repo.head() {
            Ok(head) => {
                if head.is_branch() {
                    head.shorthand()
                        .map(str::to_string)
                        .ok_or(AigitError::NotOnBranch)
                } else {
                    Err(AigitError::NotOnBranch)
                }
            }
            Err(e) if is_unborn(&e) => {
                let head = self.repo.find_reference("HEAD")?;
                head.symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string)
                    .ok_or(AigitError::NotOnBranch)
            }
            Err(e) => Err(e.into()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutating operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Stage all changes, including deletions (`git add -A`)
    pub fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.read(false)?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        debug!("Staged all changes");
        Ok(())
    }

    /// Create a commit with the staged changes, returning the short hash
    ///
    /// Goes through `git commit` so hooks and commit signing apply; a hook
    /// rejection surfaces as [`AigitError::GitCommand`].
    pub fn commit(&self, message: &str) -> Result<String> {
        let message = git2::message_prettify(message, None)?;
        if message.trim().is_empty() {
            return Err(AigitError::InvalidInput(
                "Aborting commit due to empty commit message.".to_string(),
            ));
        }

        self.run_git(&["commit", "--quiet", "-m", &message], "Commit")?;

        let commit_id = self.repo.head()?.peel_to_commit()?.id();
        debug!("Created commit {}", commit_id);
        Ok(short_hash(commit_id))
    }

    /// Create a new branch from HEAD, optionally switching to it
    pub fn create_branch(&self, name: &str, checkout: bool) -> Result<()> {
        if checkout {
            self.run_git(&["checkout", "-b", name], "Branch creation")
        } else {
            self.run_git(&["branch", name], "Branch creation")
        }
    }

    /// Push the current branch to origin using system git
    pub fn push(&self, set_upstream: bool) -> Result<()> {
        let branch = self.current_branch()?;

        let mut args = vec!["push"];
        if set_upstream {
            args.push("-u");
        }
        args.push(ORIGIN);
        args.push(&branch);

        self.run_git(&args, "Push")
    }

    /// Run system git in the work dir
    fn run_git(&self, args: &[&str], action: &str) -> Result<()> {
        debug!("Running git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(self.root_dir()?)
            .output()
            .map_err(|e| {
                AigitError::GitCommand(format!("Failed to execute git {}: {}", args[0], e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = [stderr.trim(), stdout.trim()]
                .into_iter()
                .find(|text| !text.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("git {} exited with {}", args[0], output.status));
            return Err(AigitError::GitCommand(format!("{} failed: {}", action, detail)));
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Remotes
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the origin remote URL, if any
    pub fn remote_url(&self) -> Option<String> {
        let remote = self.repo.find_remote(ORIGIN).ok()?;
        remote.url().map(str::to_string)
    }
}

fn is_unborn(err: &git2::Error) -> bool {
    matches!(err.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

fn short_hash(oid: Oid) -> String {
    let full = oid.to_string();
    full[..SHORT_HASH_LEN.min(full.len())].to_string()
}

/// Render a diff as unified patch text
fn diff_to_text(diff: &Diff<'_>) -> Result<String> {
    let mut diff_text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if matches!(line.origin(), '+' | '-' | ' ') {
            diff_text.push(line.origin());
        }
        diff_text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(diff_text)
}

/// Paths touched by a diff, in diff order
fn delta_paths(diff: &Diff<'_>) -> Vec<String> {
    diff.deltas()
        .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}
