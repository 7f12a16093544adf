//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A test repository with git history and an optional bare "remote"
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
  _remote: Option<TempDir>,
  pub remote_path: Option<PathBuf>,
}

impl TestRepo {
  /// Create a new repository with a single initial commit on `main`
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(path.join("README.md"), "# test repo\n")?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial commit"])?;

    Ok(Self {
      _root: root,
      path,
      _remote: None,
      remote_path: None,
    })
  }

  /// Create a repository wired to a bare remote named `origin`
  pub fn with_remote() -> Result<Self> {
    let mut repo = Self::new()?;

    let remote = TempDir::new()?;
    let remote_path = remote.path().to_path_buf();
    git(&remote_path, &["init", "--bare"])?;
    git(
      &repo.path,
      &["remote", "add", "origin", remote_path.to_str().context("non-UTF-8 temp path")?],
    )?;

    repo._remote = Some(remote);
    repo.remote_path = Some(remote_path);
    Ok(repo)
  }

  /// Write a file and commit it, returning the new commit SHA
  pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Result<String> {
    std::fs::write(self.path.join(name), content)?;
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    self.head_sha()
  }

  /// Get the current HEAD commit SHA
  pub fn head_sha(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Create a lightweight tag at HEAD
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", name])?;
    Ok(())
  }

  /// Resolve a local tag to its commit SHA, or None if it does not exist
  pub fn tag_target(&self, name: &str) -> Option<String> {
    resolve_tag(&self.path, name)
  }

  /// Resolve a tag in the bare remote, or None if it does not exist
  pub fn remote_tag_target(&self, name: &str) -> Option<String> {
    resolve_tag(self.remote_path.as_ref().expect("repo has no remote"), name)
  }
}

fn resolve_tag(repo: &Path, name: &str) -> Option<String> {
  let output = Command::new("git")
    .current_dir(repo)
    .args(["rev-parse", "--verify", &format!("refs/tags/{}^{{commit}}", name)])
    .output()
    .ok()?;

  if output.status.success() {
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
  } else {
    None
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run deploymark, bailing out if it exits non-zero
pub fn run_deploymark(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = try_deploymark(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "deploymark command failed: deploymark {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run deploymark, returning the raw output whatever the exit status
pub fn try_deploymark(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_deploymark");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run deploymark")
}

/// Parse `key=value` output lines into a map
pub fn parse_outputs(stdout: &[u8]) -> HashMap<String, String> {
  String::from_utf8_lossy(stdout)
    .lines()
    .filter_map(|line| {
      line
        .split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
    })
    .collect()
}
