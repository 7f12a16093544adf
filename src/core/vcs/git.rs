use super::Vcs;
use crate::core::error::{GitError, MarkError, MarkResult, ResultExt};
use gix::Repository;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Git implementation using gix (gitoxide) for repository reads and the
/// system `git` for plumbing without a cheap gix equivalent (rev-list
/// counting, tag moves, pushes).
pub struct GitBackend {
  repo: Repository,
  root: PathBuf,
}

impl Vcs for GitBackend {
  fn discover(path: &Path) -> MarkResult<Self> {
    let repo = gix::discover(path).map_err(|e| {
      MarkError::with_help(
        format!("Failed to open git repository at {}: {}", path.display(), e),
        "Run deploymark inside a git checkout, or pass --repo pointing at one.",
      )
    })?;
    let root = repo
      .workdir()
      .ok_or_else(|| MarkError::message("Repository has no working directory"))?
      .to_path_buf();

    Ok(Self { repo, root })
  }

  fn head_commit(&self) -> MarkResult<String> {
    let mut head = self.repo.head()?;
    let commit = head.peel_to_commit()?;
    Ok(commit.id().to_string())
  }

  fn current_branch(&self) -> MarkResult<String> {
    let name = self
      .repo
      .head_name()?
      .ok_or(MarkError::Git(GitError::DetachedHead))?;
    Ok(name.shorten().to_string())
  }
}

// Marker (tag) operations
impl GitBackend {
  /// Resolve a marker name to the commit SHA it points to.
  ///
  /// Returns `Ok(None)` when no such marker exists; that case is expected
  /// and must stay distinguishable from actual backend failures.
  pub fn resolve_marker(&self, tag: &str) -> MarkResult<Option<String>> {
    let ref_name = format!("refs/tags/{}", tag);
    match self.repo.try_find_reference(ref_name.as_str())? {
      Some(mut reference) => {
        // Annotated tags peel through the tag object to the commit
        let id = reference
          .peel_to_id_in_place()
          .map_err(|e| MarkError::message(format!("Failed to resolve marker '{}': {}", tag, e)))?;
        Ok(Some(id.to_string()))
      }
      None => Ok(None),
    }
  }

  /// Count commits reachable from HEAD but not from `base_sha`.
  pub fn ahead_count(&self, base_sha: &str) -> MarkResult<u64> {
    let range = format!("{}..HEAD", base_sha);
    let output = self.run_git(&["rev-list", "--count", &range])?;

    if !output.status.success() {
      return Err(
        GitError::CommandFailed {
          command: format!("git rev-list --count {}", range),
          stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
        .into(),
      );
    }

    let stdout = String::from_utf8(output.stdout)?;
    stdout
      .trim()
      .parse::<u64>()
      .with_context(|| format!("Unexpected rev-list output: {:?}", stdout.trim()))
  }

  /// List all tag names in the repository
  pub fn list_tags(&self) -> MarkResult<Vec<String>> {
    let output = self.run_git(&["tag", "--list"])?;

    if !output.status.success() {
      return Err(
        GitError::CommandFailed {
          command: "git tag --list".to_string(),
          stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
        .into(),
      );
    }

    let stdout = String::from_utf8(output.stdout)?;
    Ok(stdout.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
  }

  /// Force-create or force-move a marker to the given commit.
  /// Last writer wins; any prior target is overwritten.
  pub fn force_move_tag(&self, tag: &str, sha: &str) -> MarkResult<()> {
    let output = self.run_git(&["tag", "--force", tag, sha])?;

    if !output.status.success() {
      return Err(
        GitError::TagMoveFailed {
          tag: tag.to_string(),
          reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into(),
      );
    }

    Ok(())
  }

  /// Force-push a marker to a remote, overwriting whatever the remote has.
  /// The remote is the source of truth afterward.
  pub fn force_push_tag(&self, remote: &str, tag: &str) -> MarkResult<()> {
    let refspec = format!("refs/tags/{}", tag);
    let output = self.run_git(&["push", "--force", remote, &refspec])?;

    if !output.status.success() {
      return Err(
        GitError::PushFailed {
          remote: remote.to_string(),
          tag: tag.to_string(),
          reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into(),
      );
    }

    Ok(())
  }

  fn run_git(&self, args: &[&str]) -> MarkResult<Output> {
    Command::new("git")
      .current_dir(&self.root)
      .args(args)
      .output()
      .map_err(|e| MarkError::message(format!("Failed to execute git {}: {}", args.join(" "), e)))
  }
}
