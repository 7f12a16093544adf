//! Marker publish: move a deploy marker to HEAD and force-push it
//!
//! The optional safety token guards against checking one marker name and
//! publishing another in the same pipeline run. It is typo protection, not
//! transactional isolation: a concurrent writer who moved a correctly-named
//! marker between check and publish is overwritten, last push wins.

use std::env;
use std::path::PathBuf;

use crate::core::error::{MarkResult, ResultExt, ValidationError};
use crate::core::vcs::Vcs;
use crate::core::vcs::git::GitBackend;

/// Run the publish command: token check, local force-move, force-push.
/// No internal retries; retry policy belongs to the invoking pipeline.
pub fn run_publish(repo: Option<PathBuf>, tag: &str, remote: &str, expected_base_tag: Option<&str>) -> MarkResult<()> {
  check_safety_token(tag, expected_base_tag)?;

  let path = match repo {
    Some(p) => p,
    None => env::current_dir().context("Failed to determine the working directory")?,
  };
  let git = GitBackend::discover(&path)?;
  let head = git.head_commit()?;

  eprintln!("🏷️  Moving marker '{}' to {}", tag, &head[..7.min(head.len())]);
  git.force_move_tag(tag, &head)?;

  eprintln!("📤 Pushing marker '{}' to '{}'", tag, remote);
  git.force_push_tag(remote, tag)?;

  eprintln!("✅ Published marker '{}' at {} to '{}'", tag, &head[..7.min(head.len())], remote);
  Ok(())
}

/// Abort before any mutation if the token from a prior check names a
/// different marker than the one about to be published.
fn check_safety_token(tag: &str, expected_base_tag: Option<&str>) -> MarkResult<()> {
  match expected_base_tag {
    Some(expected) if !expected.is_empty() && expected != tag => Err(
      ValidationError::TokenMismatch {
        requested: tag.to_string(),
        expected: expected.to_string(),
      }
      .into(),
    ),
    _ => Ok(()),
  }
}
