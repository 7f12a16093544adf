pub mod git;

use crate::core::error::MarkResult;
use std::path::Path;

/// VCS abstraction trait for swappable version control backends
pub trait Vcs {
  /// Discover a repository from the given path
  fn discover(path: &Path) -> MarkResult<Self>
  where
    Self: Sized;

  /// Get the current HEAD commit SHA
  fn head_commit(&self) -> MarkResult<String>;

  /// Get the name of the currently checked-out branch
  fn current_branch(&self) -> MarkResult<String>;
}
