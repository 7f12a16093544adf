//! Error types for deploymark with contextual messages and exit codes
//!
//! Every fatal path carries a human-readable explanation and maps to a
//! distinct process exit code so the invoking pipeline can tell a safety
//! abort apart from a git failure.

use std::fmt;
use std::io;

/// Exit codes for deploymark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (invalid args, bad repository path)
  User = 1,
  /// System error (git, network, I/O)
  System = 2,
  /// Validation failure (safety-token mismatch)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for deploymark
#[derive(Debug)]
pub enum MarkError {
  /// Git operation errors
  Git(GitError),

  /// Validation errors (safety token)
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl MarkError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    MarkError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    MarkError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      MarkError::Message { message, context, help } => MarkError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      MarkError::Git(_) => ExitCode::System,
      MarkError::Validation(_) => ExitCode::Validation,
      MarkError::Io(_) => ExitCode::System,
      MarkError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      MarkError::Git(e) => e.help_message(),
      MarkError::Validation(e) => e.help_message(),
      MarkError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for MarkError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MarkError::Git(e) => write!(f, "{}", e),
      MarkError::Validation(e) => write!(f, "{}", e),
      MarkError::Io(e) => write!(f, "I/O error: {}", e),
      MarkError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for MarkError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      MarkError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for MarkError {
  fn from(err: io::Error) -> Self {
    MarkError::Io(err)
  }
}

impl From<String> for MarkError {
  fn from(msg: String) -> Self {
    MarkError::message(msg)
  }
}

impl From<&str> for MarkError {
  fn from(msg: &str) -> Self {
    MarkError::message(msg)
  }
}

impl From<GitError> for MarkError {
  fn from(err: GitError) -> Self {
    MarkError::Git(err)
  }
}

impl From<ValidationError> for MarkError {
  fn from(err: ValidationError) -> Self {
    MarkError::Validation(err)
  }
}

impl From<serde_json::Error> for MarkError {
  fn from(err: serde_json::Error) -> Self {
    MarkError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for MarkError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    MarkError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<std::num::ParseIntError> for MarkError {
  fn from(err: std::num::ParseIntError) -> Self {
    MarkError::message(format!("Parse error: {}", err))
  }
}

// Gix (gitoxide) error types
impl From<gix::discover::Error> for MarkError {
  fn from(err: gix::discover::Error) -> Self {
    MarkError::message(format!("Git repository error: {}", err))
  }
}

impl From<gix::reference::find::Error> for MarkError {
  fn from(err: gix::reference::find::Error) -> Self {
    MarkError::message(format!("Git reference error: {}", err))
  }
}

impl From<gix::reference::find::existing::Error> for MarkError {
  fn from(err: gix::reference::find::existing::Error) -> Self {
    MarkError::message(format!("Git reference error: {}", err))
  }
}

impl From<gix::head::peel::to_commit::Error> for MarkError {
  fn from(err: gix::head::peel::to_commit::Error) -> Self {
    MarkError::message(format!("Git HEAD peel error: {}", err))
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// HEAD does not point at a branch
  DetachedHead,

  /// Local marker move failed
  TagMoveFailed { tag: String, reason: String },

  /// Push failed
  PushFailed { remote: String, tag: String, reason: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("permission denied") || reason.contains("403") {
          Some("Check your SSH key permissions and remote access.".to_string())
        } else if reason.contains("Could not read from remote") || reason.contains("does not appear") {
          Some("Verify the remote name and that you have network access.".to_string())
        } else {
          None
        }
      }
      GitError::DetachedHead => {
        Some("Check out a branch before running deploymark, or pass --repo pointing at a checked-out worktree.".to_string())
      }
      GitError::TagMoveFailed { tag, .. } => Some(format!("Verify that '{}' is a valid tag name.", tag)),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::DetachedHead => {
        write!(f, "Cannot determine the current branch: HEAD is detached")
      }
      GitError::TagMoveFailed { tag, reason } => {
        write!(f, "Failed to move marker '{}': {}", tag, reason)
      }
      GitError::PushFailed { remote, tag, reason } => {
        write!(f, "Failed to push marker '{}' to '{}': {}", tag, remote, reason)
      }
    }
  }
}

/// Validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// The safety token from a prior check does not name the marker being published
  TokenMismatch { requested: String, expected: String },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::TokenMismatch { .. } => Some(
        "Pass the base_tag output of the check stage as --expected-base-tag, and make sure both stages use the same --tag.".to_string(),
      ),
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::TokenMismatch { requested, expected } => {
        write!(
          f,
          "Safety token mismatch: publishing marker '{}' but the check stage observed '{}'",
          requested, expected
        )
      }
    }
  }
}

/// Result type alias for deploymark
pub type MarkResult<T> = Result<T, MarkError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> MarkResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> MarkResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<MarkError>,
{
  fn context(self, ctx: impl Into<String>) -> MarkResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> MarkResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &MarkError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
