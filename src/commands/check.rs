//! Rollup check: report how far HEAD has diverged from a deploy marker
//!
//! Structured outputs go to stdout (`key=value` lines, or JSON with
//! `--json`); everything human-oriented goes to stderr so a pipeline can
//! consume stdout verbatim.

use std::env;
use std::path::PathBuf;

use crate::core::error::{MarkResult, ResultExt};
use crate::core::report::DivergenceReport;
use crate::core::suggest::suggest_similar;
use crate::core::vcs::Vcs;
use crate::core::vcs::git::GitBackend;

/// Edit-distance threshold for near-miss marker suggestions
const SUGGESTION_DISTANCE: usize = 2;

/// Run the check command and emit a divergence report
pub fn run_check(repo: Option<PathBuf>, tag: &str, initial_as_changes: bool, json: bool) -> MarkResult<()> {
  let path = match repo {
    Some(p) => p,
    None => env::current_dir().context("Failed to determine the working directory")?,
  };
  let git = GitBackend::discover(&path)?;
  let current_branch = git.current_branch()?;

  let report = match git.resolve_marker(tag)? {
    Some(marker_sha) => {
      let ahead = git.ahead_count(&marker_sha)?;
      eprintln!(
        "🔎 Marker '{}' is at {}; HEAD on '{}' is {} commit(s) ahead",
        tag,
        &marker_sha[..7.min(marker_sha.len())],
        current_branch,
        ahead
      );

      DivergenceReport {
        has_changes: ahead > 0,
        base_tag: tag.to_string(),
        ahead,
        current_branch,
      }
    }
    None => {
      // Absence is a handled case, not an error: either everything counts
      // as new, or nothing does, per the policy flag.
      eprintln!("🔎 No marker named '{}' exists yet", tag);
      print_suggestions(&git, tag);

      DivergenceReport {
        has_changes: initial_as_changes,
        base_tag: String::new(),
        ahead: 0,
        current_branch,
      }
    }
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    for (name, value) in report.named_outputs() {
      println!("{}={}", name, value);
    }
  }

  Ok(())
}

/// Best-effort typo diagnostics; never affects the result or exit status.
fn print_suggestions(git: &GitBackend, tag: &str) {
  let Ok(tags) = git.list_tags() else {
    return;
  };

  for candidate in suggest_similar(tag, &tags, SUGGESTION_DISTANCE) {
    eprintln!("💡 Did you mean '{}'?", candidate);
  }
}
