//! The divergence report produced by `deploymark check`
//!
//! The report is ephemeral: it exists only as the structured output of a
//! single invocation, consumed by the pipeline that ran it.

use serde::Serialize;

/// Result of comparing HEAD against a deploy marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivergenceReport {
  /// Whether anything changed since the marker (or policy said so)
  pub has_changes: bool,
  /// The marker name that was actually found, empty if none existed
  pub base_tag: String,
  /// Commits reachable from HEAD but not from the marker
  pub ahead: u64,
  /// Branch currently checked out
  pub current_branch: String,
}

impl DivergenceReport {
  /// Render the report as `(name, value)` pairs for pipeline consumption.
  ///
  /// Booleans render as `true`/`false`, the ahead-count as a decimal
  /// integer, so the pairs can be emitted verbatim as `key=value` lines.
  pub fn named_outputs(&self) -> Vec<(&'static str, String)> {
    vec![
      ("has_changes", self.has_changes.to_string()),
      ("base_tag", self.base_tag.clone()),
      ("ahead", self.ahead.to_string()),
      ("current_branch", self.current_branch.clone()),
    ]
  }
}
