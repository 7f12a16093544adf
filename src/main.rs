mod commands;
mod core;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{DEFAULT_REMOTE, DEFAULT_TAG};
use crate::core::error::{MarkResult, print_error};

/// Deploy-marker tooling for CI pipelines
#[derive(Parser)]
#[command(name = "deploymark")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Report how far HEAD has diverged from a deploy marker
  Check {
    /// Marker (tag) name to compare against
    #[arg(long, default_value = DEFAULT_TAG)]
    tag: String,
    /// Whether a missing marker counts as "everything is new"
    #[arg(long, value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    initial_as_changes: bool,
    /// Output the report as JSON (useful for CI/automation)
    #[arg(long)]
    json: bool,
    /// Repository path (discovered from the current directory by default)
    #[arg(long)]
    repo: Option<PathBuf>,
  },
  /// Move a deploy marker to HEAD and force-push it to a remote
  Publish {
    /// Marker (tag) name to relocate
    #[arg(long, default_value = DEFAULT_TAG)]
    tag: String,
    /// Remote to publish the marker to
    #[arg(long, default_value = DEFAULT_REMOTE)]
    remote: String,
    /// Marker name observed by a prior check; must equal --tag when set
    #[arg(long)]
    expected_base_tag: Option<String>,
    /// Repository path (discovered from the current directory by default)
    #[arg(long)]
    repo: Option<PathBuf>,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn run(cli: Cli) -> MarkResult<()> {
  match cli.command {
    Commands::Check {
      tag,
      initial_as_changes,
      json,
      repo,
    } => commands::run_check(repo, &tag, initial_as_changes, json),
    Commands::Publish {
      tag,
      remote,
      expected_base_tag,
      repo,
    } => commands::run_publish(repo, &tag, &remote, expected_base_tag.as_deref()),
  }
}

fn main() {
  let cli = Cli::parse();

  if let Err(err) = run(cli) {
    print_error(&err);
    std::process::exit(err.exit_code().as_i32());
  }
}
