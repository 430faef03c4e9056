mod commands;
mod core;
mod sync;

use clap::Parser;
use crate::core::error::{ExitCode, SyncError, SyncResult, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Write a release version into a manifest's `version = "X.Y.Z"` field
#[derive(Parser)]
#[command(name = "version-sync")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Version to write, as computed by the release pipeline (e.g. 1.3.0)
  #[arg(value_name = "VERSION")]
  new_version: String,

  /// Directory that manifest and config paths are resolved against (default: current directory)
  #[arg(long, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Manifest to update, relative to the root; repeatable (default: Cargo.toml or the config file's list)
  #[arg(long = "manifest-path", value_name = "PATH")]
  manifest_paths: Vec<PathBuf>,

  /// Show what would change without writing anything
  #[arg(long)]
  dry_run: bool,

  /// Output results in JSON format
  #[arg(long)]
  json: bool,

  /// Fail (exit code 3) when a manifest has no version field
  #[arg(long)]
  strict: bool,

  /// Log debug diagnostics to stderr
  #[arg(short, long)]
  verbose: bool,
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
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Diagnostics go to stderr so stdout stays clean for `--json`
fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

/// `--root` if given, otherwise the current directory
fn resolve_root(root: Option<PathBuf>) -> SyncResult<PathBuf> {
  match root {
    Some(root) => Ok(root),
    None => Ok(std::env::current_dir()?),
  }
}

fn main() {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    // --help and --version
    Err(e) if !e.use_stderr() => e.exit(),
    Err(e) => {
      let _ = e.print();
      std::process::exit(ExitCode::User.as_i32());
    }
  };
  init_tracing(cli.verbose);

  let root = match resolve_root(cli.root) {
    Ok(root) => root,
    Err(err) => handle_error(err),
  };

  let result = commands::run_sync(
    &root,
    cli.new_version,
    cli.manifest_paths,
    cli.dry_run,
    cli.json,
    cli.strict,
  );

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: SyncError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
