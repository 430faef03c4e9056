//! Sync command implementation
//!
//! Resolves which manifests to touch, runs `VersionSync` on each in order and
//! prints the outcome. The first failure stops the run; manifests already
//! written stay written.

use crate::core::config::SyncConfig;
use crate::core::error::{SyncError, SyncResult};
use crate::sync::{SyncOptions, SyncOutcome, SyncStatus, VersionPattern, VersionSync, check_version_shape};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything printed by `--json`
#[derive(Debug, Serialize)]
pub struct SyncReport {
  pub version: String,
  pub dry_run: bool,
  pub manifests: Vec<SyncOutcome>,
  /// Set when a manifest failed; `manifests` then lists only those handled before it
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// Run the sync command
pub fn run_sync(
  root: &Path,
  version: String,
  manifest_paths: Vec<PathBuf>,
  dry_run: bool,
  json: bool,
  strict: bool,
) -> SyncResult<()> {
  let config = SyncConfig::load(root)?;
  let targets = config.manifest_paths(root, &manifest_paths);
  let options = SyncOptions {
    dry_run,
    strict: strict || config.strict,
  };
  tracing::debug!(?targets, ?options, "resolved manifests");

  let pattern = VersionPattern::new()?;
  check_version_shape(&pattern, &version);

  let mut outcomes = Vec::with_capacity(targets.len());
  let mut failure: Option<SyncError> = None;
  for target in &targets {
    match VersionSync::new(&pattern, options).run(target, &version) {
      Ok(outcome) => {
        if !json {
          print_outcome(root, &outcome);
        }
        outcomes.push(outcome);
      }
      Err(err) => {
        failure = Some(err);
        break;
      }
    }
  }

  if json {
    let report = SyncReport {
      version,
      dry_run,
      manifests: outcomes,
      error: failure.as_ref().map(|e| e.to_string()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else if dry_run && failure.is_none() {
    println!();
    println!("🔍 Dry-run mode (no changes applied)");
  }

  if let Some(err) = failure {
    return Err(err);
  }

  Ok(())
}

fn print_outcome(root: &Path, outcome: &SyncOutcome) {
  let name = display_path(root, &outcome.path);

  match (outcome.status, outcome.written) {
    (SyncStatus::Updated, true) => {
      println!("✅ {} updated to version {}", name, outcome.version);
      if let Some(previous) = &outcome.previous_version {
        println!("   was {}", previous);
      }
    }
    (SyncStatus::Updated, false) => {
      println!(
        "   {}: {} → {}",
        name,
        outcome.previous_version.as_deref().unwrap_or("?"),
        outcome.version
      );
    }
    (SyncStatus::Unchanged, _) => {
      println!("✅ {} already at version {}", name, outcome.version);
    }
    (SyncStatus::NoMatch, _) => {
      println!("⚠️  No version field in {}; not updated to {}", name, outcome.version);
    }
  }
}

/// Path relative to the workspace root when possible
fn display_path(root: &Path, path: &Path) -> String {
  path.strip_prefix(root).unwrap_or(path).display().to_string()
}
