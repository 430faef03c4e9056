//! Single-manifest version sync
//!
//! One run walks `Idle → Reading → (Writing | Failed) → (Done | Failed)`.
//! There are no retries and no rollback: a read failure leaves the file
//! untouched, a write failure is reported as-is.

use crate::core::error::{SyncError, SyncResult};
use crate::sync::manifest::ManifestDocument;
use crate::sync::pattern::VersionPattern;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Lifecycle of one sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
  Idle,
  Reading,
  Writing,
  Done,
  Failed,
}

impl SyncState {
  pub fn is_terminal(self) -> bool {
    matches!(self, SyncState::Done | SyncState::Failed)
  }

  fn can_advance_to(self, next: SyncState) -> bool {
    matches!(
      (self, next),
      (SyncState::Idle, SyncState::Reading)
        | (SyncState::Reading, SyncState::Writing)
        | (SyncState::Reading, SyncState::Done)
        | (SyncState::Reading, SyncState::Failed)
        | (SyncState::Writing, SyncState::Done)
        | (SyncState::Writing, SyncState::Failed)
    )
  }
}

impl fmt::Display for SyncState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      SyncState::Idle => "idle",
      SyncState::Reading => "reading",
      SyncState::Writing => "writing",
      SyncState::Done => "done",
      SyncState::Failed => "failed",
    };
    write!(f, "{}", name)
  }
}

/// What happened to a manifest's version field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncStatus {
  /// The field now holds the requested version
  Updated,
  /// The field already held the requested version
  Unchanged,
  /// No version field was found; content was left as-is
  NoMatch,
}

/// Per-manifest result of a sync run
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
  pub path: PathBuf,
  pub previous_version: Option<String>,
  pub version: String,
  pub status: SyncStatus,
  pub written: bool,
}

/// Options for a sync run
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
  /// Compute the rewrite but never write
  pub dry_run: bool,
  /// Treat a missing version field as an error
  pub strict: bool,
}

/// Rewrites the first version field of a manifest to a given version
pub struct VersionSync<'a> {
  pattern: &'a VersionPattern,
  options: SyncOptions,
  state: SyncState,
}

impl<'a> VersionSync<'a> {
  pub fn new(pattern: &'a VersionPattern, options: SyncOptions) -> Self {
    Self {
      pattern,
      options,
      state: SyncState::Idle,
    }
  }

  pub fn state(&self) -> SyncState {
    self.state
  }

  fn advance(&mut self, next: SyncState) -> SyncResult<()> {
    if !self.state.can_advance_to(next) {
      return Err(SyncError::message(format!(
        "Invalid sync state transition: {} -> {}",
        self.state, next
      )));
    }
    tracing::debug!(from = %self.state, to = %next, "sync state");
    self.state = next;
    Ok(())
  }

  /// Sync `path` to `version`, consuming this run
  pub fn run(mut self, path: &Path, version: &str) -> SyncResult<SyncOutcome> {
    self.advance(SyncState::Reading)?;
    let result = self.execute(path, version);
    self.advance(if result.is_ok() { SyncState::Done } else { SyncState::Failed })?;
    debug_assert!(self.state().is_terminal());
    result
  }

  fn execute(&mut self, path: &Path, version: &str) -> SyncResult<SyncOutcome> {
    let mut doc = ManifestDocument::read(path)?;
    let rewrite = self.pattern.rewrite(doc.content(), version);

    let status = if !rewrite.matched() {
      SyncStatus::NoMatch
    } else if rewrite.previous.as_deref() == Some(version) {
      SyncStatus::Unchanged
    } else {
      SyncStatus::Updated
    };
    tracing::debug!(manifest = %path.display(), span = ?rewrite.span, ?status, "version field");

    if status == SyncStatus::NoMatch {
      if self.options.strict {
        return Err(SyncError::NoMatch {
          path: path.to_path_buf(),
        });
      }
      tracing::warn!(
        manifest = %path.display(),
        "no `version = \"X.Y.Z\"` field found; manifest left unchanged"
      );
    }

    let mut written = false;
    if !self.options.dry_run {
      doc.replace(rewrite.content);
      self.advance(SyncState::Writing)?;
      doc.write()?;
      written = true;
    }

    Ok(SyncOutcome {
      path: doc.path().to_path_buf(),
      previous_version: rewrite.previous,
      version: version.to_string(),
      status,
      written,
    })
  }
}

/// Warn when a version is not a bare MAJOR.MINOR.PATCH; it is still written verbatim
///
/// Anything else (including semver prereleases such as `0.2.0-rc.1`) produces a
/// field the next run cannot match, so that run would rewrite a later field instead.
pub fn check_version_shape(pattern: &VersionPattern, version: &str) {
  if let Err(e) = semver::Version::parse(version) {
    tracing::warn!(version, error = %e, "version is not a valid MAJOR.MINOR.PATCH; writing it as given");
  } else if !pattern.is_rematchable(version) {
    tracing::warn!(
      version,
      "version is not a bare MAJOR.MINOR.PATCH; the field it writes will not be matched by the next run"
    );
  }
}
