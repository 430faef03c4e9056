//! Error types for version-sync with contextual messages and exit codes
//!
//! Every failure the tool can hit maps to one `SyncError` variant, and every
//! variant maps to a process exit code. `main` is the only place that turns an
//! error into output and an exit status.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for version-sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args)
  User = 1,
  /// System error (manifest read/write, I/O)
  System = 2,
  /// Validation failure (no version field under --strict)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for version-sync
#[derive(Debug)]
pub enum SyncError {
  /// The manifest could not be opened or read
  Read { path: PathBuf, source: io::Error },

  /// The rewritten manifest could not be written back
  Write { path: PathBuf, source: io::Error },

  /// No `version = "X.Y.Z"` field was found and strict mode is on
  NoMatch { path: PathBuf },

  /// Configuration errors
  Config(ConfigError),

  /// Other I/O errors (e.g. the current directory cannot be resolved)
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl SyncError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    SyncError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      SyncError::Message { message, context, help } => SyncError::Message {
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
      SyncError::Read { .. } => ExitCode::System,
      SyncError::Write { .. } => ExitCode::System,
      SyncError::NoMatch { .. } => ExitCode::Validation,
      SyncError::Config(_) => ExitCode::User,
      SyncError::Io(_) => ExitCode::System,
      SyncError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      SyncError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound => {
        Some("Check the path, or point at the manifest with --manifest-path.".to_string())
      }
      SyncError::Read { source, .. } | SyncError::Write { source, .. }
        if source.kind() == io::ErrorKind::PermissionDenied =>
      {
        Some("Check the file permissions of the manifest.".to_string())
      }
      SyncError::NoMatch { .. } => Some(
        "The manifest must declare its version as `version = \"MAJOR.MINOR.PATCH\"`. Drop --strict to allow this."
          .to_string(),
      ),
      SyncError::Config(e) => e.help_message(),
      SyncError::Io(_) => {
        Some("If the current directory is unavailable, pass --root to choose one explicitly.".to_string())
      }
      SyncError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for SyncError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SyncError::Read { path, source } => write!(f, "Error reading {}: {}", path.display(), source),
      SyncError::Write { path, source } => write!(f, "Error writing {}: {}", path.display(), source),
      SyncError::NoMatch { path } => {
        write!(f, "No `version = \"X.Y.Z\"` field found in {}", path.display())
      }
      SyncError::Config(e) => write!(f, "{}", e),
      SyncError::Io(e) => write!(f, "I/O error: {}", e),
      SyncError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for SyncError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SyncError::Read { source, .. } | SyncError::Write { source, .. } => Some(source),
      SyncError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for SyncError {
  fn from(err: io::Error) -> Self {
    SyncError::Io(err)
  }
}

impl From<ConfigError> for SyncError {
  fn from(err: ConfigError) -> Self {
    SyncError::Config(err)
  }
}

impl From<toml_edit::de::Error> for SyncError {
  fn from(err: toml_edit::de::Error) -> Self {
    SyncError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for SyncError {
  fn from(err: serde_json::Error) -> Self {
    SyncError::message(format!("JSON error: {}", err))
  }
}

impl From<regex::Error> for SyncError {
  fn from(err: regex::Error) -> Self {
    SyncError::message(format!("Pattern error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A `[[manifests]]` entry has an empty path
  EmptyPath { index: usize },

  /// The same manifest is listed twice
  DuplicatePath { path: PathBuf },

  /// `manifests = []` was given explicitly
  NoManifests { config_path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NoManifests { .. } => Some(
        "Add at least one [[manifests]] entry, or remove the key to default to Cargo.toml.".to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::EmptyPath { index } => {
        write!(f, "Manifest entry #{} has an empty path", index + 1)
      }
      ConfigError::DuplicatePath { path } => {
        write!(f, "Manifest '{}' is listed more than once", path.display())
      }
      ConfigError::NoManifests { config_path } => {
        write!(f, "No manifests configured in {}", config_path.display())
      }
    }
  }
}

/// Result type alias for version-sync
pub type SyncResult<T> = Result<T, SyncError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> SyncResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> SyncResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<SyncError>,
{
  fn context(self, ctx: impl Into<String>) -> SyncResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> SyncResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &SyncError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
