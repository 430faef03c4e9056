use crate::core::error::{ConfigError, ResultExt, SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Manifest synced when neither the config nor the CLI names one
pub const DEFAULT_MANIFEST: &str = "Cargo.toml";

/// Configuration for version-sync
/// Searched in order: version-sync.toml, .version-sync.toml, .cargo/version-sync.toml, .config/version-sync.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
  /// Fail when a manifest has no version field instead of warning
  #[serde(default)]
  pub strict: bool,

  /// Manifests to sync, in order. `None` means the key was absent.
  #[serde(default)]
  pub manifests: Option<Vec<ManifestConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
  /// Path relative to the workspace root
  pub path: PathBuf,
}

impl SyncConfig {
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("version-sync.toml"),
      path.join(".version-sync.toml"),
      path.join(".cargo").join("version-sync.toml"),
      path.join(".config").join("version-sync.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the workspace root, falling back to defaults when no file exists
  pub fn load(path: &Path) -> SyncResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no version-sync config found, using defaults");
      return Ok(Self::default());
    };
    tracing::debug!(config = %config_path.display(), "loading version-sync config");

    let content = fs::read_to_string(&config_path).map_err(|e| {
      SyncError::message(format!("Failed to read config from {}: {}", config_path.display(), e))
    })?;
    let config: SyncConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate(&config_path)?;

    Ok(config)
  }

  /// Validate manifest entries
  pub fn validate(&self, config_path: &Path) -> SyncResult<()> {
    let Some(manifests) = &self.manifests else {
      return Ok(());
    };

    if manifests.is_empty() {
      return Err(
        ConfigError::NoManifests {
          config_path: config_path.to_path_buf(),
        }
        .into(),
      );
    }

    let mut seen = HashSet::new();
    for (index, manifest) in manifests.iter().enumerate() {
      if manifest.path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyPath { index }.into());
      }
      if !seen.insert(normalize(&manifest.path)) {
        return Err(
          ConfigError::DuplicatePath {
            path: manifest.path.clone(),
          }
          .into(),
        );
      }
    }

    Ok(())
  }

  /// Manifest paths to sync, resolved against `root`
  ///
  /// `overrides` (from `--manifest-path`) replace the configured list when non-empty.
  pub fn manifest_paths(&self, root: &Path, overrides: &[PathBuf]) -> Vec<PathBuf> {
    if !overrides.is_empty() {
      return overrides.iter().map(|p| root.join(p)).collect();
    }

    match &self.manifests {
      Some(manifests) => manifests.iter().map(|m| root.join(&m.path)).collect(),
      None => vec![root.join(DEFAULT_MANIFEST)],
    }
  }
}

/// Drop `.` components so `./Cargo.toml` and `Cargo.toml` compare equal
fn normalize(path: &Path) -> PathBuf {
  path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}
