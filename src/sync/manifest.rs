use crate::core::error::{SyncError, SyncResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Full contents of a manifest file, read once and written back whole
#[derive(Debug, Clone)]
pub struct ManifestDocument {
  path: PathBuf,
  content: Vec<u8>,
}

impl ManifestDocument {
  /// Read the whole manifest into memory
  pub fn read(path: &Path) -> SyncResult<Self> {
    let content = fs::read(path).map_err(|source| SyncError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    Ok(Self {
      path: path.to_path_buf(),
      content,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn content(&self) -> &[u8] {
    &self.content
  }

  /// Replace the in-memory contents
  pub fn replace(&mut self, content: Vec<u8>) {
    self.content = content;
  }

  /// Write the full buffer back to the path it was read from, replacing prior content
  pub fn write(&self) -> SyncResult<()> {
    fs::write(&self.path, &self.content).map_err(|source| SyncError::Write {
      path: self.path.clone(),
      source,
    })
  }
}
