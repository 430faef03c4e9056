//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch directory standing in for a repository root
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create an empty workspace
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Create a workspace with a root Cargo.toml at `version`
  pub fn with_manifest(version: &str) -> Result<Self> {
    let ws = Self::new()?;
    ws.write_file("Cargo.toml", &cargo_toml("ridb", version))?;
    Ok(ws)
  }

  /// Write a file, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Run version-sync in this workspace, failing on a non-zero exit
  pub fn sync(&self, args: &[&str]) -> Result<Output> {
    let output = self.sync_raw(args)?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      let stdout = String::from_utf8_lossy(&output.stdout);
      anyhow::bail!(
        "version-sync failed: version-sync {}\nstdout: {}\nstderr: {}",
        args.join(" "),
        stdout,
        stderr
      );
    }

    Ok(output)
  }

  /// Run version-sync in this workspace and return the output whatever the exit status
  pub fn sync_raw(&self, args: &[&str]) -> Result<Output> {
    let bin = env!("CARGO_BIN_EXE_version-sync");

    Command::new(bin)
      .current_dir(&self.path)
      .args(args)
      .env_remove("RUST_LOG")
      .output()
      .context("Failed to run version-sync")
  }
}

/// A minimal package manifest
pub fn cargo_toml(name: &str, version: &str) -> String {
  format!(
    r#"[package]
name = "{}"
version = "{}"
edition = "2021"

[dependencies]
serde = {{ version = "1.0.228", features = ["derive"] }}
"#,
    name, version
  )
}
