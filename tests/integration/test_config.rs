//! Integration tests for version-sync.toml

use crate::helpers::{TestWorkspace, cargo_toml};
use anyhow::Result;

#[test]
fn test_config_syncs_every_listed_manifest() -> Result<()> {
  let ws = TestWorkspace::with_manifest("0.1.0")?;
  ws.write_file("bindings/wasm/Cargo.toml", &cargo_toml("ridb-wasm", "0.1.0"))?;
  ws.write_file(
    "version-sync.toml",
    r#"
[[manifests]]
path = "Cargo.toml"

[[manifests]]
path = "bindings/wasm/Cargo.toml"
"#,
  )?;

  let output = ws.sync(&["0.2.0"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert_eq!(ws.read_file("Cargo.toml")?, cargo_toml("ridb", "0.2.0"));
  assert_eq!(
    ws.read_file("bindings/wasm/Cargo.toml")?,
    cargo_toml("ridb-wasm", "0.2.0")
  );
  assert!(stdout.contains("bindings/wasm/Cargo.toml updated to version 0.2.0"), "got: {}", stdout);
  Ok(())
}

#[test]
fn test_manifest_path_flag_overrides_config() -> Result<()> {
  let ws = TestWorkspace::with_manifest("0.1.0")?;
  ws.write_file("other.toml", "version = \"0.1.0\"\n")?;
  ws.write_file(".version-sync.toml", "[[manifests]]\npath = \"Cargo.toml\"\n")?;

  ws.sync(&["0.2.0", "--manifest-path", "other.toml"])?;

  assert_eq!(ws.read_file("other.toml")?, "version = \"0.2.0\"\n");
  assert_eq!(ws.read_file("Cargo.toml")?, cargo_toml("ridb", "0.1.0"));
  Ok(())
}

#[test]
fn test_strict_from_config() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_file("Cargo.toml", "[package]\nname = \"x\"\n")?;
  ws.write_file(".config/version-sync.toml", "strict = true\n")?;

  let output = ws.sync_raw(&["1.0.0"])?;

  assert_eq!(output.status.code(), Some(3));
  Ok(())
}

#[test]
fn test_invalid_config_is_user_error() -> Result<()> {
  let ws = TestWorkspace::with_manifest("0.1.0")?;
  ws.write_file("version-sync.toml", "manifests = []\n")?;

  let output = ws.sync_raw(&["0.2.0"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("No manifests configured"), "got: {}", stderr);
  assert_eq!(ws.read_file("Cargo.toml")?, cargo_toml("ridb", "0.1.0"));
  Ok(())
}
