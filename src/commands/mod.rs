//! CLI commands for version-sync
//!
//! - **sync**: write a release version into one or more manifests

pub mod sync;

pub use sync::run_sync;
