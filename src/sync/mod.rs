//! Manifest version synchronization
//!
//! The release pipeline picks the next version; this module writes it into a
//! manifest's `version = "X.Y.Z"` field and nothing else.
//!
//! - **pattern**: finds the first version field and splices in the new value
//! - **manifest**: reads a manifest once and writes it back whole
//! - **engine**: drives a single run and reports its outcome

pub mod engine;
pub mod manifest;
pub mod pattern;

pub use engine::{SyncOptions, SyncOutcome, SyncStatus, VersionSync, check_version_shape};
pub use pattern::VersionPattern;
