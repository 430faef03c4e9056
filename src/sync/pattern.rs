//! Version field matching and replacement
//!
//! A manifest declares its version as `version = "MAJOR.MINOR.PATCH"`. Only the
//! first such field is rewritten; every byte outside the matched region is kept.

use crate::core::error::{ResultExt, SyncResult};
use regex::bytes::Regex;
use std::ops::Range;

/// `version = "X.Y.Z"` with ASCII digits, written exactly with single spaces around `=`
const VERSION_FIELD: &str = r#"version = "([0-9]+\.[0-9]+\.[0-9]+)""#;

/// Result of rewriting a manifest's contents in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
  /// Full document after replacement (identical to the input when nothing matched)
  pub content: Vec<u8>,
  /// The dotted triple that was replaced, if a field matched
  pub previous: Option<String>,
  /// Byte range of the replaced field in the original document
  pub span: Option<Range<usize>>,
}

impl Rewrite {
  pub fn matched(&self) -> bool {
    self.previous.is_some()
  }
}

/// Compiled matcher for the manifest version field
#[derive(Debug, Clone)]
pub struct VersionPattern {
  regex: Regex,
}

impl VersionPattern {
  pub fn new() -> SyncResult<Self> {
    Ok(Self {
      regex: Regex::new(VERSION_FIELD).context("Invalid version field pattern")?,
    })
  }

  /// Find the first version field and return its span and the dotted triple it holds
  pub fn find(&self, content: &[u8]) -> Option<(Range<usize>, String)> {
    let caps = self.regex.captures(content)?;
    let whole = caps.get(0)?;
    let triple = caps.get(1)?;
    // The capture is ASCII digits and dots only
    let previous = String::from_utf8_lossy(triple.as_bytes()).into_owned();
    Some((whole.range(), previous))
  }

  /// Whether the field written for `version` is itself a version field a later run can find
  pub fn is_rematchable(&self, version: &str) -> bool {
    let field = format!("version = \"{}\"", version);
    self.find(field.as_bytes()).is_some_and(|(span, _)| span == (0..field.len()))
  }

  /// Replace the first version field with `version = "<version>"`
  ///
  /// `version` is inserted verbatim; no replacement-string expansion happens.
  pub fn rewrite(&self, content: &[u8], version: &str) -> Rewrite {
    let Some((span, previous)) = self.find(content) else {
      return Rewrite {
        content: content.to_vec(),
        previous: None,
        span: None,
      };
    };

    let field = format!("version = \"{}\"", version);
    let mut out = Vec::with_capacity(content.len() - span.len() + field.len());
    out.extend_from_slice(&content[..span.start]);
    out.extend_from_slice(field.as_bytes());
    out.extend_from_slice(&content[span.end..]);

    Rewrite {
      content: out,
      previous: Some(previous),
      span: Some(span),
    }
  }
}
