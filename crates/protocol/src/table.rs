//! Fixture Table Module
//!
//! The ordered, immutable set of fixture entries. A table is built once at
//! startup and shared read-only with the request handler.

use crate::entry::{FixtureEntry, Track};
use crate::errors::FixtureError;
use crate::Result;

/// Path of the built-in JSON list fixture
pub const JSON_LIST_PATH: &str = "/json-1";

/// Ordered list of fixture entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureTable {
    entries: Vec<FixtureEntry>,
}

impl FixtureTable {
    /// Build a table from entries, rejecting paths that cannot be a request target.
    ///
    /// Duplicate paths are accepted; [`FixtureTable::lookup`] returns the
    /// first one.
    pub fn new(entries: Vec<FixtureEntry>) -> Result<Self> {
        for entry in &entries {
            validate_path(&entry.path)?;
        }
        Ok(Self { entries })
    }

    /// The fixed table served by `fixture-server`.
    pub fn builtin() -> Result<Self> {
        let tracks = [
            Track::new("Fleetwood Mac", "Dreams"),
            Track::new("Led Zepelin", "Communication Breakdown"),
        ];

        Self::new(vec![FixtureEntry::json(
            JSON_LIST_PATH,
            &tracks,
            "Simple JSON request",
        )?])
    }

    /// Find the entry for a request target. Exact match, first match wins.
    pub fn lookup(&self, path: &str) -> Option<&FixtureEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FixtureEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FixtureError::InvalidPath {
            path: path.to_string(),
            reason: "path is empty".to_string(),
        });
    }
    if !path.starts_with('/') {
        return Err(FixtureError::InvalidPath {
            path: path.to_string(),
            reason: "path must start with '/'".to_string(),
        });
    }
    Ok(())
}
