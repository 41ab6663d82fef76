//! Fixture entries and the payload records they carry.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Content type of every fixture body
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// One canned response: request path, pre-serialized body and a description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureEntry {
    /// Request target this entry answers (exact match)
    pub path: String,
    /// Response payload, emitted verbatim
    pub body: String,
    /// Human-readable description for the startup banner
    pub description: String,
}

impl FixtureEntry {
    pub fn new(
        path: impl Into<String>,
        body: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            body: body.into(),
            description: description.into(),
        }
    }

    /// Create an entry whose body is the compact JSON encoding of `value`.
    ///
    /// The value is serialized once here; the stored string is what goes on
    /// the wire for every request.
    pub fn json<T: Serialize + ?Sized>(
        path: impl Into<String>,
        value: &T,
        description: impl Into<String>,
    ) -> Result<Self> {
        let body = serde_json::to_string(value)?;
        Ok(Self::new(path, body, description))
    }

    pub fn content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }

    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }
}

/// A song record, the element type of the `/json-1` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub artist: String,
    pub title: String,
}

impl Track {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }
}
