//! Protocol errors module

use thiserror::Error;

/// Errors raised while building a fixture table
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Invalid fixture path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Serialization error: {source}")]
    Serialization { source: serde_json::Error },
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        FixtureError::Serialization { source: err }
    }
}

/// Outcomes of a request the responder cannot answer with a fixture
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponderError {
    /// The request target has no entry in the table.
    #[error("No mapping for {path}")]
    UnmappedPath { path: String },

    /// Only GET is served.
    #[error("Unsupported method ({method})")]
    UnsupportedMethod { method: String },
}
