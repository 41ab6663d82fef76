//! Fixture responder protocol types
//!
//! This crate defines the fixture data model (entries and the immutable
//! table) and the socket-free responder contract shared by the HTTP adapter
//! and the command line interface.

pub mod entry;
pub mod errors;
pub mod responder;
pub mod table;

pub use entry::{FixtureEntry, Track, JSON_CONTENT_TYPE};
pub use errors::{FixtureError, ResponderError};
pub use responder::{Responder, SUPPORTED_METHOD};
pub use table::{FixtureTable, JSON_LIST_PATH};

/// Result type for fixture table operations
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Port the fixture server listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 52001;
