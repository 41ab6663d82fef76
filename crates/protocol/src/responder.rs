//! Fixture Responder
//!
//! Resolves a request (method and target) against the fixture table without
//! touching a socket. Transport adapters turn the outcome into a response.

use std::sync::Arc;

use tracing::debug;

use crate::entry::FixtureEntry;
use crate::errors::ResponderError;
use crate::table::FixtureTable;

/// The only method the responder serves
pub const SUPPORTED_METHOD: &str = "GET";

/// Matches requests against a shared, read-only fixture table
#[derive(Debug, Clone)]
pub struct Responder {
    table: Arc<FixtureTable>,
}

impl Responder {
    pub fn new(table: Arc<FixtureTable>) -> Self {
        Self { table }
    }

    /// Resolve `method` and the raw request `target` to a fixture entry.
    ///
    /// `target` is compared as received, query string included.
    pub fn respond(&self, method: &str, target: &str) -> Result<&FixtureEntry, ResponderError> {
        if method != SUPPORTED_METHOD {
            return Err(ResponderError::UnsupportedMethod {
                method: method.to_string(),
            });
        }

        match self.table.lookup(target) {
            Some(entry) => {
                debug!(path = %entry.path, bytes = entry.body.len(), "fixture matched");
                Ok(entry)
            }
            None => Err(ResponderError::UnmappedPath {
                path: target.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> Responder {
        Responder::new(Arc::new(FixtureTable::builtin().unwrap()))
    }

    #[test]
    fn test_get_known_path() {
        let responder = responder();
        let entry = responder.respond("GET", "/json-1").unwrap();
        assert_eq!(entry.path, "/json-1");
        assert_eq!(entry.content_type(), "application/json");
    }

    #[test]
    fn test_unknown_path() {
        let err = responder().respond("GET", "/no-such-route").unwrap_err();
        assert_eq!(
            err,
            ResponderError::UnmappedPath {
                path: "/no-such-route".to_string()
            }
        );
        assert_eq!(err.to_string(), "No mapping for /no-such-route");
    }

    #[test]
    fn test_other_methods_rejected() {
        let responder = responder();
        for method in ["POST", "PUT", "DELETE", "HEAD", "get"] {
            let err = responder.respond(method, "/json-1").unwrap_err();
            assert!(matches!(err, ResponderError::UnsupportedMethod { .. }));
        }
    }

    #[test]
    fn test_repeated_requests_identical() {
        let responder = responder();
        let first = responder.respond("GET", "/json-1").unwrap().body_bytes().to_vec();
        for _ in 0..10 {
            let next = responder.respond("GET", "/json-1").unwrap();
            assert_eq!(next.body_bytes(), first.as_slice());
        }
    }
}
