//! Routes command implementation
//!
//! Prints the supported request paths without opening a socket.

use anyhow::{Context, Result};
use fixture_adapters::route_table;
use fixture_protocol::FixtureTable;

/// Execute the routes command
pub fn execute_routes_command() -> Result<()> {
    let table = FixtureTable::builtin().context("Failed to build fixture table")?;
    print!("{}", route_table(&table));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_command() {
        assert!(execute_routes_command().is_ok());
    }

    #[test]
    fn test_routes_lists_json_list_once() {
        let listing = route_table(&FixtureTable::builtin().unwrap());
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Supported request queries:");
        assert_eq!(lines.iter().filter(|l| l.contains("/json-1")).count(), 1);
        assert_eq!(lines[1].trim_end(), "    /json-1     Simple JSON request");
    }
}
