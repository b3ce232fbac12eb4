//! Database connection management
//!
//! The live database is always in memory; durability comes from persisting
//! its image through the storage bridge.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;

/// Open an empty in-memory database with the store's settings applied
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Configure a connection
///
/// Reference columns are soft foreign keys: deleting equipment must leave
/// its tickets, downtimes, tasks and work orders in place, so enforcement
/// stays off even though the schema declares the references.
pub fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = OFF;")
        .map_err(from_rusqlite)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_disabled() {
        let conn = open_in_memory().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 0);
    }
}
