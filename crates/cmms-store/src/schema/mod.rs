//! Table definitions
//!
//! The DDL is embedded at compile time and is idempotent. There is no
//! migration ledger: an image either carries these seven tables or it is
//! rejected on restore.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;

pub const EQUIPMENTS: &str = "equipments";
pub const TICKETS: &str = "tickets";
pub const DOWNTIMES: &str = "downtimes";
pub const MAINTENANCE_TASKS: &str = "maintenance_tasks";
pub const WORK_ORDERS: &str = "work_orders";
pub const SPARE_PARTS: &str = "spare_parts";
pub const TECHNICIANS: &str = "technicians";

/// Every table the store owns, in creation order
pub const TABLES: [&str; 7] = [
    EQUIPMENTS,
    TECHNICIANS,
    TICKETS,
    DOWNTIMES,
    MAINTENANCE_TASKS,
    WORK_ORDERS,
    SPARE_PARTS,
];

const TABLES_SQL: &str = include_str!("tables.sql");

/// Create all tables if they do not exist
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(TABLES_SQL).map_err(from_rusqlite)
}

/// Names of store tables missing from the database
pub fn missing_tables(conn: &Connection) -> Result<Vec<&'static str>> {
    let mut stmt = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")
        .map_err(from_rusqlite)?;
    let mut missing = Vec::new();
    for table in TABLES {
        if !stmt.exists([table]).map_err(from_rusqlite)? {
            missing.push(table);
        }
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn test_create_tables() {
        let conn = open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        assert!(missing_tables(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_create_tables_idempotent() {
        let conn = open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        assert!(create_tables(&conn).is_ok());
    }

    #[test]
    fn test_status_check_constraint() {
        let conn = open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO equipments (id, name, model, serial_number, installation_date, status)
             VALUES ('eq-x', 'n', 'm', 's', '2024-01-01', 'Opérationnel')",
            [],
        );
        assert!(result.is_err(), "labels must never reach the status column");
    }

    #[test]
    fn test_quantity_check_constraint() {
        let conn = open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO spare_parts (id, name, part_number, quantity, location)
             VALUES ('sp-x', 'n', 'p', -1, 'A1')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_tables_on_empty_database() {
        let conn = open_in_memory().unwrap();
        assert_eq!(missing_tables(&conn).unwrap().len(), TABLES.len());
    }
}
