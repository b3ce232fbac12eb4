//! First-run data
//!
//! Illustrative rows inserted exactly once, when no persisted image exists.
//! The content is fixed so every fresh store starts from the same state.

use crate::errors::{from_rusqlite, Result};
use crate::schema;
use rusqlite::Connection;

const FIRST_RUN_SQL: &str = include_str!("first_run.sql");

/// Row counts the first-run data produces, per table
pub const SEEDED_ROW_COUNTS: [(&str, usize); 7] = [
    (schema::EQUIPMENTS, 4),
    (schema::TECHNICIANS, 3),
    (schema::TICKETS, 3),
    (schema::DOWNTIMES, 3),
    (schema::MAINTENANCE_TASKS, 4),
    (schema::WORK_ORDERS, 3),
    (schema::SPARE_PARTS, 4),
];

/// Insert the first-run rows in a single transaction
pub fn seed_first_run(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch(FIRST_RUN_SQL).map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    tracing::info!(
        tables = SEEDED_ROW_COUNTS.len(),
        rows = SEEDED_ROW_COUNTS.iter().map(|(_, n)| n).sum::<usize>(),
        "seeded first-run data"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn count(conn: &Connection, table: &str) -> usize {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get::<_, i64>(0)
        })
        .unwrap() as usize
    }

    #[test]
    fn test_seed_row_counts() {
        let mut conn = open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        seed_first_run(&mut conn).unwrap();

        for (table, expected) in SEEDED_ROW_COUNTS {
            assert_eq!(count(&conn, table), expected, "row count for {}", table);
        }
    }

    #[test]
    fn test_seed_twice_fails_atomically() {
        let mut conn = open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        seed_first_run(&mut conn).unwrap();

        // Primary keys collide; nothing from the second attempt may stick
        assert!(seed_first_run(&mut conn).is_err());
        assert_eq!(count(&conn, schema::EQUIPMENTS), 4);
        assert_eq!(count(&conn, schema::SPARE_PARTS), 4);
    }
}
