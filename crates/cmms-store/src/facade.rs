//! Query/command façade
//!
//! The only path from accessors to SQL. Parameters are always bound
//! positionally. A closed context answers queries with no rows and ignores
//! commands; both are logged as skipped operations.

use cmms_core::log_op_skipped;
use rusqlite::{Params, Row};

use crate::context::PersistenceContext;
use crate::errors::{from_rusqlite, from_rusqlite_write, Result};

impl PersistenceContext {
    /// Run a SELECT and map every row
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the statement fails or a row cannot be read.
    pub fn query<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let Some(conn) = self.connection() else {
            log_op_skipped!("query", reason = "context closed", sql = sql);
            return Ok(Vec::new());
        };

        let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
        let rows = stmt.query_map(params, map).map_err(from_rusqlite)?;
        rows.collect::<rusqlite::Result<Vec<T>>>()
            .map_err(from_rusqlite)
    }

    /// Run a write statement, then persist the image
    ///
    /// Returns the number of rows changed (0 on a closed context).
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` when a CHECK or NOT NULL rule rejects the
    /// write, `Persistence` for other engine failures, and medium errors if the
    /// image cannot be written afterwards.
    pub fn command<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        let Some(conn) = self.connection() else {
            log_op_skipped!("command", reason = "context closed", sql = sql);
            return Ok(0);
        };

        let changed = conn.execute(sql, params).map_err(from_rusqlite_write)?;
        tracing::debug!(rows_changed = changed, "command executed");
        self.persist()?;
        Ok(changed)
    }
}
