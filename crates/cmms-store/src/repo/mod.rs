//! Resource accessors
//!
//! One accessor per entity. Each keeps the last fetched snapshot of its
//! table, and every successful write persists the image and re-fetches the
//! snapshot before returning.

mod downtimes;
mod equipment;
mod maintenance;
mod mapping;
mod spare_parts;
mod technicians;
mod tickets;
mod work_orders;

pub use downtimes::DowntimeAccessor;
pub use equipment::EquipmentAccessor;
pub use maintenance::MaintenanceAccessor;
pub use spare_parts::SparePartAccessor;
pub use technicians::TechnicianAccessor;
pub use tickets::TicketAccessor;
pub use work_orders::WorkOrderAccessor;

use std::time::Instant;

use cmms_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::types::ToSql;
use rusqlite::Row;

use crate::context::PersistenceContext;
use crate::errors::{record_not_found, Result};

/// Read side shared by every accessor
pub trait Accessor {
    type Record;

    /// Current snapshot, in the entity's display order
    fn records(&self) -> &[Self::Record];

    /// True until the first fetch against an open context
    fn is_loading(&self) -> bool;

    /// Re-fetch the snapshot
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the SELECT fails.
    fn refresh(&mut self, ctx: &PersistenceContext) -> Result<()>;
}

/// Snapshot storage behind an accessor
#[derive(Debug)]
pub(crate) struct Collection<T> {
    records: Vec<T>,
    loaded: bool,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loaded: false,
        }
    }
}

impl<T> Collection<T> {
    pub(crate) fn records(&self) -> &[T] {
        &self.records
    }

    pub(crate) fn is_loading(&self) -> bool {
        !self.loaded
    }

    /// Replace the snapshot with the result of `sql`
    ///
    /// A closed context keeps the previous snapshot.
    pub(crate) fn load<F>(&mut self, ctx: &PersistenceContext, sql: &str, map: F) -> Result<()>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let records = ctx.query(sql, [], map)?;
        if ctx.is_open() {
            tracing::debug!(row_count = records.len(), "snapshot loaded");
            self.records = records;
            self.loaded = true;
        }
        Ok(())
    }
}

/// UPDATE statement over only the columns a patch carries
pub(crate) struct UpdateBuilder {
    table: &'static str,
    columns: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl UpdateBuilder {
    pub(crate) fn new(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Add `column = value` when `value` is present
    pub(crate) fn set<V: ToSql + 'static>(&mut self, column: &'static str, value: Option<V>) {
        if let Some(value) = value {
            self.columns.push(column);
            self.values.push(Box::new(value));
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn sql(&self) -> String {
        let assignments: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect();
        format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            self.table,
            assignments.join(", "),
            self.columns.len() + 1
        )
    }

    /// Execute against the row `id`; rows changed, 0 when there was nothing to set
    pub(crate) fn execute(mut self, ctx: &PersistenceContext, id: &str) -> Result<usize> {
        if self.is_empty() {
            return Ok(0);
        }
        let sql = self.sql();
        self.values.push(Box::new(id.to_string()));
        ctx.command(&sql, rusqlite::params_from_iter(self.values.iter()))
    }
}

/// Turn "no row changed" into `NotFound`, except on a closed context where
/// every command changes nothing
pub(crate) fn ensure_found(
    ctx: &PersistenceContext,
    changed: usize,
    table: &str,
    id: &str,
) -> Result<()> {
    if ctx.is_open() && changed == 0 {
        return Err(record_not_found(table, id));
    }
    Ok(())
}

/// Wrap an accessor write with start/end/error events
pub(crate) fn logged<T, F>(op: &'static str, record_id: &str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    log_op_start!(op, record_id = record_id);
    let start = Instant::now();

    match f() {
        Ok(value) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                record_id = record_id
            );
            Ok(value)
        }
        Err(e) => {
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                record_id = record_id
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_sql_numbers_params_in_order() {
        let mut update = UpdateBuilder::new("equipments");
        update.set("name", Some("Linac".to_string()));
        update.set::<String>("model", None);
        update.set("status", Some("down"));
        assert_eq!(
            update.sql(),
            "UPDATE equipments SET name = ?1, status = ?2 WHERE id = ?3"
        );
    }

    #[test]
    fn test_nullable_patch_sets_null() {
        let mut update = UpdateBuilder::new("maintenance_tasks");
        update.set("completed_date", Some(None::<String>));
        assert!(!update.is_empty());
        assert_eq!(
            update.sql(),
            "UPDATE maintenance_tasks SET completed_date = ?1 WHERE id = ?2"
        );
    }

    #[test]
    fn test_empty_update() {
        assert!(UpdateBuilder::new("technicians").is_empty());
    }
}
