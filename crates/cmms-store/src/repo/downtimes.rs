use cmms_core::ids::{new_id, DOWNTIME_PREFIX};
use cmms_core::model::downtime::resolution_end;
use cmms_core::model::{Downtime, DowntimeStatus, NewDowntime};
use cmms_core::time::{self, format_timestamp};
use rusqlite::Row;

use super::mapping::{optional_timestamp, required_timestamp};
use super::{ensure_found, logged, Accessor, Collection};
use crate::context::PersistenceContext;
use crate::errors::Result;
use crate::schema::DOWNTIMES;

const SELECT_SQL: &str = "SELECT id, equipment_id, reason, start_time, end_time, status
     FROM downtimes ORDER BY start_time DESC, rowid DESC";

struct DowntimeRow {
    id: String,
    equipment_id: String,
    reason: String,
    start_time: String,
    end_time: Option<String>,
    status: String,
}

impl DowntimeRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            equipment_id: row.get("equipment_id")?,
            reason: row.get("reason")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            status: row.get("status")?,
        })
    }

    fn into_record(self) -> Downtime {
        let start = required_timestamp(DOWNTIMES, &self.id, "start_time", &self.start_time);
        let end = optional_timestamp(DOWNTIMES, &self.id, "end_time", self.end_time);
        Downtime {
            id: self.id,
            equipment_id: self.equipment_id,
            reason: self.reason,
            start,
            end,
            status: DowntimeStatus::from_code(&self.status),
        }
    }
}

#[derive(Debug, Default)]
pub struct DowntimeAccessor {
    collection: Collection<Downtime>,
}

impl DowntimeAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a downtime; it stays ongoing until resolved
    ///
    /// # Errors
    ///
    /// `MissingField` for a blank equipment reference or reason.
    pub fn add(&mut self, ctx: &PersistenceContext, input: NewDowntime) -> Result<String> {
        input.validate()?;
        let id = new_id(DOWNTIME_PREFIX);
        logged("add_downtime", &id, || {
            ctx.command(
                "INSERT INTO downtimes (id, equipment_id, reason, start_time, end_time, status)
                 VALUES (?1, ?2, ?3, ?4, NULL, ?5)",
                rusqlite::params![
                    id,
                    input.equipment_id,
                    input.reason,
                    format_timestamp(input.start),
                    DowntimeStatus::Ongoing.code(),
                ],
            )?;
            self.refresh(ctx)
        })?;
        Ok(id)
    }

    /// Close a downtime now
    ///
    /// The end time is the current time, or the start time if the clock
    /// reads earlier than the recorded start.
    ///
    /// # Errors
    ///
    /// `NotFound` if no downtime has this key.
    pub fn resolve(&mut self, ctx: &PersistenceContext, id: &str) -> Result<()> {
        logged("resolve_downtime", id, || {
            let starts = ctx.query(
                "SELECT start_time FROM downtimes WHERE id = ?1",
                [id],
                |row| row.get::<_, String>(0),
            )?;
            let Some(start_raw) = starts.into_iter().next() else {
                return ensure_found(ctx, 0, DOWNTIMES, id);
            };

            let start = required_timestamp(DOWNTIMES, id, "start_time", &start_raw);
            let end = resolution_end(start, time::now());
            let changed = ctx.command(
                "UPDATE downtimes SET status = ?1, end_time = ?2 WHERE id = ?3",
                rusqlite::params![DowntimeStatus::Resolved.code(), format_timestamp(end), id],
            )?;
            ensure_found(ctx, changed, DOWNTIMES, id)?;
            self.refresh(ctx)
        })
    }

    /// Downtimes still in progress
    pub fn ongoing(&self) -> impl Iterator<Item = &Downtime> {
        self.records().iter().filter(|d| d.is_ongoing())
    }
}

impl Accessor for DowntimeAccessor {
    type Record = Downtime;

    fn records(&self) -> &[Downtime] {
        self.collection.records()
    }

    fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    fn refresh(&mut self, ctx: &PersistenceContext) -> Result<()> {
        self.collection.load(ctx, SELECT_SQL, |row| {
            DowntimeRow::from_row(row).map(DowntimeRow::into_record)
        })
    }
}
