use chrono::NaiveDate;
use cmms_core::ids::{new_id, MAINTENANCE_PREFIX};
use cmms_core::model::{
    MaintenanceStatus, MaintenanceTask, MaintenanceTaskPatch, NewMaintenanceTask,
};
use cmms_core::time::{self, format_date};
use rusqlite::Row;

use super::mapping::{date_param, optional_date, required_date};
use super::{ensure_found, logged, Accessor, Collection, UpdateBuilder};
use crate::context::PersistenceContext;
use crate::errors::Result;
use crate::schema::MAINTENANCE_TASKS;

const SELECT_SQL: &str = "SELECT id, task, equipment_id, due_date, status, completed_date
     FROM maintenance_tasks ORDER BY due_date, rowid";

struct MaintenanceTaskRow {
    id: String,
    task: String,
    equipment_id: String,
    due_date: String,
    status: String,
    completed_date: Option<String>,
}

impl MaintenanceTaskRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            task: row.get("task")?,
            equipment_id: row.get("equipment_id")?,
            due_date: row.get("due_date")?,
            status: row.get("status")?,
            completed_date: row.get("completed_date")?,
        })
    }

    fn into_record(self) -> MaintenanceTask {
        let due_date = required_date(MAINTENANCE_TASKS, &self.id, "due_date", &self.due_date);
        let completed_date =
            optional_date(MAINTENANCE_TASKS, &self.id, "completed_date", self.completed_date);
        MaintenanceTask {
            id: self.id,
            task: self.task,
            equipment_id: self.equipment_id,
            due_date,
            status: MaintenanceStatus::from_code(&self.status),
            completed_date,
        }
    }
}

#[derive(Debug, Default)]
pub struct MaintenanceAccessor {
    collection: Collection<MaintenanceTask>,
}

impl MaintenanceAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a maintenance task and return its key
    ///
    /// # Errors
    ///
    /// `MissingField` for a blank task or equipment reference.
    pub fn add(&mut self, ctx: &PersistenceContext, input: NewMaintenanceTask) -> Result<String> {
        input.validate()?;
        let id = new_id(MAINTENANCE_PREFIX);
        logged("add_maintenance_task", &id, || {
            ctx.command(
                "INSERT INTO maintenance_tasks (id, task, equipment_id, due_date, status,
                                                completed_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    id,
                    input.task,
                    input.equipment_id,
                    format_date(input.due_date),
                    input.status.code(),
                    date_param(input.completed_date),
                ],
            )?;
            self.refresh(ctx)
        })?;
        Ok(id)
    }

    /// Write the fields present in `patch`; an empty patch touches nothing
    ///
    /// # Errors
    ///
    /// `NotFound` if no task has this key.
    /// `MissingField` if the patch blanks a required text field.
    pub fn update(
        &mut self,
        ctx: &PersistenceContext,
        id: &str,
        patch: MaintenanceTaskPatch,
    ) -> Result<()> {
        patch.validate()?;
        let mut update = UpdateBuilder::new(MAINTENANCE_TASKS);
        update.set("task", patch.task);
        update.set("equipment_id", patch.equipment_id);
        update.set("due_date", patch.due_date.map(format_date));
        update.set("status", patch.status.map(MaintenanceStatus::code));
        update.set("completed_date", patch.completed_date.map(date_param));
        if update.is_empty() {
            tracing::debug!(record_id = id, "empty maintenance task patch");
            return Ok(());
        }

        logged("update_maintenance_task", id, || {
            let changed = update.execute(ctx, id)?;
            ensure_found(ctx, changed, MAINTENANCE_TASKS, id)?;
            self.refresh(ctx)
        })
    }

    /// Move a task to `status`
    ///
    /// Completing stamps `completed_date` (today unless a date is given);
    /// any other status clears it.
    ///
    /// # Errors
    ///
    /// `NotFound` if no task has this key.
    pub fn set_status(
        &mut self,
        ctx: &PersistenceContext,
        id: &str,
        status: MaintenanceStatus,
        completed_on: Option<NaiveDate>,
    ) -> Result<()> {
        let completed_date = match status {
            MaintenanceStatus::Completed => Some(completed_on.unwrap_or_else(time::today)),
            MaintenanceStatus::Planned | MaintenanceStatus::Overdue => None,
        };
        logged("set_maintenance_status", id, || {
            let changed = ctx.command(
                "UPDATE maintenance_tasks SET status = ?1, completed_date = ?2 WHERE id = ?3",
                rusqlite::params![status.code(), date_param(completed_date), id],
            )?;
            ensure_found(ctx, changed, MAINTENANCE_TASKS, id)?;
            self.refresh(ctx)
        })
    }

    /// # Errors
    ///
    /// `NotFound` if no task has this key.
    pub fn delete(&mut self, ctx: &PersistenceContext, id: &str) -> Result<()> {
        logged("delete_maintenance_task", id, || {
            let changed = ctx.command("DELETE FROM maintenance_tasks WHERE id = ?1", [id])?;
            ensure_found(ctx, changed, MAINTENANCE_TASKS, id)?;
            self.refresh(ctx)
        })
    }
}

impl Accessor for MaintenanceAccessor {
    type Record = MaintenanceTask;

    fn records(&self) -> &[MaintenanceTask] {
        self.collection.records()
    }

    fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    fn refresh(&mut self, ctx: &PersistenceContext) -> Result<()> {
        self.collection.load(ctx, SELECT_SQL, |row| {
            MaintenanceTaskRow::from_row(row).map(MaintenanceTaskRow::into_record)
        })
    }
}
