use cmms_core::ids::{new_id, WORK_ORDER_PREFIX};
use cmms_core::model::work_order::assigned_technician;
use cmms_core::model::{NewWorkOrder, Priority, WorkOrder, WorkOrderPatch, WorkOrderStatus};
use cmms_core::time::{self, format_timestamp};
use rusqlite::Row;

use super::mapping::{optional_date, required_date};
use super::{ensure_found, logged, Accessor, Collection, UpdateBuilder};
use crate::context::PersistenceContext;
use crate::errors::Result;
use crate::schema::WORK_ORDERS;

const SELECT_SQL: &str = "SELECT id, equipment_id, description, assigned_to, priority, status,
            created_at, completed_at
     FROM work_orders ORDER BY created_at DESC, rowid DESC";

struct WorkOrderRow {
    id: String,
    equipment_id: String,
    description: String,
    assigned_to: Option<String>,
    priority: String,
    status: String,
    created_at: String,
    completed_at: Option<String>,
}

impl WorkOrderRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            equipment_id: row.get("equipment_id")?,
            description: row.get("description")?,
            assigned_to: row.get("assigned_to")?,
            priority: row.get("priority")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
            completed_at: row.get("completed_at")?,
        })
    }

    fn into_record(self) -> WorkOrder {
        let created_date = required_date(WORK_ORDERS, &self.id, "created_at", &self.created_at);
        let completed_date =
            optional_date(WORK_ORDERS, &self.id, "completed_at", self.completed_at);
        WorkOrder {
            id: self.id,
            equipment_id: self.equipment_id,
            description: self.description,
            technician_id: self.assigned_to.filter(|t| !t.is_empty()),
            priority: Priority::from_code(&self.priority),
            status: WorkOrderStatus::from_code(&self.status),
            created_date,
            completed_date,
        }
    }
}

#[derive(Debug, Default)]
pub struct WorkOrderAccessor {
    collection: Collection<WorkOrder>,
}

impl WorkOrderAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an open work order and return its key
    ///
    /// # Errors
    ///
    /// `MissingField` for a blank equipment reference or description.
    pub fn add(&mut self, ctx: &PersistenceContext, input: NewWorkOrder) -> Result<String> {
        input.validate()?;
        let id = new_id(WORK_ORDER_PREFIX);
        let technician_id = assigned_technician(input.technician_id.clone());
        logged("add_work_order", &id, || {
            ctx.command(
                "INSERT INTO work_orders (id, equipment_id, description, assigned_to, priority,
                                          status, created_at, completed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL)",
                rusqlite::params![
                    id,
                    input.equipment_id,
                    input.description,
                    technician_id,
                    input.priority.code(),
                    WorkOrderStatus::Open.code(),
                    format_timestamp(time::now()),
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
    /// `NotFound` if no work order has this key.
    /// `MissingField` if the patch blanks a required text field.
    pub fn update(
        &mut self,
        ctx: &PersistenceContext,
        id: &str,
        patch: WorkOrderPatch,
    ) -> Result<()> {
        patch.validate()?;
        let mut update = UpdateBuilder::new(WORK_ORDERS);
        update.set("equipment_id", patch.equipment_id);
        update.set("description", patch.description);
        update.set("assigned_to", patch.technician_id.map(assigned_technician));
        update.set("priority", patch.priority.map(Priority::code));
        if update.is_empty() {
            tracing::debug!(record_id = id, "empty work order patch");
            return Ok(());
        }

        logged("update_work_order", id, || {
            let changed = update.execute(ctx, id)?;
            ensure_found(ctx, changed, WORK_ORDERS, id)?;
            self.refresh(ctx)
        })
    }

    /// Move a work order to `status`
    ///
    /// Closing stamps the completion time; any other status clears it.
    ///
    /// # Errors
    ///
    /// `NotFound` if no work order has this key.
    pub fn set_status(
        &mut self,
        ctx: &PersistenceContext,
        id: &str,
        status: WorkOrderStatus,
    ) -> Result<()> {
        let completed_at = match status {
            WorkOrderStatus::Closed => Some(format_timestamp(time::now())),
            WorkOrderStatus::Open | WorkOrderStatus::InProgress => None,
        };
        logged("set_work_order_status", id, || {
            let changed = ctx.command(
                "UPDATE work_orders SET status = ?1, completed_at = ?2 WHERE id = ?3",
                rusqlite::params![status.code(), completed_at, id],
            )?;
            ensure_found(ctx, changed, WORK_ORDERS, id)?;
            self.refresh(ctx)
        })
    }

    /// # Errors
    ///
    /// `NotFound` if no work order has this key.
    pub fn delete(&mut self, ctx: &PersistenceContext, id: &str) -> Result<()> {
        logged("delete_work_order", id, || {
            let changed = ctx.command("DELETE FROM work_orders WHERE id = ?1", [id])?;
            ensure_found(ctx, changed, WORK_ORDERS, id)?;
            self.refresh(ctx)
        })
    }
}

impl Accessor for WorkOrderAccessor {
    type Record = WorkOrder;

    fn records(&self) -> &[WorkOrder] {
        self.collection.records()
    }

    fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    fn refresh(&mut self, ctx: &PersistenceContext) -> Result<()> {
        self.collection.load(ctx, SELECT_SQL, |row| {
            WorkOrderRow::from_row(row).map(WorkOrderRow::into_record)
        })
    }
}
