use chrono::Datelike;
use cmms_core::ids::{new_id, TICKET_PREFIX};
use cmms_core::model::ticket::{next_ticket_number, ticket_number_prefix};
use cmms_core::model::{NewTicket, Priority, Ticket, TicketPatch, TicketStatus};
use cmms_core::time::{self, format_timestamp};
use rusqlite::Row;

use super::mapping::{optional_date, required_date};
use super::{ensure_found, logged, Accessor, Collection, UpdateBuilder};
use crate::context::PersistenceContext;
use crate::errors::Result;
use crate::schema::TICKETS;

const SELECT_SQL: &str = "SELECT id, number, subject, description, equipment_id, priority, status,
            created_at, resolved_at
     FROM tickets ORDER BY created_at DESC, rowid DESC";

struct TicketRow {
    id: String,
    number: String,
    subject: String,
    description: String,
    equipment_id: String,
    priority: String,
    status: String,
    created_at: String,
    resolved_at: Option<String>,
}

impl TicketRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            number: row.get("number")?,
            subject: row.get("subject")?,
            description: row.get("description")?,
            equipment_id: row.get("equipment_id")?,
            priority: row.get("priority")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
            resolved_at: row.get("resolved_at")?,
        })
    }

    fn into_record(self) -> Ticket {
        let opened_date = required_date(TICKETS, &self.id, "created_at", &self.created_at);
        let resolved_date = optional_date(TICKETS, &self.id, "resolved_at", self.resolved_at);
        Ticket {
            id: self.id,
            number: self.number,
            subject: self.subject,
            description: self.description,
            equipment_id: self.equipment_id,
            priority: Priority::from_code(&self.priority),
            status: TicketStatus::from_code(&self.status),
            opened_date,
            resolved_date,
        }
    }
}

#[derive(Debug, Default)]
pub struct TicketAccessor {
    collection: Collection<Ticket>,
}

impl TicketAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a ticket and return its key
    ///
    /// The ticket is numbered `TKT-<year>-<NNN>`, one past the highest number
    /// already used this year, and starts open with no resolution time.
    ///
    /// # Errors
    ///
    /// `MissingField` for a blank subject or equipment reference.
    pub fn add(&mut self, ctx: &PersistenceContext, input: NewTicket) -> Result<String> {
        input.validate()?;
        let id = new_id(TICKET_PREFIX);
        logged("add_ticket", &id, || {
            let now = time::now();
            let number = self.next_number(ctx, now.year())?;
            ctx.command(
                "INSERT INTO tickets (id, number, subject, description, equipment_id, priority,
                                      status, created_at, resolved_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL)",
                rusqlite::params![
                    id,
                    number,
                    input.subject,
                    input.description,
                    input.equipment_id,
                    input.priority.code(),
                    TicketStatus::Open.code(),
                    format_timestamp(now),
                ],
            )?;
            tracing::debug!(record_id = %id, number = %number, "ticket numbered");
            self.refresh(ctx)
        })?;
        Ok(id)
    }

    fn next_number(&self, ctx: &PersistenceContext, year: i32) -> Result<String> {
        let pattern = format!("{}%", ticket_number_prefix(year));
        let existing = ctx.query(
            "SELECT number FROM tickets WHERE number LIKE ?1",
            [pattern],
            |row| row.get::<_, String>(0),
        )?;
        Ok(next_ticket_number(existing.iter().map(String::as_str), year))
    }

    /// Write the fields present in `patch`; an empty patch touches nothing
    ///
    /// # Errors
    ///
    /// `NotFound` if no ticket has this key.
    /// `MissingField` if the patch blanks a required text field.
    pub fn update(&mut self, ctx: &PersistenceContext, id: &str, patch: TicketPatch) -> Result<()> {
        patch.validate()?;
        let mut update = UpdateBuilder::new(TICKETS);
        update.set("subject", patch.subject);
        update.set("description", patch.description);
        update.set("equipment_id", patch.equipment_id);
        update.set("priority", patch.priority.map(Priority::code));
        if update.is_empty() {
            tracing::debug!(record_id = id, "empty ticket patch");
            return Ok(());
        }

        logged("update_ticket", id, || {
            let changed = update.execute(ctx, id)?;
            ensure_found(ctx, changed, TICKETS, id)?;
            self.refresh(ctx)
        })
    }

    /// Move a ticket to `status`
    ///
    /// Resolving stamps the resolution time; any other status clears it.
    ///
    /// # Errors
    ///
    /// `NotFound` if no ticket has this key.
    pub fn set_status(
        &mut self,
        ctx: &PersistenceContext,
        id: &str,
        status: TicketStatus,
    ) -> Result<()> {
        let resolved_at = match status {
            TicketStatus::Resolved => Some(format_timestamp(time::now())),
            TicketStatus::Open | TicketStatus::InProgress => None,
        };
        logged("set_ticket_status", id, || {
            let changed = ctx.command(
                "UPDATE tickets SET status = ?1, resolved_at = ?2 WHERE id = ?3",
                rusqlite::params![status.code(), resolved_at, id],
            )?;
            ensure_found(ctx, changed, TICKETS, id)?;
            self.refresh(ctx)
        })
    }

    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.records().iter().find(|t| t.id == id)
    }
}

impl Accessor for TicketAccessor {
    type Record = Ticket;

    fn records(&self) -> &[Ticket] {
        self.collection.records()
    }

    fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    fn refresh(&mut self, ctx: &PersistenceContext) -> Result<()> {
        self.collection.load(ctx, SELECT_SQL, |row| {
            TicketRow::from_row(row).map(TicketRow::into_record)
        })
    }
}
