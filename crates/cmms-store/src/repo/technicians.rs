use cmms_core::ids::{new_id, TECHNICIAN_PREFIX};
use cmms_core::model::{NewTechnician, Technician, TechnicianPatch};
use rusqlite::Row;

use super::{ensure_found, logged, Accessor, Collection, UpdateBuilder};
use crate::context::PersistenceContext;
use crate::errors::Result;
use crate::schema::TECHNICIANS;

const SELECT_SQL: &str = "SELECT id, name, email, phone, specialization
     FROM technicians ORDER BY name, id";

fn technician_from_row(row: &Row<'_>) -> rusqlite::Result<Technician> {
    Ok(Technician {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        specialization: row.get("specialization")?,
    })
}

#[derive(Debug, Default)]
pub struct TechnicianAccessor {
    collection: Collection<Technician>,
}

impl TechnicianAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// `MissingField` for a blank name or email.
    pub fn add(&mut self, ctx: &PersistenceContext, input: NewTechnician) -> Result<String> {
        input.validate()?;
        let id = new_id(TECHNICIAN_PREFIX);
        logged("add_technician", &id, || {
            ctx.command(
                "INSERT INTO technicians (id, name, email, phone, specialization)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    id,
                    input.name,
                    input.email,
                    input.phone,
                    input.specialization
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
    /// `NotFound` if no technician has this key.
    /// `MissingField` if the patch blanks a required text field.
    pub fn update(
        &mut self,
        ctx: &PersistenceContext,
        id: &str,
        patch: TechnicianPatch,
    ) -> Result<()> {
        patch.validate()?;
        let mut update = UpdateBuilder::new(TECHNICIANS);
        update.set("name", patch.name);
        update.set("email", patch.email);
        update.set("phone", patch.phone);
        update.set("specialization", patch.specialization);
        if update.is_empty() {
            tracing::debug!(record_id = id, "empty technician patch");
            return Ok(());
        }

        logged("update_technician", id, || {
            let changed = update.execute(ctx, id)?;
            ensure_found(ctx, changed, TECHNICIANS, id)?;
            self.refresh(ctx)
        })
    }

    /// Delete a technician; work orders assigned to them keep the reference
    ///
    /// # Errors
    ///
    /// `NotFound` if no technician has this key.
    pub fn delete(&mut self, ctx: &PersistenceContext, id: &str) -> Result<()> {
        logged("delete_technician", id, || {
            let changed = ctx.command("DELETE FROM technicians WHERE id = ?1", [id])?;
            ensure_found(ctx, changed, TECHNICIANS, id)?;
            self.refresh(ctx)
        })
    }
}

impl Accessor for TechnicianAccessor {
    type Record = Technician;

    fn records(&self) -> &[Technician] {
        self.collection.records()
    }

    fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    fn refresh(&mut self, ctx: &PersistenceContext) -> Result<()> {
        self.collection.load(ctx, SELECT_SQL, technician_from_row)
    }
}
