use cmms_core::ids::{new_id, EQUIPMENT_PREFIX};
use cmms_core::model::equipment::equipment_name;
use cmms_core::model::{Equipment, EquipmentPatch, EquipmentStatus, NewEquipment};
use cmms_core::time::format_date;
use rusqlite::Row;

use super::mapping::required_date;
use super::{ensure_found, logged, Accessor, Collection, UpdateBuilder};
use crate::context::PersistenceContext;
use crate::errors::Result;
use crate::schema::EQUIPMENTS;

const SELECT_SQL: &str = "SELECT id, name, model, serial_number, installation_date, status
     FROM equipments ORDER BY name, id";

struct EquipmentRow {
    id: String,
    name: String,
    model: String,
    serial_number: String,
    installation_date: String,
    status: String,
}

impl EquipmentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            model: row.get("model")?,
            serial_number: row.get("serial_number")?,
            installation_date: row.get("installation_date")?,
            status: row.get("status")?,
        })
    }

    fn into_record(self) -> Equipment {
        let commissioning_date =
            required_date(EQUIPMENTS, &self.id, "installation_date", &self.installation_date);
        Equipment {
            id: self.id,
            name: self.name,
            model: self.model,
            serial_number: self.serial_number,
            commissioning_date,
            status: EquipmentStatus::from_code(&self.status),
        }
    }
}

#[derive(Debug, Default)]
pub struct EquipmentAccessor {
    collection: Collection<Equipment>,
}

impl EquipmentAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a piece of equipment and return its key
    ///
    /// # Errors
    ///
    /// `MissingField` for blank required text, engine or medium errors otherwise.
    pub fn add(&mut self, ctx: &PersistenceContext, input: NewEquipment) -> Result<String> {
        input.validate()?;
        let id = new_id(EQUIPMENT_PREFIX);
        logged("add_equipment", &id, || {
            ctx.command(
                "INSERT INTO equipments (id, name, model, serial_number, installation_date, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    id,
                    input.name,
                    input.model,
                    input.serial_number,
                    format_date(input.commissioning_date),
                    input.status.code(),
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
    /// `NotFound` if no equipment has this key.
    /// `MissingField` if the patch blanks a required text field.
    pub fn update(
        &mut self,
        ctx: &PersistenceContext,
        id: &str,
        patch: EquipmentPatch,
    ) -> Result<()> {
        patch.validate()?;
        let mut update = UpdateBuilder::new(EQUIPMENTS);
        update.set("name", patch.name);
        update.set("model", patch.model);
        update.set("serial_number", patch.serial_number);
        update.set("installation_date", patch.commissioning_date.map(format_date));
        update.set("status", patch.status.map(EquipmentStatus::code));
        if update.is_empty() {
            tracing::debug!(record_id = id, "empty equipment patch");
            return Ok(());
        }

        logged("update_equipment", id, || {
            let changed = update.execute(ctx, id)?;
            ensure_found(ctx, changed, EQUIPMENTS, id)?;
            self.refresh(ctx)
        })
    }

    /// Delete one piece of equipment
    ///
    /// Tickets, downtimes, tasks and work orders pointing at it are kept.
    ///
    /// # Errors
    ///
    /// `NotFound` if no equipment has this key.
    pub fn delete(&mut self, ctx: &PersistenceContext, id: &str) -> Result<()> {
        logged("delete_equipment", id, || {
            let changed = ctx.command("DELETE FROM equipments WHERE id = ?1", [id])?;
            ensure_found(ctx, changed, EQUIPMENTS, id)?;
            self.refresh(ctx)
        })
    }

    /// Display name for a referenced key, `Inconnu` for dangling references
    pub fn name_of(&self, id: &str) -> &str {
        equipment_name(self.records(), id)
    }

    pub fn get(&self, id: &str) -> Option<&Equipment> {
        self.records().iter().find(|e| e.id == id)
    }
}

impl Accessor for EquipmentAccessor {
    type Record = Equipment;

    fn records(&self) -> &[Equipment] {
        self.collection.records()
    }

    fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    fn refresh(&mut self, ctx: &PersistenceContext) -> Result<()> {
        self.collection.load(ctx, SELECT_SQL, |row| {
            EquipmentRow::from_row(row).map(EquipmentRow::into_record)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmms_core::model::equipment::UNKNOWN_EQUIPMENT_NAME;

    #[test]
    fn test_unknown_name_constant() {
        let accessor = EquipmentAccessor::new();
        assert!(accessor.is_loading());
        assert_eq!(accessor.name_of("eq-001"), UNKNOWN_EQUIPMENT_NAME);
    }
}
