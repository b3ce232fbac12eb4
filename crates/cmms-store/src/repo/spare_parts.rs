use cmms_core::ids::{new_id, SPARE_PART_PREFIX};
use cmms_core::model::{NewSparePart, SparePart, SparePartPatch};
use rusqlite::Row;

use super::mapping::{date_param, optional_date};
use super::{ensure_found, logged, Accessor, Collection, UpdateBuilder};
use crate::context::PersistenceContext;
use crate::errors::Result;
use crate::schema::SPARE_PARTS;

const SELECT_SQL: &str = "SELECT id, name, part_number, quantity, location, acquisition_date,
            installation_date
     FROM spare_parts ORDER BY name, id";

struct SparePartRow {
    id: String,
    name: String,
    part_number: String,
    quantity: i64,
    location: String,
    acquisition_date: Option<String>,
    installation_date: Option<String>,
}

impl SparePartRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            part_number: row.get("part_number")?,
            quantity: row.get("quantity")?,
            location: row.get("location")?,
            acquisition_date: row.get("acquisition_date")?,
            installation_date: row.get("installation_date")?,
        })
    }

    fn into_record(self) -> SparePart {
        let acquisition_date =
            optional_date(SPARE_PARTS, &self.id, "acquisition_date", self.acquisition_date);
        let installation_date =
            optional_date(SPARE_PARTS, &self.id, "installation_date", self.installation_date);
        // The CHECK constraint keeps stored quantities non-negative
        let quantity = u32::try_from(self.quantity).unwrap_or_default();
        SparePart {
            id: self.id,
            name: self.name,
            part_number: self.part_number,
            quantity,
            location: self.location,
            acquisition_date,
            installation_date,
        }
    }
}

#[derive(Debug, Default)]
pub struct SparePartAccessor {
    collection: Collection<SparePart>,
}

impl SparePartAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spare part and return its key
    ///
    /// A quantity below one is stored as one.
    ///
    /// # Errors
    ///
    /// `MissingField` for a blank name or location.
    pub fn add(&mut self, ctx: &PersistenceContext, input: NewSparePart) -> Result<String> {
        input.validate()?;
        let id = new_id(SPARE_PART_PREFIX);
        let quantity = input.effective_quantity();
        if i64::from(quantity) != input.quantity {
            tracing::debug!(requested = input.quantity, stored = quantity, "quantity coerced");
        }
        logged("add_spare_part", &id, || {
            ctx.command(
                "INSERT INTO spare_parts (id, name, part_number, quantity, location,
                                          acquisition_date, installation_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    id,
                    input.name,
                    input.part_number,
                    quantity,
                    input.location,
                    date_param(input.acquisition_date),
                    date_param(input.installation_date),
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
    /// `NotFound` if no spare part has this key.
    /// `MissingField` if the patch blanks a required text field.
    pub fn update(
        &mut self,
        ctx: &PersistenceContext,
        id: &str,
        patch: SparePartPatch,
    ) -> Result<()> {
        patch.validate()?;
        let mut update = UpdateBuilder::new(SPARE_PARTS);
        update.set("name", patch.name);
        update.set("part_number", patch.part_number);
        update.set("quantity", patch.quantity);
        update.set("location", patch.location);
        update.set("acquisition_date", patch.acquisition_date.map(date_param));
        update.set("installation_date", patch.installation_date.map(date_param));
        if update.is_empty() {
            tracing::debug!(record_id = id, "empty spare part patch");
            return Ok(());
        }

        logged("update_spare_part", id, || {
            let changed = update.execute(ctx, id)?;
            ensure_found(ctx, changed, SPARE_PARTS, id)?;
            self.refresh(ctx)
        })
    }

    /// # Errors
    ///
    /// `NotFound` if no spare part has this key.
    pub fn delete(&mut self, ctx: &PersistenceContext, id: &str) -> Result<()> {
        logged("delete_spare_part", id, || {
            let changed = ctx.command("DELETE FROM spare_parts WHERE id = ?1", [id])?;
            ensure_found(ctx, changed, SPARE_PARTS, id)?;
            self.refresh(ctx)
        })
    }
}

impl Accessor for SparePartAccessor {
    type Record = SparePart;

    fn records(&self) -> &[SparePart] {
        self.collection.records()
    }

    fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    fn refresh(&mut self, ctx: &PersistenceContext) -> Result<()> {
        self.collection.load(ctx, SELECT_SQL, |row| {
            SparePartRow::from_row(row).map(SparePartRow::into_record)
        })
    }
}
