use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{require_patch_text, require_text, Result};

/// Quantity stored when creation input is missing, zero or negative
pub const MIN_CREATION_QUANTITY: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePart {
    pub id: String,
    pub name: String,
    pub part_number: String,
    pub quantity: u32,
    pub location: String,
    pub acquisition_date: Option<NaiveDate>,
    pub installation_date: Option<NaiveDate>,
}

/// Input for creating a spare part
///
/// `quantity` is signed so out-of-range input reaches the coercion rule
/// instead of failing earlier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSparePart {
    pub name: String,
    pub part_number: String,
    pub quantity: i64,
    pub location: String,
    pub acquisition_date: Option<NaiveDate>,
    pub installation_date: Option<NaiveDate>,
}

impl NewSparePart {
    pub fn validate(&self) -> Result<()> {
        require_text("spare_part", "name", &self.name)?;
        require_text("spare_part", "location", &self.location)
    }

    /// Quantity actually stored on creation
    pub fn effective_quantity(&self) -> u32 {
        coerce_quantity(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SparePartPatch {
    pub name: Option<String>,
    pub part_number: Option<String>,
    pub quantity: Option<u32>,
    pub location: Option<String>,
    pub acquisition_date: Option<Option<NaiveDate>>,
    pub installation_date: Option<Option<NaiveDate>>,
}

impl SparePartPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.part_number.is_none()
            && self.quantity.is_none()
            && self.location.is_none()
            && self.acquisition_date.is_none()
            && self.installation_date.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        require_patch_text("spare_part", "name", self.name.as_deref())?;
        require_patch_text("spare_part", "location", self.location.as_deref())
    }
}

/// Clamp a creation quantity to at least one
pub fn coerce_quantity(quantity: i64) -> u32 {
    if quantity < i64::from(MIN_CREATION_QUANTITY) {
        return MIN_CREATION_QUANTITY;
    }
    u32::try_from(quantity).unwrap_or(u32::MAX)
}

/// Parse raw form input; anything non-numeric becomes the minimum
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim()
        .parse::<i64>()
        .map(coerce_quantity)
        .unwrap_or(MIN_CREATION_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_quantity_edge_cases() {
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity("-4"), 1);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity(" 12 "), 12);
    }

    proptest! {
        #[test]
        fn prop_coerced_quantity_is_positive(q in any::<i64>()) {
            prop_assert!(coerce_quantity(q) >= 1);
        }

        #[test]
        fn prop_positive_quantities_are_kept(q in 1i64..=i64::from(u32::MAX)) {
            prop_assert_eq!(i64::from(coerce_quantity(q)), q);
        }
    }
}
