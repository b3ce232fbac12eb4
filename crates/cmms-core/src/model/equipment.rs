use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::EquipmentStatus;
use crate::errors::{require_patch_text, require_text, Result};

/// Display name used when a reference points at equipment that no longer exists
pub const UNKNOWN_EQUIPMENT_NAME: &str = "Inconnu";

/// A machine under maintenance management
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub commissioning_date: NaiveDate,
    pub status: EquipmentStatus,
}

/// Input for creating equipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub commissioning_date: NaiveDate,
    pub status: EquipmentStatus,
}

impl NewEquipment {
    pub fn validate(&self) -> Result<()> {
        require_text("equipment", "name", &self.name)?;
        require_text("equipment", "model", &self.model)?;
        require_text("equipment", "serial_number", &self.serial_number)
    }
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentPatch {
    pub name: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub commissioning_date: Option<NaiveDate>,
    pub status: Option<EquipmentStatus>,
}

impl EquipmentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.model.is_none()
            && self.serial_number.is_none()
            && self.commissioning_date.is_none()
            && self.status.is_none()
    }

    /// Same text rules as creation, applied to the fields being changed
    pub fn validate(&self) -> Result<()> {
        require_patch_text("equipment", "name", self.name.as_deref())?;
        require_patch_text("equipment", "model", self.model.as_deref())?;
        require_patch_text("equipment", "serial_number", self.serial_number.as_deref())
    }
}

/// Resolve an equipment reference to its display name
///
/// References are soft: a deleted equipment leaves dangling ids behind, which
/// render as [`UNKNOWN_EQUIPMENT_NAME`].
pub fn equipment_name<'a>(equipments: &'a [Equipment], id: &str) -> &'a str {
    equipments
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.name.as_str())
        .unwrap_or(UNKNOWN_EQUIPMENT_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linac(id: &str, name: &str) -> Equipment {
        Equipment {
            id: id.to_string(),
            name: name.to_string(),
            model: "Versa HD".to_string(),
            serial_number: "VHD-1".to_string(),
            commissioning_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            status: EquipmentStatus::Operational,
        }
    }

    #[test]
    fn test_equipment_name_resolves_or_falls_back() {
        let all = vec![linac("eq-1", "Linac A")];
        assert_eq!(equipment_name(&all, "eq-1"), "Linac A");
        assert_eq!(equipment_name(&all, "eq-gone"), "Inconnu");
    }

    #[test]
    fn test_empty_patch() {
        assert!(EquipmentPatch::default().is_empty());
        let patch = EquipmentPatch {
            status: Some(EquipmentStatus::Down),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_serializes_with_label() {
        let json = serde_json::to_value(linac("eq-1", "Linac A")).unwrap();
        assert_eq!(json["status"], "Opérationnel");
        assert_eq!(json["serialNumber"], "VHD-1");
        assert_eq!(json["commissioningDate"], "2023-01-15");
    }
}
