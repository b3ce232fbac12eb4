use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::{Priority, WorkOrderStatus};
use crate::errors::{require_patch_text, require_text, Result};

/// A unit of corrective work, optionally assigned to a technician
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    pub equipment_id: String,
    pub description: String,
    pub technician_id: Option<String>,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub created_date: NaiveDate,
    pub completed_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkOrder {
    pub equipment_id: String,
    pub description: String,
    pub technician_id: Option<String>,
    pub priority: Priority,
}

impl NewWorkOrder {
    pub fn validate(&self) -> Result<()> {
        require_text("work_order", "equipment_id", &self.equipment_id)?;
        require_text("work_order", "description", &self.description)
    }
}

/// `technician_id: Some(None)` unassigns the work order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkOrderPatch {
    pub equipment_id: Option<String>,
    pub description: Option<String>,
    pub technician_id: Option<Option<String>>,
    pub priority: Option<Priority>,
}

impl WorkOrderPatch {
    pub fn is_empty(&self) -> bool {
        self.equipment_id.is_none()
            && self.description.is_none()
            && self.technician_id.is_none()
            && self.priority.is_none()
    }

    /// Same text rules as creation, applied to the fields being changed
    pub fn validate(&self) -> Result<()> {
        require_patch_text("work_order", "equipment_id", self.equipment_id.as_deref())?;
        require_patch_text("work_order", "description", self.description.as_deref())
    }
}

/// Blank technician references mean "unassigned"
pub fn assigned_technician(technician_id: Option<String>) -> Option<String> {
    technician_id.filter(|id| !id.trim().is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_technician_is_unassigned() {
        assert_eq!(assigned_technician(Some(String::new())), None);
        assert_eq!(assigned_technician(Some("  ".to_string())), None);
        assert_eq!(assigned_technician(None), None);
        assert_eq!(
            assigned_technician(Some("tech-001".to_string())),
            Some("tech-001".to_string())
        );
    }
}
