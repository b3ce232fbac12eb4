use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::MaintenanceStatus;
use crate::errors::{require_patch_text, require_text, Result};

/// A preventive-maintenance task scheduled for a piece of equipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub id: String,
    pub task: String,
    pub equipment_id: String,
    pub due_date: NaiveDate,
    pub status: MaintenanceStatus,
    pub completed_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceTask {
    pub task: String,
    pub equipment_id: String,
    pub due_date: NaiveDate,
    pub status: MaintenanceStatus,
    pub completed_date: Option<NaiveDate>,
}

impl NewMaintenanceTask {
    pub fn validate(&self) -> Result<()> {
        require_text("maintenance_task", "task", &self.task)?;
        require_text("maintenance_task", "equipment_id", &self.equipment_id)
    }
}

/// `completed_date: Some(None)` clears the stored date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceTaskPatch {
    pub task: Option<String>,
    pub equipment_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<MaintenanceStatus>,
    pub completed_date: Option<Option<NaiveDate>>,
}

impl MaintenanceTaskPatch {
    pub fn is_empty(&self) -> bool {
        self.task.is_none()
            && self.equipment_id.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
            && self.completed_date.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        require_patch_text("maintenance_task", "task", self.task.as_deref())?;
        require_patch_text("maintenance_task", "equipment_id", self.equipment_id.as_deref())
    }
}
