use serde::{Deserialize, Serialize};

use crate::errors::{require_patch_text, require_text, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTechnician {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
}

impl NewTechnician {
    pub fn validate(&self) -> Result<()> {
        require_text("technician", "name", &self.name)?;
        require_text("technician", "email", &self.email)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicianPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
}

impl TechnicianPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.specialization.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        require_patch_text("technician", "name", self.name.as_deref())?;
        require_patch_text("technician", "email", self.email.as_deref())
    }
}
