//! Store configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Fixed medium key the database image is stored under
pub const DEFAULT_STORAGE_KEY: &str = "cmms_database";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the file-backed medium
    pub data_dir: PathBuf,
    /// Key of the persisted database image
    pub storage_key: String,
    /// Let `open_or_recover` replace an unreadable image with a fresh seeded
    /// database (the unreadable payload is always kept aside first)
    pub recover_on_corrupt: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".cmms"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            recover_on_corrupt: false,
        }
    }
}
