use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cmms_core::errors::{ExError, ExErrorKind};

use super::atomic::atomic_write;
use super::StorageMedium;
use crate::errors::{io_error, Result};

/// Medium storing one `<key>.json` file per key under a data directory
#[derive(Debug, Clone)]
pub struct FileMedium {
    root: PathBuf,
}

impl FileMedium {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`
    ///
    /// Keys are restricted to `[A-Za-z0-9_.-]` so they cannot escape the root.
    pub fn entry_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("file_medium_key")
                .with_message(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl StorageMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read_medium_entry", e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        atomic_write(&self.entry_path(key)?, value.as_bytes())
    }
}
