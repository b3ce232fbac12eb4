use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cmms_core::errors::{ExError, ExErrorKind};

use super::StorageMedium;
use crate::errors::Result;

/// In-process medium
///
/// Clones share the same entries, so a second context opened over a clone
/// sees what the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently stored, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("memory_medium")
                .with_message("medium lock poisoned")
        })
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
