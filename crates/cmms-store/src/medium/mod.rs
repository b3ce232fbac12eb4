//! Durable key/value storage for the database image
//!
//! Provides:
//! - `StorageMedium` trait (string values by key)
//! - In-memory medium, shareable across contexts to simulate a reload
//! - File-backed medium with atomic temp→rename writes

mod atomic;
mod file;
mod memory;

pub use file::FileMedium;
pub use memory::MemoryMedium;

use crate::errors::Result;

/// Key/value storage the persisted image lives in
pub trait StorageMedium {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`, creating it if absent
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
