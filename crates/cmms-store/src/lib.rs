//! CMMS Store - in-memory SQLite persisted as an image on a storage medium
//!
//! Provides:
//! - Table definitions and first-run data
//! - Storage media (in-memory and file-backed) holding the database image
//! - `PersistenceContext` owning the live connection, with explicit open,
//!   recovery and snapshot export
//! - Query/command façade that persists after every write
//! - Per-entity accessors mapping rows to domain records

pub mod config;
pub mod context;
pub mod db;
pub mod errors;
pub mod facade;
pub mod image;
pub mod medium;
pub mod repo;
pub mod schema;
pub mod seed;

// Re-export key types
pub use config::StoreConfig;
pub use context::{OpenOutcome, PersistenceContext, SnapshotExport};
pub use errors::Result;
pub use medium::{FileMedium, MemoryMedium, StorageMedium};
pub use repo::{
    Accessor, DowntimeAccessor, EquipmentAccessor, MaintenanceAccessor, SparePartAccessor,
    TechnicianAccessor, TicketAccessor, WorkOrderAccessor,
};
