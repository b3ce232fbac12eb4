//! CMMS Core - domain model for the maintenance-management store
//!
//! Provides:
//! - Domain records for equipment, tickets, downtimes, maintenance tasks,
//!   work orders, spare parts and technicians
//! - One enum per status/priority domain with storage codes and display labels
//! - Key generation and date conventions
//! - Error and logging facilities shared with the store
//! - CSV rendering and the dashboard summary

pub mod csv;
pub mod dashboard;
pub mod errors;
pub mod ids;
pub mod logging_facility;
pub mod model;
pub mod time;

// Used by the logging macros
pub use cmms_core_types;

pub use errors::{CmmsError, ExError, ExErrorKind, Result};
pub use model::{
    Downtime, Equipment, MaintenanceTask, SparePart, Technician, Ticket, WorkOrder,
};
