//! Core types shared across CMMS facilities
//!
//! Holds the canonical field keys and event names used by the logging
//! facility and by error reporting, so every crate emits the same shape.

pub mod schema;
