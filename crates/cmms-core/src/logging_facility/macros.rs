//! Canonical logging macros
//!
//! Every operation boundary in the store goes through these so that events
//! carry the same `component` / `op` / `event` fields.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use cmms_core::log_op_start;
/// log_op_start!("add_equipment");
/// log_op_start!("add_equipment", entity = "equipments");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::cmms_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::cmms_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use cmms_core::log_op_end;
/// log_op_end!("persist", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::cmms_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::cmms_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError` and records its kind and code.
///
/// # Example
///
/// ```
/// # use cmms_core::{log_op_error, errors::CmmsError};
/// let err = CmmsError::RecordNotFound { entity: "equipments".into(), id: "eq-9".into() };
/// log_op_error!("delete_equipment", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::cmms_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            message = ex_err.message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::cmms_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            message = ex_err.message(),
            $($field)*
        );
    }};
}

/// Log an operation that was skipped without touching storage
///
/// Used where a call is a documented no-op (closed context, empty patch)
/// so the condition stays observable.
#[macro_export]
macro_rules! log_op_skipped {
    ($op:expr, reason = $reason:expr) => {
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::cmms_core_types::schema::EVENT_SKIPPED,
            reason = $reason,
        );
    };
    ($op:expr, reason = $reason:expr, $($field:tt)*) => {
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::cmms_core_types::schema::EVENT_SKIPPED,
            reason = $reason,
            $($field)*
        );
    };
}
