//! Canonical logging macros
//!
//! Callers must depend on `superstore-core-types`, which owns the event names.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use superstore_core::log_op_start;
/// log_op_start!("set");
/// log_op_start!("set", key = "theme");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = superstore_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = superstore_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use superstore_core::log_op_end;
/// log_op_end!("set", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = superstore_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = superstore_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `err` is borrowed; it must be an `ExError`.
///
/// # Example
///
/// ```
/// # use superstore_core::log_op_error;
/// # use superstore_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Io).with_message("disk full");
/// log_op_error!("set", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: &$crate::errors::ExError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = superstore_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: &$crate::errors::ExError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = superstore_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}
