//! Lifecycle macros
//!
//! Every macro stamps `component`, `op` and `event` with the keys from
//! `captrack_core_types::schema`. Extra `key = value` fields pass through
//! to `tracing`.

/// Emit the `start` event for `op`
///
/// ```
/// # use captrack_core::log_op_start;
/// log_op_start!("plan_add");
/// log_op_start!("plan_add", capability_id = "c1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = captrack_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = captrack_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Emit the `end` event for `op` with its duration
///
/// ```
/// # use captrack_core::log_op_end;
/// log_op_end!("plan_add", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = captrack_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = captrack_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Emit the `end_error` event for `op`
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are attached as `err_kind` and `err_code`.
///
/// ```
/// # use captrack_core::{log_op_error, errors::TrackerError};
/// let err = TrackerError::MilestoneNotFound { milestone_id: "m1".to_string() };
/// log_op_error!("capability_assign_milestone", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = captrack_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            message = ex_err.message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = captrack_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            message = ex_err.message(),
            $($field)*
        );
    }};
}
