//! Boundary logging macros
//!
//! Every boundary operation emits one `start` event and then exactly one of
//! `end` or `end_error`, all carrying `component`, `op` and `event`. End
//! events also carry `duration_ms`.

/// Shared expansion for the boundary macros. Not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $event:expr, $op:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of a boundary operation
///
/// ```
/// # use logdelta_core::log_op_start;
/// log_op_start!("load_snapshot");
/// log_op_start!("load_snapshot", source = "logs/a.csv");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $crate::schema::EVENT_START, $op $(, $($field)*)?)
    };
}

/// Log the successful end of a boundary operation
///
/// ```
/// # use logdelta_core::log_op_end;
/// log_op_end!("load_snapshot", duration_ms = 42, rows = 3u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $crate::schema::EVENT_END,
            $op,
            duration_ms = $duration $(, $($field)*)?
        )
    };
}

/// Log the failed end of a boundary operation
///
/// `$err` is converted into [`ExError`](crate::errors::ExError) so the
/// event carries the stable `err.code` and `err.kind`.
///
/// ```
/// # use logdelta_core::{log_op_error, errors::LogDeltaError};
/// let err = LogDeltaError::HeaderMissing { path: "a.csv".to_string() };
/// log_op_error!("load_snapshot", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $crate::schema::EVENT_END_ERROR,
            $op,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            error = %ex_err $(, $($field)*)?
        )
    }};
}
