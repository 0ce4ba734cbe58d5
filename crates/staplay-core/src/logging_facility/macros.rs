//! Operation boundary macros
//!
//! Extra `key = value` fields may follow the fixed arguments of each macro;
//! they are passed through to the `tracing` event unchanged.

/// Log the start of an operation
///
/// ```
/// # use staplay_core::log_op_start;
/// log_op_start!("replace_all");
/// log_op_start!("replace_all", collection = "traits");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::staplay_core_types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use staplay_core::log_op_end;
/// log_op_end!("replace_all", duration_ms = 42_u64);
/// log_op_end!("replace_all", duration_ms = 42_u64, inserted = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::staplay_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        )
    };
}

/// Log the failed end of an operation
///
/// `$err` is anything convertible into `ExError`; the event carries its
/// stable kind and code plus the rendered message.
///
/// ```
/// # use staplay_core::{log_op_error, errors::{ExError, ExErrorKind}};
/// let err = ExError::new(ExErrorKind::ConstraintViolation).with_entity("traits");
/// log_op_error!("replace_all", err, duration_ms = 10_u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::staplay_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            error = %ex_err,
            $($($field)+)?
        )
    }};
}
