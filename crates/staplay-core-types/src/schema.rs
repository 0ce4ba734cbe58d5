//! Field and event names shared by the logging macros, the capture layer
//! and tests
//!
//! The macros in `staplay_core` spell these names out as `tracing` field
//! keys; anything that reads events back should go through these constants.

/// Module path of the code that emitted the event
pub const FIELD_COMPONENT: &str = "component";
/// Operation name, e.g. `replace_all`
pub const FIELD_OP: &str = "op";
/// One of [`EVENT_START`], [`EVENT_END`], [`EVENT_END_ERROR`]
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
/// Table the operation touched
pub const FIELD_COLLECTION: &str = "collection";

pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
/// Rendered `ExError` on an end_error event
pub const FIELD_ERROR: &str = "error";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        let events = [EVENT_START, EVENT_END, EVENT_END_ERROR];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_error_fields_share_a_prefix() {
        assert!(FIELD_ERR_KIND.starts_with("err."));
        assert!(FIELD_ERR_CODE.starts_with("err."));
        assert!(!FIELD_ERROR.contains('.'));
    }
}
