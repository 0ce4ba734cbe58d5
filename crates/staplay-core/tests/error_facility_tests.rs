use staplay_core::errors::{ExError, ExErrorKind, StaError};

#[test]
fn test_invalid_number_maps_to_invalid_input() {
    let err = StaError::InvalidNumber {
        field: "currentStress".to_string(),
        value: "\"two\"".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
    assert_eq!(ex_err.entity(), Some("currentStress"));
    assert_eq!(ex_err.op(), Some("coerce_int"));
    assert!(ex_err.message().contains("not an integer"));
}

#[test]
fn test_missing_field_is_distinct_from_invalid_input() {
    let err = StaError::MissingField {
        field: "name".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MissingField);
    assert_ne!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.entity(), Some("name"));
}

#[test]
fn test_serde_json_errors_become_serialization() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: StaError = parse_err.into();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
    assert_eq!(ex_err.code(), "ERR_SERIALIZATION");
}

#[test]
fn test_error_codes_are_unique() {
    let kinds = [
        ExErrorKind::InvalidInput,
        ExErrorKind::MissingField,
        ExErrorKind::ConstraintViolation,
        ExErrorKind::Io,
        ExErrorKind::Serialization,
        ExErrorKind::Persistence,
        ExErrorKind::Timeout,
    ];

    let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
}
