pub mod info;
pub mod players;
pub mod reset;
pub mod trackers;
pub mod traits;

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use staplay_core::{ExError, StaError};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Read a JSON file holding an array of loosely typed records
pub fn read_records<T>(
    path: &Path,
    parse: fn(&Value) -> staplay_core::Result<T>,
) -> Result<Vec<T>, ExError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(staplay_core::ExErrorKind::Io)
            .with_op("read_records")
            .with_entity(path.display().to_string())
            .with_message(e.to_string())
    })?;

    let value: Value = serde_json::from_str(&text).map_err(StaError::from)?;
    let items = value.as_array().ok_or_else(|| StaError::InvalidField {
        field: path.display().to_string(),
        reason: "expected a JSON array of records".to_string(),
    })?;

    items
        .iter()
        .map(|item| parse(item).map_err(ExError::from))
        .collect()
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
