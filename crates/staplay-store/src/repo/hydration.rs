//! Hydration layer - maps records onto rows and rows back into records
//!
//! Rows are copied field by field into the typed records. Values already in
//! the store were validated on the way in, so nothing is re-validated here.

use crate::repo::collection::{Collection, CollectionRecord, PLAYERS, TRACKERS, TRAITS};
use rusqlite::types::ToSql;
use rusqlite::Row;
use staplay_core::{GeneralInfo, NamedInfo, PlayerInfo, TrackerInfo};

/// Columns of the general info row, key first
pub const GENERAL_COLUMNS: &str = "id, text, ship_name, ship_model, momentum, active_alert";

/// Hydrate the general info row
pub fn general_from_row(row: &Row<'_>) -> rusqlite::Result<GeneralInfo> {
    Ok(GeneralInfo {
        id: row.get(0)?,
        text: row.get(1)?,
        ship_name: row.get(2)?,
        ship_model: row.get(3)?,
        momentum: row.get(4)?,
        active_alert: row.get(5)?,
    })
}

impl CollectionRecord for NamedInfo {
    const COLLECTION: Collection = TRAITS;
    const COLUMNS: &'static [&'static str] = &["name"];

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn bind_values(&self) -> Vec<&dyn ToSql> {
        vec![&self.name as &dyn ToSql]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(NamedInfo {
            id: Some(row.get(0)?),
            name: row.get(1)?,
        })
    }
}

impl CollectionRecord for PlayerInfo {
    const COLLECTION: Collection = PLAYERS;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "current_stress",
        "max_stress",
        "pips",
        "border_color",
        "image",
    ];

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn bind_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name as &dyn ToSql,
            &self.current_stress,
            &self.max_stress,
            &self.pips,
            &self.border_color,
            &self.image,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PlayerInfo {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            current_stress: row.get(2)?,
            max_stress: row.get(3)?,
            pips: row.get(4)?,
            border_color: row.get(5)?,
            image: row.get(6)?,
        })
    }
}

impl CollectionRecord for TrackerInfo {
    const COLLECTION: Collection = TRACKERS;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "attribute",
        "department",
        "progress_track",
        "resistance",
        "complication_range",
    ];

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn bind_values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name as &dyn ToSql,
            &self.attribute,
            &self.department,
            &self.progress_track,
            &self.resistance,
            &self.complication_range,
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TrackerInfo {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            attribute: row.get(2)?,
            department: row.get(3)?,
            progress_track: row.get(4)?,
            resistance: row.get(5)?,
            complication_range: row.get(6)?,
        })
    }
}
