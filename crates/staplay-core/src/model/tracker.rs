use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{as_object, int_or, optional_int, required_int, required_str};
use super::named::Named;
use crate::errors::Result;

/// TrackerInfo - a combat or extended task progress tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerInfo {
    /// Store-assigned key; `None` until the record has been written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Tracker name, unique among trackers
    pub name: String,

    /// The applicable attribute
    pub attribute: String,

    /// The applicable department
    pub department: String,

    /// Amount of progress left to work through
    pub progress_track: i64,

    #[serde(default)]
    pub resistance: i64,

    #[serde(default)]
    pub complication_range: i64,
}

impl TrackerInfo {
    /// Create a tracker with no resistance and no complication range
    pub fn new(
        name: impl Into<String>,
        attribute: impl Into<String>,
        department: impl Into<String>,
        progress_track: i64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            attribute: attribute.into(),
            department: department.into(),
            progress_track,
            resistance: 0,
            complication_range: 0,
        }
    }

    pub fn with_resistance(mut self, resistance: i64) -> Self {
        self.resistance = resistance;
        self
    }

    pub fn with_complication_range(mut self, complication_range: i64) -> Self {
        self.complication_range = complication_range;
        self
    }

    /// Build from loosely typed input
    ///
    /// `resistance` and `complicationRange` default to 0 when absent.
    pub fn from_loose(value: &Value) -> Result<Self> {
        let obj = as_object("tracker", value)?;
        Ok(Self {
            id: optional_int(obj, "id")?,
            name: required_str(obj, "name")?,
            attribute: required_str(obj, "attribute")?,
            department: required_str(obj, "department")?,
            progress_track: required_int(obj, "progressTrack")?,
            resistance: int_or(obj, "resistance", 0)?,
            complication_range: int_or(obj, "complicationRange", 0)?,
        })
    }
}

impl Named for TrackerInfo {
    fn name(&self) -> &str {
        &self.name
    }
}
