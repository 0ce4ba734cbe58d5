use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{as_object, optional_blob, required_int, required_str};
use crate::errors::Result;

/// The well-known key of the single general info row
pub const GENERAL_INFO_KEY: i64 = 0;

/// GeneralInfo - the single record describing the current session
///
/// There is only ever one of these in a store. Its key is fixed at
/// [`GENERAL_INFO_KEY`] and is forced back to that value on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralInfo {
    /// Always [`GENERAL_INFO_KEY`] once read from or written to a store
    pub id: i64,

    /// Free text shown on the general screen
    pub text: String,

    /// Name of the players' ship
    pub ship_name: String,

    /// Optional 3D model of the ship
    #[serde(with = "super::blob", default, skip_serializing_if = "Option::is_none")]
    pub ship_model: Option<Vec<u8>>,

    /// Amount of momentum in the players' pool
    pub momentum: i64,

    /// Label of the active alert
    pub active_alert: String,
}

impl GeneralInfo {
    /// Create a new GeneralInfo with no ship model
    pub fn new(
        text: impl Into<String>,
        ship_name: impl Into<String>,
        momentum: i64,
        active_alert: impl Into<String>,
    ) -> Self {
        Self {
            id: GENERAL_INFO_KEY,
            text: text.into(),
            ship_name: ship_name.into(),
            ship_model: None,
            momentum,
            active_alert: active_alert.into(),
        }
    }

    /// Attach a ship model blob
    pub fn with_ship_model(mut self, model: Vec<u8>) -> Self {
        self.ship_model = Some(model);
        self
    }

    /// Build from loosely typed input
    ///
    /// Expects an object with `text`, `shipName`, `momentum`, `activeAlert`
    /// and an optional base64 `shipModel`. Any `id` in the input is ignored.
    pub fn from_loose(value: &Value) -> Result<Self> {
        let obj = as_object("generalInfo", value)?;
        Ok(Self {
            id: GENERAL_INFO_KEY,
            text: required_str(obj, "text")?,
            ship_name: required_str(obj, "shipName")?,
            ship_model: optional_blob(obj, "shipModel")?,
            momentum: required_int(obj, "momentum")?,
            active_alert: required_str(obj, "activeAlert")?,
        })
    }
}
