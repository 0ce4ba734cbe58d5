use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{as_object, optional_blob, optional_int, required_int, required_str};
use super::named::Named;
use crate::errors::Result;

/// PlayerInfo - one player character on the roster
///
/// Player names are not unique; two players may share a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    /// Store-assigned key; `None` until the record has been written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Player character's name
    pub name: String,

    pub current_stress: i64,

    pub max_stress: i64,

    /// Pips text shown next to the stress track
    pub pips: String,

    /// Border color option
    pub border_color: String,

    /// Portrait of the player's character
    #[serde(with = "super::blob", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
}

impl PlayerInfo {
    pub fn new(
        name: impl Into<String>,
        current_stress: i64,
        max_stress: i64,
        pips: impl Into<String>,
        border_color: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            current_stress,
            max_stress,
            pips: pips.into(),
            border_color: border_color.into(),
            image: None,
        }
    }

    /// Attach a portrait blob
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    /// Build from loosely typed input
    ///
    /// `id`, `currentStress` and `maxStress` may be numbers or numeric strings.
    pub fn from_loose(value: &Value) -> Result<Self> {
        let obj = as_object("player", value)?;
        Ok(Self {
            id: optional_int(obj, "id")?,
            name: required_str(obj, "name")?,
            current_stress: required_int(obj, "currentStress")?,
            max_stress: required_int(obj, "maxStress")?,
            pips: required_str(obj, "pips")?,
            border_color: required_str(obj, "borderColor")?,
            image: optional_blob(obj, "image")?,
        })
    }
}

impl Named for PlayerInfo {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StaError;
    use serde_json::json;

    #[test]
    fn test_from_loose_coerces_stress_fields() {
        let player = PlayerInfo::from_loose(&json!({
            "id": "7",
            "name": "Kirk",
            "currentStress": "2",
            "maxStress": 6,
            "pips": "●●",
            "borderColor": "#f00",
        }))
        .unwrap();

        assert_eq!(player.id, Some(7));
        assert_eq!(player.current_stress, 2);
        assert_eq!(player.max_stress, 6);
        assert_eq!(player.image, None);
    }

    #[test]
    fn test_from_loose_reports_the_bad_field() {
        let err = PlayerInfo::from_loose(&json!({
            "name": "Spock",
            "currentStress": 1,
            "maxStress": "many",
            "pips": "",
            "borderColor": "",
        }))
        .unwrap_err();

        assert!(matches!(err, StaError::InvalidNumber { ref field, .. } if field == "maxStress"));
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let player = PlayerInfo::new("Uhura", 0, 5, "", "blue").with_image(vec![1, 2, 3]);
        let value = serde_json::to_value(&player).unwrap();
        assert_eq!(value["currentStress"], json!(0));
        assert_eq!(value["borderColor"], json!("blue"));
        assert_eq!(value["image"], json!("AQID"));
        assert!(value.get("id").is_none());
    }
}
