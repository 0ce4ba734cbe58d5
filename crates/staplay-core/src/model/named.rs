use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{as_object, optional_int, required_str};
use crate::errors::Result;

/// Records identified by a display name
pub trait Named {
    fn name(&self) -> &str;
}

/// NamedInfo - a scene trait, nothing but a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedInfo {
    /// Store-assigned key; `None` until the record has been written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub name: String,
}

impl NamedInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Build from loosely typed input: a bare string or `{ "name": ... }`
    pub fn from_loose(value: &Value) -> Result<Self> {
        if let Value::String(name) = value {
            return Ok(Self::new(name.clone()));
        }
        let obj = as_object("trait", value)?;
        Ok(Self {
            id: optional_int(obj, "id")?,
            name: required_str(obj, "name")?,
        })
    }
}

impl Named for NamedInfo {
    fn name(&self) -> &str {
        &self.name
    }
}
