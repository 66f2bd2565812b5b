//! Roster positions and per-period position usage.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::Result;
use crate::util::{number_field, str_field, text_field};

/// A roster position (`[206:Center:C]`).
///
/// Equality is structural over id, name and short name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub id: String,
    pub name: String,
    pub short_name: String,
}

impl Position {
    pub fn from_payload(data: &Value) -> Result<Self> {
        Ok(Self {
            id: text_field(data, "id", "position")?,
            name: str_field(data, "name", "position")?.to_string(),
            short_name: str_field(data, "shortName", "position")?.to_string(),
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}:{}]", self.id, self.name, self.short_name)
    }
}

/// Games played at one position over a period, with the league's limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionCount {
    pub name: String,
    pub short_name: String,
    pub gp: u32,
    /// Minimum games that have to be played, when the league sets one.
    pub min: Option<u32>,
    /// Maximum games that can be played, when the league sets one.
    pub max: Option<u32>,
}

impl PositionCount {
    pub fn from_payload(data: &Value) -> Result<Self> {
        // Unset limits arrive as display strings ("-"), not numbers
        let limit = |key: &str| {
            data.get(key)
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
        };

        Ok(Self {
            name: str_field(data, "pos", "position count")?.to_string(),
            short_name: str_field(data, "posShort", "position count")?.to_string(),
            gp: number_field(data, "gp", "position count")?,
            min: limit("min"),
            max: limit("max"),
        })
    }
}

impl fmt::Display for PositionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}", self.name, self.gp)?;
        if let Some(min) = self.min {
            write!(f, ":Min({min})")?;
        }
        if let Some(max) = self.max {
            write!(f, ":Max({max})")?;
        }
        write!(f, "]")
    }
}
