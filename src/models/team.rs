//! Fantasy teams.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::Result;
use crate::util::{scalar_text, str_field};

/// A fantasy team in the league.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: String,
    /// Largest logo the server offers; empty when it offers none.
    pub logo: String,
}

impl Team {
    /// Build from a team-info object; the id is supplied separately because
    /// snapshots come both as id-keyed maps and as lists.
    pub fn from_payload(id: impl Into<String>, data: &Value) -> Result<Self> {
        let logo = ["logoUrl512", "logoUrl256", "logoUrl128"]
            .iter()
            .find_map(|key| data.get(*key).and_then(scalar_text))
            .unwrap_or_default();

        Ok(Self {
            id: id.into(),
            name: str_field(data, "name", "team")?.to_string(),
            short_name: str_field(data, "shortName", "team")?.to_string(),
            logo,
        })
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
