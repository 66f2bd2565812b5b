//! Player roster statuses (active, reserve, injured reserve, free agent...).

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::Result;
use crate::util::{scalar_text, str_field, text_field};

/// Equality is structural over id, name and short name.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct Status {
    pub id: String,
    pub code: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
}

impl Status {
    pub fn from_payload(data: &Value) -> Result<Self> {
        let optional = |key: &str| data.get(key).and_then(scalar_text).unwrap_or_default();

        Ok(Self {
            id: text_field(data, "id", "status")?,
            code: optional("code"),
            name: str_field(data, "name", "status")?.to_string(),
            short_name: optional("shortName"),
            description: optional("description"),
        })
    }
}

impl PartialEq for Status {
    fn eq(&self, other: &Self) -> bool {
        (&self.id, &self.name, &self.short_name) == (&other.id, &other.name, &other.short_name)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.id, self.name)
    }
}
