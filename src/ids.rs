//! ID types for Fantrax leagues.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FantraxError;

/// Type-safe wrapper for Fantrax League IDs.
///
/// Fantrax league ids are opaque alphanumeric strings (for example
/// `"jdaffngkjfngjkdf"`), sent both as the `leagueId` query parameter and
/// inside every message of a request envelope.
///
/// # Examples
///
/// ```rust
/// use fantrax_api::LeagueId;
///
/// let league_id = LeagueId::new("abc123");
/// assert_eq!(league_id.as_str(), "abc123");
/// assert_eq!(league_id.to_string(), "abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueId(pub String);

impl LeagueId {
    /// Create a new LeagueId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LeagueId {
    type Err = FantraxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FantraxError::MissingLeagueId {
                env_var: crate::LEAGUE_ID_ENV_VAR.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}
