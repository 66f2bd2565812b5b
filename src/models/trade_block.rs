//! Trading blocks: what each team advertises as available or wanted.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{FantraxError, Result};
use crate::models::{Player, Position, Team};
use crate::reference::ReferenceData;
use crate::util::{field, number_field, scalar_text, str_field};

#[derive(Debug, Clone)]
pub struct TradeBlock {
    pub team: Arc<Team>,
    pub update_date: NaiveDateTime,
    pub note: String,
    /// Players keyed by position short name.
    pub players_offered: BTreeMap<String, Vec<Player>>,
    pub players_wanted: BTreeMap<String, Vec<Player>>,
    pub positions_offered: Vec<Position>,
    pub positions_wanted: Vec<Position>,
    pub stats_offered: Vec<String>,
    pub stats_wanted: Vec<String>,
}

impl TradeBlock {
    /// Entries with this many keys or fewer carry only a team id and a
    /// timestamp; they are placeholders for teams without a block.
    pub const PLACEHOLDER_KEYS: usize = 2;

    pub fn is_placeholder(data: &Value) -> bool {
        data.as_object()
            .map_or(true, |obj| obj.len() <= Self::PLACEHOLDER_KEYS)
    }

    pub fn from_payload(data: &Value, reference: &ReferenceData) -> Result<Self> {
        let millis: i64 = number_field(field(data, "lastUpdated", "trade block")?, "date", "trade block")?;
        let update_date = DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| FantraxError::malformed("trade block", format!("timestamp out of range: {millis}")))?;

        Ok(Self {
            team: reference.team(str_field(data, "teamId", "trade block")?)?,
            update_date,
            note: data
                .pointer("/comment/body")
                .and_then(scalar_text)
                .unwrap_or_default(),
            players_offered: players_by_position(data.get("scorersOffered"), reference)?,
            players_wanted: players_by_position(data.get("scorersWanted"), reference)?,
            positions_offered: positions(data.get("positionsOffered"), reference)?,
            positions_wanted: positions(data.get("positionsWanted"), reference)?,
            stats_offered: stat_names(data.get("statsOffered")),
            stats_wanted: stat_names(data.get("statsWanted")),
        })
    }
}

/// `{"scorers": {"<position id>": [scorer, ...]}}`
fn players_by_position(
    section: Option<&Value>,
    reference: &ReferenceData,
) -> Result<BTreeMap<String, Vec<Player>>> {
    let Some(scorers) = section.and_then(|s| s.get("scorers")).and_then(Value::as_object) else {
        return Ok(BTreeMap::new());
    };
    scorers
        .iter()
        .map(|(position_id, players)| {
            let short_name = reference.position(position_id)?.short_name.clone();
            let players = players
                .as_array()
                .into_iter()
                .flatten()
                .map(|p| Player::from_payload(p, reference))
                .collect::<Result<Vec<_>>>()?;
            Ok((short_name, players))
        })
        .collect()
}

/// `{"positions": ["<position id>", ...]}`
fn positions(section: Option<&Value>, reference: &ReferenceData) -> Result<Vec<Position>> {
    section
        .and_then(|s| s.get("positions"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(scalar_text)
        .map(|id| reference.position(&id).cloned())
        .collect()
}

/// `{"stats": [{"shortName": "G"}, ...]}`
fn stat_names(section: Option<&Value>) -> Vec<String> {
    section
        .and_then(|s| s.get("stats"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|stat| stat.get("shortName").and_then(scalar_text))
        .collect()
}

impl fmt::Display for TradeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.note)
    }
}
