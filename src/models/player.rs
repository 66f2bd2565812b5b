//! Players (scorers) as they appear across rosters, trades and live scoring.

use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{FantraxError, Result};
use crate::models::{Position, Team};
use crate::reference::ReferenceData;
use crate::util::{array_field, scalar_text, str_field, text_field};

/// Icon type ids the server attaches to a scorer.
const ICON_DAY_TO_DAY: &str = "1";
const ICON_INJURED_RESERVE: &str = "2";
const ICON_SUSPENDED: &str = "6";
const ICON_OUT: &str = "30";

#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub team_name: String,
    /// Falls back to the full team name when the server omits it.
    pub team_short_name: String,
    /// Display list such as `"C,W"`.
    pub pos_short_name: String,
    /// Positions the player is listed at, without flex slots.
    pub positions: Vec<Position>,
    /// Every roster position the player can be placed into.
    pub all_positions: Vec<Position>,
    pub day_to_day: bool,
    pub out: bool,
    pub injured_reserve: bool,
    pub suspended: bool,
    /// Live scoring only: the fantasy team the points count for.
    pub team: Option<Arc<Team>>,
    pub points: Option<f64>,
    pub points_date: Option<NaiveDate>,
}

impl Player {
    /// Build from a `scorer` object.
    pub fn from_payload(data: &Value, reference: &ReferenceData) -> Result<Self> {
        let team_name = str_field(data, "teamName", "player")?.to_string();
        let positions = |key: &str| -> Result<Vec<Position>> {
            array_field(data, key, "player")?
                .iter()
                .map(|raw| {
                    let id = scalar_text(raw).ok_or_else(|| {
                        FantraxError::malformed("player", format!("position id in `{key}` is not a scalar"))
                    })?;
                    reference.position(&id).cloned()
                })
                .collect()
        };

        let mut player = Self {
            id: text_field(data, "scorerId", "player")?,
            name: str_field(data, "name", "player")?.to_string(),
            short_name: str_field(data, "shortName", "player")?.to_string(),
            team_short_name: data
                .get("teamShortName")
                .and_then(scalar_text)
                .unwrap_or_else(|| team_name.clone()),
            team_name,
            pos_short_name: str_field(data, "posShortNames", "player")?.to_string(),
            positions: positions("posIdsNoFlex")?,
            all_positions: positions("posIds")?,
            day_to_day: false,
            out: false,
            injured_reserve: false,
            suspended: false,
            team: None,
            points: None,
            points_date: None,
        };

        let icons = data.get("icons").and_then(Value::as_array);
        for icon in icons.into_iter().flatten() {
            match icon.get("typeId").and_then(scalar_text).as_deref() {
                Some(ICON_DAY_TO_DAY) => player.day_to_day = true,
                Some(ICON_INJURED_RESERVE) => player.injured_reserve = true,
                Some(ICON_OUT) => player.out = true,
                Some(ICON_SUSPENDED) => player.suspended = true,
                _ => {}
            }
        }

        Ok(player)
    }

    /// Day-to-day, out, or on injured reserve. Suspensions do not count.
    pub fn injured(&self) -> bool {
        self.day_to_day || self.out || self.injured_reserve
    }

    /// Copy of this player carrying one team's points for a scoring date.
    pub fn with_points(&self, team: Arc<Team>, points: f64, points_date: NaiveDate) -> Self {
        Self {
            team: Some(team),
            points: Some(points),
            points_date: Some(points_date),
            ..self.clone()
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
