//! Real-world games shown on a roster, from one player's point of view.

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;
use std::fmt;

use crate::error::{FantraxError, Result};
use crate::models::Player;
use crate::reconcile::{resolve_day_label, SeasonBounds};
use crate::util::{scalar_text, str_field};

const LINE_BREAK: &str = "<br/>";
const FINAL_SUFFIX: &str = " F";

#[derive(Debug, Clone)]
pub struct Game {
    pub id: String,
    pub date: NaiveDate,
    /// Short name of the opposing team.
    pub opponent: String,
    /// Start time while the game has not been played.
    pub time: Option<NaiveTime>,
    pub home: bool,
    pub away: bool,
    /// Short name of the viewing player's team.
    pub team_short_name: String,
}

impl Game {
    /// Map a schedule cell for `player` on the game day `day_label`
    /// (`"Fri 10/18"`).
    ///
    /// Upcoming games read `"@BOS<br/>Fri 7:00PM"`; finished games read
    /// `"TBL 3<br/>@BOS 2 F"`.
    pub fn from_cell(player: &Player, day_label: &str, cell: &Value, bounds: &SeasonBounds) -> Result<Self> {
        let id = cell
            .get("eventId")
            .and_then(scalar_text)
            .ok_or_else(|| FantraxError::malformed("game", "missing field `eventId`"))?;
        let date = resolve_day_label(day_label, bounds)?;
        let content = str_field(cell, "content", "game")?;
        let content = content.strip_suffix(FINAL_SUFFIX).unwrap_or(content);

        let Some((first, second)) = content.split_once(LINE_BREAK) else {
            return Err(FantraxError::malformed("game", format!("unrecognized content {content:?}")));
        };
        let own = player.team_short_name.as_str();

        let (opponent, home_team, time) = if second.contains(':') {
            let time = second
                .split_whitespace()
                .nth(1)
                .ok_or_else(|| FantraxError::malformed("game", format!("no start time in {second:?}")))?;
            let time = NaiveTime::parse_from_str(time, "%I:%M%p")?;
            match first.strip_prefix('@') {
                Some(opponent) => (opponent.to_string(), own.to_string(), Some(time)),
                None => (first.to_string(), first.to_string(), Some(time)),
            }
        } else {
            let home_team = team_letters(first);
            let away_team = team_letters(second);
            let opponent = if home_team == own { away_team } else { home_team.clone() };
            (opponent, home_team, None)
        };

        Ok(Self {
            id,
            date,
            opponent,
            time,
            home: home_team == own,
            away: home_team != own,
            team_short_name: own.to_string(),
        })
    }
}

/// Team abbreviation from a score line (`"@BOS 2"` -> `"BOS"`).
fn team_letters(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_digit() && *c != ' ' && *c != '@')
        .collect()
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.home {
            write!(f, "[{}:{} @{}", self.id, self.opponent, self.team_short_name)?;
        } else {
            write!(f, "[{}:{} @{}", self.id, self.team_short_name, self.opponent)?;
        }
        if let Some(time) = self.time {
            write!(f, " {time}")?;
        }
        write!(f, "]")
    }
}
