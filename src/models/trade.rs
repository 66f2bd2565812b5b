//! Pending trades and their legs.

use chrono::NaiveDateTime;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{FantraxError, Result};
use crate::models::Team;
use crate::reconcile::resolve_marked_timestamp;
use crate::reference::ReferenceData;
use crate::util::{array_field, field, number_field, path, scalar_text, str_field, text_field};

#[derive(Debug, Clone)]
pub struct Trade {
    pub trade_id: String,
    pub proposed_by: Arc<Team>,
    pub proposed: NaiveDateTime,
    /// Absent until the receiving team accepts.
    pub accepted: Option<NaiveDateTime>,
    pub executed: Option<NaiveDateTime>,
    pub moves: Vec<TradeItem>,
}

/// One leg of a trade.
#[derive(Debug, Clone)]
pub struct TradeItem {
    pub from_team: Arc<Team>,
    pub to_team: Arc<Team>,
    pub asset: TradeAsset,
}

#[derive(Debug, Clone)]
pub enum TradeAsset {
    DraftPick(TradedPick),
    Player(TradedPlayer),
}

#[derive(Debug, Clone)]
pub struct TradedPick {
    pub round: u32,
    pub year: u32,
    /// Team the pick originally belonged to.
    pub owner: Arc<Team>,
}

#[derive(Debug, Clone)]
pub struct TradedPlayer {
    pub name: String,
    pub short_name: String,
    pub team_name: String,
    pub team_short_name: String,
    pub pos: String,
    pub ppg: f64,
    pub points: f64,
}

impl Trade {
    /// Map a `tradeInfoList` entry.
    ///
    /// `usefulInfo` carries the timeline as `{"name", "value"}` pairs whose
    /// values end in a zone marker instead of a year, so each is resolved
    /// against the season.
    pub fn from_payload(data: &Value, reference: &ReferenceData) -> Result<Self> {
        let info: HashMap<&str, &str> = array_field(data, "usefulInfo", "trade")?
            .iter()
            .filter_map(|i| Some((i.get("name")?.as_str()?, i.get("value")?.as_str()?)))
            .collect();
        let bounds = reference.season_bounds();
        let timestamp = |name: &str| -> Result<Option<NaiveDateTime>> {
            info.get(name)
                .map(|value| resolve_marked_timestamp(value, &bounds))
                .transpose()
        };

        Ok(Self {
            trade_id: text_field(data, "txSetId", "trade")?,
            proposed_by: reference.team(str_field(data, "creatorTeamId", "trade")?)?,
            proposed: timestamp("Proposed")?
                .ok_or_else(|| FantraxError::malformed("trade", "missing `Proposed` timestamp"))?,
            accepted: timestamp("Accepted")?,
            executed: timestamp("To be executed")?,
            moves: array_field(data, "moves", "trade")?
                .iter()
                .map(|m| TradeItem::from_payload(m, reference))
                .collect::<Result<_>>()?,
        })
    }
}

impl TradeItem {
    fn from_payload(data: &Value, reference: &ReferenceData) -> Result<Self> {
        let team_at = |keys: &[&str]| -> Result<Arc<Team>> {
            let id = scalar_text(path(data, keys, "trade move")?)
                .ok_or_else(|| FantraxError::malformed("trade move", "team id is not a scalar"))?;
            reference.team(&id)
        };

        let asset = match data.get("draftPick") {
            Some(pick) => TradeAsset::DraftPick(TradedPick {
                round: number_field(pick, "round", "draft pick")?,
                year: number_field(pick, "year", "draft pick")?,
                owner: team_at(&["draftPick", "origOwnerTeam", "id"])?,
            }),
            None => {
                let scorer = field(data, "scorer", "trade move")?;
                let team_name = str_field(scorer, "teamName", "traded player")?.to_string();
                TradeAsset::Player(TradedPlayer {
                    name: str_field(scorer, "name", "traded player")?.to_string(),
                    short_name: str_field(scorer, "shortName", "traded player")?.to_string(),
                    team_short_name: scorer
                        .get("teamShortName")
                        .and_then(scalar_text)
                        .unwrap_or_else(|| team_name.clone()),
                    team_name,
                    pos: str_field(scorer, "posShortNames", "traded player")?.to_string(),
                    ppg: number_field(data, "scorePerGame", "traded player")?,
                    points: number_field(data, "score", "traded player")?,
                })
            }
        };

        Ok(Self {
            from_team: team_at(&["from", "teamId"])?,
            to_team: team_at(&["to", "teamId"])?,
            asset,
        })
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves: Vec<String> = self.moves.iter().map(ToString::to_string).collect();
        write!(f, "{}", moves.join("\n"))
    }
}

impl fmt::Display for TradeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From: {} To: {} ", self.from_team.name, self.to_team.name)?;
        match &self.asset {
            TradeAsset::DraftPick(pick) => write!(
                f,
                "Pick: {}, Round {} ({})",
                pick.year, pick.round, pick.owner.name
            ),
            TradeAsset::Player(player) => write!(
                f,
                "Player: {} {} - {} {} {}",
                player.name, player.pos, player.team_short_name, player.ppg, player.points
            ),
        }
    }
}
