//! League-wide reference data shared by every mapped object.
//!
//! Built from one combined init fetch (see `fantrax::api::init_methods`) and
//! replaced wholesale on reset. The team list is the only part refreshed in
//! place, through `apply_team_snapshot`; the id lookup over it is rebuilt
//! lazily on first use after each refresh.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

use crate::error::{FantraxError, Result};
use crate::ids::LeagueId;
use crate::models::{Position, ScoringPeriod, Status, Team};
use crate::reconcile::{day_label_key, parse_period_list_entry, SeasonBounds};
use crate::util::{array_field, field, number_field, path, scalar_text, str_field};


/// Name of the synthetic whole-season entry in the scoring period list.
const FULL_SEASON: &str = "Full Season";

#[derive(Debug, Clone)]
pub struct ReferenceData {
    league_id: LeagueId,
    name: String,
    year: String,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    positions: HashMap<String, Position>,
    statuses: HashMap<String, Status>,
    scoring_periods: BTreeMap<u32, ScoringPeriod>,
    scoring_dates: BTreeMap<u32, NaiveDate>,
    teams: Vec<Arc<Team>>,
    team_lookup: OnceLock<HashMap<String, Arc<Team>>>,
    period_range_lookup: OnceLock<HashMap<String, u32>>,
}

impl ReferenceData {
    /// Build from the five init responses, in `init_methods` order: league
    /// info, status ref objects, live scoring shell, roster GAMES_PER_POS view,
    /// roster STATS view.
    pub fn from_init_responses(league_id: LeagueId, responses: &[Value]) -> Result<Self> {
        let [league_info, status_refs, live_scoring, games_per_pos, roster_stats] = responses else {
            return Err(FantraxError::malformed(
                "league init",
                format!("expected 5 responses, got {}", responses.len()),
            ));
        };

        let settings = field(league_info, "fantasySettings", "league info")?;
        let name = str_field(settings, "leagueName", "league info")?.to_string();
        let year = settings
            .get("subtitle")
            .and_then(scalar_text)
            .unwrap_or_default();
        let season = field(settings, "season", "league info")?;
        let start_date = timestamp_from_millis(number_field(season, "startDate", "league season")?)?;
        let end_date = timestamp_from_millis(number_field(season, "endDate", "league season")?)?;

        let positions = field(league_info, "positionMap", "league info")?
            .as_object()
            .ok_or_else(|| FantraxError::malformed("league info", "positionMap is not an object"))?
            .iter()
            .map(|(id, data)| Ok((id.clone(), Position::from_payload(data)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        let statuses = field(status_refs, "allObjs", "status refs")?
            .as_object()
            .ok_or_else(|| FantraxError::malformed("status refs", "allObjs is not an object"))?
            .iter()
            .filter(|(_, data)| data.get("name").is_some())
            .map(|(id, data)| Ok((id.clone(), Status::from_payload(data)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        let scoring_dates = build_scoring_dates(
            array_field(live_scoring, "dates", "live scoring")?,
            path(roster_stats, &["displayedLists", "periodList"], "roster stats")?,
        )?;

        let scoring_periods = array_field(
            field(games_per_pos, "displayedLists", "roster games per position")?,
            "scoringPeriodList",
            "roster games per position",
        )?
        .iter()
        .filter(|p| p.get("name").and_then(Value::as_str) != Some(FULL_SEASON))
        .map(|p| {
            let period = ScoringPeriod::from_payload(league_id.clone(), p)?;
            Ok((period.number, period))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

        let mut reference = Self {
            league_id,
            name,
            year,
            start_date,
            end_date,
            positions,
            statuses,
            scoring_periods,
            scoring_dates,
            teams: Vec::new(),
            team_lookup: OnceLock::new(),
            period_range_lookup: OnceLock::new(),
        };
        reference.apply_team_snapshot(field(games_per_pos, "fantasyTeams", "roster games per position")?)?;

        info!(
            league = %reference.name,
            season = %reference.year,
            teams = reference.teams.len(),
            periods = reference.scoring_periods.len(),
            scoring_days = reference.scoring_dates.len(),
            "Loaded league reference data"
        );

        Ok(reference)
    }

    /// Replace the team list from a team-info payload, either a list of team
    /// objects carrying `id` or an object keyed by team id.
    pub fn apply_team_snapshot(&mut self, data: &Value) -> Result<()> {
        let teams = match data {
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    let id = scalar_text(field(item, "id", "team snapshot")?).ok_or_else(|| {
                        FantraxError::malformed("team snapshot", "team id is not a scalar")
                    })?;
                    Team::from_payload(id, item)
                })
                .collect::<Result<Vec<_>>>()?,
            Value::Object(map) => map
                .iter()
                .map(|(id, item)| Team::from_payload(id.clone(), item))
                .collect::<Result<Vec<_>>>()?,
            _ => {
                return Err(FantraxError::malformed(
                    "team snapshot",
                    "expected a list or an object of teams",
                ))
            }
        };

        self.teams = teams.into_iter().map(Arc::new).collect();
        self.team_lookup = OnceLock::new();
        Ok(())
    }

    pub fn league_id(&self) -> &LeagueId {
        &self.league_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Season label such as `"2024-25 NHL"`.
    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn start_date(&self) -> NaiveDateTime {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDateTime {
        self.end_date
    }

    pub fn season_bounds(&self) -> SeasonBounds {
        SeasonBounds::new(self.start_date, self.end_date)
    }

    pub fn positions(&self) -> &HashMap<String, Position> {
        &self.positions
    }

    pub fn position(&self, id: &str) -> Result<&Position> {
        self.positions
            .get(id)
            .ok_or_else(|| FantraxError::UnknownPosition { id: id.to_string() })
    }

    pub fn statuses(&self) -> &HashMap<String, Status> {
        &self.statuses
    }

    /// Canonical scoring periods keyed by period number.
    pub fn scoring_periods(&self) -> &BTreeMap<u32, ScoringPeriod> {
        &self.scoring_periods
    }

    pub fn scoring_period(&self, number: u32) -> Option<&ScoringPeriod> {
        self.scoring_periods.get(&number)
    }

    /// Scoring period whose range (`"YYYY-MM-DD - YYYY-MM-DD"`) matches exactly.
    pub fn scoring_period_by_range(&self, range: &str) -> Option<&ScoringPeriod> {
        let lookup = self.period_range_lookup.get_or_init(|| {
            self.scoring_periods
                .values()
                .map(|p| (p.range(), p.number))
                .collect()
        });
        lookup.get(range).and_then(|n| self.scoring_periods.get(n))
    }

    /// Scoring days keyed by daily period number.
    pub fn scoring_dates(&self) -> &BTreeMap<u32, NaiveDate> {
        &self.scoring_dates
    }

    pub fn scoring_date(&self, daily_period: u32) -> Option<NaiveDate> {
        self.scoring_dates.get(&daily_period).copied()
    }

    pub fn is_scoring_date(&self, date: NaiveDate) -> bool {
        self.scoring_dates.values().any(|d| *d == date)
    }

    pub fn teams(&self) -> &[Arc<Team>] {
        &self.teams
    }

    /// Teams keyed by id.
    pub fn team_lookup(&self) -> &HashMap<String, Arc<Team>> {
        self.team_lookup.get_or_init(|| {
            self.teams
                .iter()
                .map(|t| (t.id.clone(), Arc::clone(t)))
                .collect()
        })
    }

    /// Team by exact id, else the first team whose name contains the
    /// identifier case-insensitively.
    pub fn team(&self, identifier: &str) -> Result<Arc<Team>> {
        if let Some(team) = self.team_lookup().get(identifier) {
            return Ok(Arc::clone(team));
        }

        let needle = identifier.to_lowercase();
        self.teams
            .iter()
            .find(|t| t.name.to_lowercase().contains(&needle))
            .cloned()
            .ok_or_else(|| FantraxError::TeamNotInLeague {
                identifier: identifier.to_string(),
                league: self.name.clone(),
            })
    }
}

/// Season bounds arrive as epoch milliseconds; they are read as UTC.
fn timestamp_from_millis(millis: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| FantraxError::malformed("league season", format!("timestamp out of range: {millis}")))
}

/// Join the live-scoring calendar (`dates[].object1`, `YYYY-MM-DD`) with the
/// daily period labels (`"12 (Fri Oct 4)"`) into daily period -> date.
fn build_scoring_dates(calendar: &[Value], period_list: &Value) -> Result<BTreeMap<u32, NaiveDate>> {
    let label_to_period: HashMap<String, u32> = period_list
        .as_array()
        .ok_or_else(|| FantraxError::malformed("roster stats", "periodList is not an array"))?
        .iter()
        .filter_map(Value::as_str)
        .filter_map(parse_period_list_entry)
        .map(|(number, label)| (label, number))
        .collect();

    let mut scoring_dates = BTreeMap::new();
    for day in calendar {
        let raw = str_field(day, "object1", "live scoring date")?;
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
        match label_to_period.get(&day_label_key(date)) {
            Some(period) => {
                scoring_dates.insert(*period, date);
            }
            None => warn!(%date, "Scoring day has no daily period label; skipping"),
        }
    }
    Ok(scoring_dates)
}
