//! A team's roster for one daily period.

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{FantraxError, Result};
use crate::models::{Game, Player, Position, Team};
use crate::reference::ReferenceData;
use crate::util::{array_field, field, number_field, parse_number, path, scalar_text};

/// Status id of an active lineup slot.
const ACTIVE_STATUS_ID: &str = "1";

#[derive(Debug, Clone)]
pub struct Roster {
    pub team: Arc<Team>,
    /// Daily period number.
    pub period_number: u32,
    pub period_date: NaiveDate,
    pub active: u32,
    pub active_max: u32,
    pub reserve: u32,
    pub reserve_max: u32,
    pub injured: u32,
    pub injured_max: u32,
    pub rows: Vec<RosterRow>,
}

#[derive(Debug, Clone)]
pub struct RosterRow {
    pub position: Position,
    pub player: Option<Player>,
    pub total_fantasy_points: Option<f64>,
    pub fantasy_points_per_game: Option<f64>,
    pub game_today: Option<Game>,
    /// Upcoming games keyed by game-day label (`"Fri 10/18"`), in schedule
    /// column order.
    pub future_games: Vec<(String, Game)>,
}

/// Slot usage from `miscData.statusTotals`.
#[derive(Debug, Default, Clone, Copy)]
struct SlotTotals {
    total: u32,
    max: u32,
}

impl Roster {
    /// Map the STATS and SCHEDULE_FULL views of `getTeamRosterInfo`.
    ///
    /// The two views list the same slots in the same order, table by table,
    /// so rows are paired positionally.
    pub fn from_responses(
        team: Arc<Team>,
        stats: &Value,
        schedule: &Value,
        reference: &ReferenceData,
    ) -> Result<Self> {
        let period_number: u32 = number_field(
            field(stats, "displayedSelections", "roster")?,
            "displayedPeriod",
            "roster",
        )?;
        let period_date = reference
            .scoring_date(period_number)
            .ok_or_else(|| FantraxError::period_not_in_season(period_number))?;

        let totals = array_field(field(stats, "miscData", "roster")?, "statusTotals", "roster")?
            .iter()
            .filter_map(|entry| {
                let name = entry.get("name").and_then(Value::as_str)?;
                let count = |key: &str| {
                    entry
                        .get(key)
                        .and_then(scalar_text)
                        .and_then(|t| parse_number(&t))
                        .unwrap_or(0)
                };
                Some((name, SlotTotals { total: count("total"), max: count("max") }))
            })
            .collect::<HashMap<_, _>>();
        let slot = |name: &str| totals.get(name).copied().unwrap_or_default();
        let (active, reserve, injured) = (slot("Active"), slot("Reserve"), slot("Inj Res"));

        let day_label = period_date.format("%a %m/%d").to_string();
        let mut rows = Vec::new();
        let stats_tables = array_field(stats, "tables", "roster stats")?;
        let schedule_tables = array_field(schedule, "tables", "roster schedule")?;
        for (stats_table, schedule_table) in stats_tables.iter().zip(schedule_tables) {
            let stats_header = header_cells(stats_table)?;
            let schedule_header = header_cells(schedule_table)?;
            let schedule_rows = array_field(schedule_table, "rows", "roster schedule")?;

            for (stats_row, schedule_row) in array_field(stats_table, "rows", "roster stats")?
                .iter()
                .zip(schedule_rows)
            {
                if let Some(row) = RosterRow::from_rows(
                    stats_row,
                    schedule_row,
                    stats_header,
                    schedule_header,
                    &day_label,
                    reference,
                )? {
                    rows.push(row);
                }
            }
        }

        Ok(Self {
            team,
            period_number,
            period_date,
            active: active.total,
            active_max: active.max,
            reserve: reserve.total,
            reserve_max: reserve.max,
            injured: injured.total,
            injured_max: injured.max,
            rows,
        })
    }

    /// Rows holding a player.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.rows.iter().filter_map(|r| r.player.as_ref())
    }
}

impl RosterRow {
    /// `None` for rows that are not lineup slots, and for empty slots other
    /// than active ones.
    fn from_rows(
        stats_row: &Value,
        schedule_row: &Value,
        stats_header: &[Value],
        schedule_header: &[Value],
        day_label: &str,
        reference: &ReferenceData,
    ) -> Result<Option<Self>> {
        let Some(pos_id) = stats_row.get("posId").and_then(scalar_text) else {
            return Ok(None);
        };
        let scorer = stats_row.get("scorer");
        let active_slot = stats_row.get("statusId").and_then(scalar_text).as_deref() == Some(ACTIVE_STATUS_ID);
        if scorer.is_none() && !active_slot {
            return Ok(None);
        }

        let mut row = Self {
            position: reference.position(&pos_id)?.clone(),
            player: None,
            total_fantasy_points: None,
            fantasy_points_per_game: None,
            game_today: None,
            future_games: Vec::new(),
        };
        let Some(scorer) = scorer else {
            return Ok(Some(row));
        };
        let player = Player::from_payload(scorer, reference)?;
        let bounds = reference.season_bounds();

        let schedule_cells = array_field(schedule_row, "cells", "roster schedule row")?;
        for (header, cell) in schedule_header.iter().zip(schedule_cells) {
            if has_content(cell) && is_event_column(header) {
                let label = header
                    .get("shortName")
                    .and_then(scalar_text)
                    .ok_or_else(|| FantraxError::malformed("roster schedule", "game column without shortName"))?;
                let game = Game::from_cell(&player, &label, cell, &bounds)?;
                row.future_games.push((label, game));
            }
        }

        let stats_cells = array_field(stats_row, "cells", "roster stats row")?;
        for (header, cell) in stats_header.iter().zip(stats_cells) {
            let content = || cell.get("content").and_then(scalar_text).and_then(|t| parse_number(&t));
            match header.get("sortKey").and_then(Value::as_str) {
                Some("SCORE") => row.total_fantasy_points = content(),
                Some("FPTS_PER_GAME") => row.fantasy_points_per_game = content(),
                _ => {}
            }
            if has_content(cell) && is_event_column(header) {
                row.game_today = Some(Game::from_cell(&player, day_label, cell, &bounds)?);
            }
        }

        row.player = Some(player);
        Ok(Some(row))
    }

    /// Future game on the given day label.
    pub fn future_game(&self, label: &str) -> Option<&Game> {
        self.future_games
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, game)| game)
    }
}

fn header_cells(table: &Value) -> Result<&[Value]> {
    Ok(path(table, &["header", "cells"], "roster table")?
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default())
}

fn has_content(cell: &Value) -> bool {
    match cell.get("content") {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

/// Columns that hold games carry a non-empty `eventStr`.
fn is_event_column(header: &Value) -> bool {
    header
        .get("eventStr")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Roster", self.team)?;
        for row in &self.rows {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RosterRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.player {
            Some(player) => write!(f, "{}: {}", self.position.short_name, player),
            None => write!(f, "{}: Empty", self.position.short_name),
        }
    }
}
