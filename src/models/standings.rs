//! League standings tables.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::{FantraxError, Result};
use crate::models::Team;
use crate::reference::ReferenceData;
use crate::util::{array_field, cell_number, field, parse_number, scalar_text, str_field};

/// Standings after (or, with `only_period`, during) a scoring period.
#[derive(Debug, Clone)]
pub struct Standings {
    pub scoring_period_number: Option<u32>,
    /// Records keyed by rank.
    pub ranks: BTreeMap<u32, Record>,
}

/// One team's line in the standings.
///
/// Columns the league does not display default to zero, or to an empty
/// streak.
#[derive(Debug, Clone)]
pub struct Record {
    pub team: Arc<Team>,
    pub rank: u32,
    pub win: u32,
    pub loss: u32,
    pub tie: u32,
    pub points: u32,
    pub win_percentage: f64,
    pub games_back: f64,
    pub waiver_wire_order: u32,
    pub points_for: f64,
    pub points_against: f64,
    pub streak: String,
}

impl Standings {
    /// Map a standings table: `header.cells[].key` names the columns and each
    /// row carries rank and team in `fixedCells`.
    pub fn from_table(
        table: &Value,
        reference: &ReferenceData,
        scoring_period_number: Option<u32>,
    ) -> Result<Self> {
        let columns: HashMap<&str, usize> = array_field(field(table, "header", "standings")?, "cells", "standings")?
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.get("key").and_then(Value::as_str).map(|key| (key, i)))
            .collect();

        let ranks = array_field(table, "rows", "standings")?
            .iter()
            .map(|row| {
                let record = Record::from_row(row, &columns, reference)?;
                Ok((record.rank, record))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            scoring_period_number,
            ranks,
        })
    }

    /// Record of the team with the given id.
    pub fn record_for(&self, team_id: &str) -> Option<&Record> {
        self.ranks.values().find(|r| r.team.id == team_id)
    }
}

impl Record {
    fn from_row(row: &Value, columns: &HashMap<&str, usize>, reference: &ReferenceData) -> Result<Self> {
        let fixed = array_field(row, "fixedCells", "standings row")?;
        let (Some(rank_cell), Some(team_cell)) = (fixed.first(), fixed.get(1)) else {
            return Err(FantraxError::malformed("standings row", "expected rank and team cells"));
        };
        let cells = array_field(row, "cells", "standings row")?;

        let content = |key: &str| -> Option<String> {
            columns
                .get(key)
                .and_then(|i| cells.get(*i))
                .and_then(|cell| cell.get("content"))
                .and_then(scalar_text)
        };
        let count = |key: &str| -> Result<u32> {
            match content(key) {
                Some(text) => parse_number(&text).ok_or_else(|| {
                    FantraxError::malformed("standings row", format!("`{key}` is not a count: {text:?}"))
                }),
                None => Ok(0),
            }
        };
        // "-" stands for "not applicable yet" in ratio columns
        let ratio = |key: &str| -> Result<f64> {
            match content(key).as_deref().map(str::trim) {
                None | Some("-") | Some("") => Ok(0.0),
                Some(text) => parse_number(text).ok_or_else(|| {
                    FantraxError::malformed("standings row", format!("`{key}` is not a number: {text:?}"))
                }),
            }
        };

        Ok(Self {
            team: reference.team(str_field(team_cell, "teamId", "standings row")?)?,
            rank: cell_number(rank_cell, "standings rank")?,
            win: count("win")?,
            loss: count("loss")?,
            tie: count("tie")?,
            points: count("points")?,
            win_percentage: ratio("winpc")?,
            games_back: ratio("gamesback")?,
            waiver_wire_order: count("wwOrder")?,
            points_for: ratio("pointsFor")?,
            points_against: ratio("pointsAgainst")?,
            streak: content("streak").unwrap_or_default(),
        })
    }
}

/// First table of a standings response.
pub(crate) fn first_table(response: &Value) -> Result<&Value> {
    array_field(response, "tableList", "standings")?
        .first()
        .ok_or_else(|| FantraxError::malformed("standings", "empty tableList"))
}

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Standings")?;
        if let Some(number) = self.scoring_period_number {
            write!(f, " Period {number}")?;
        }
        for record in self.ranks.values() {
            write!(f, "\n{record}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}-{}-{})",
            self.rank, self.team, self.win, self.loss, self.tie
        )
    }
}
