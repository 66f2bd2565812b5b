//! Scoring periods and the matchup results scheduled in them.

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::{FantraxError, Result};
use crate::ids::LeagueId;
use crate::models::Matchup;
use crate::reconcile::{format_range, parse_caption_range, parse_period_name};
use crate::reference::ReferenceData;
use crate::util::{array_field, field, number_field, str_field, trailing_number};


/// One canonical scoring period of the season, e.g. `[3:2024-10-21 - 2024-10-27]`.
///
/// Compares equal to another period of the same league with the same number,
/// to its number, and to a numeric string holding its number.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringPeriod {
    pub league_id: LeagueId,
    pub number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ScoringPeriod {
    /// Build from a `scoringPeriodList` entry: `{"name": "(Oct 7/24 - Oct 13/24)", "value": 2}`.
    pub fn from_payload(league_id: LeagueId, data: &Value) -> Result<Self> {
        let (start, end) = parse_period_name(str_field(data, "name", "scoring period")?)?;
        Ok(Self {
            league_id,
            number: number_field(data, "value", "scoring period")?,
            start,
            end,
        })
    }

    /// `YYYY-MM-DD - YYYY-MM-DD`
    pub fn range(&self) -> String {
        format_range(self.start, self.end)
    }
}

impl PartialEq for ScoringPeriod {
    fn eq(&self, other: &Self) -> bool {
        self.league_id == other.league_id && self.number == other.number
    }
}

impl PartialEq<u32> for ScoringPeriod {
    fn eq(&self, other: &u32) -> bool {
        self.number == *other
    }
}

impl PartialEq<str> for ScoringPeriod {
    fn eq(&self, other: &str) -> bool {
        other.parse::<u32>().is_ok_and(|n| n == self.number)
    }
}

impl PartialEq<&str> for ScoringPeriod {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Display for ScoringPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.number, self.range())
    }
}

/// Where a period sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PeriodState {
    Complete,
    Current,
    Future,
}

impl PeriodState {
    /// Both boundary days count as part of the period.
    pub fn classify(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        if today > end {
            PeriodState::Complete
        } else if today >= start {
            PeriodState::Current
        } else {
            PeriodState::Future
        }
    }
}

impl fmt::Display for PeriodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PeriodState::Complete => "Complete",
            PeriodState::Current => "Current",
            PeriodState::Future => "Future",
        };
        write!(f, "{label}")
    }
}

/// Matchups of a secondary playoff bracket (3rd place, consolation...).
#[derive(Debug, Clone)]
pub struct Bracket {
    pub name: String,
    pub matchups: Vec<Matchup>,
}

/// One schedule table: the matchups played over a scoring period.
#[derive(Debug, Clone)]
pub struct ScoringPeriodResult {
    /// Table caption, e.g. `"Week 3"` or `"Playoffs - Round 2"`.
    pub name: String,
    pub playoffs: bool,
    pub period: ScoringPeriod,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// First day after the period.
    pub next: NaiveDate,
    pub days: i64,
    pub state: PeriodState,
    pub matchups: Vec<Matchup>,
    pub other_brackets: Vec<Bracket>,
}

impl ScoringPeriodResult {
    /// Map a schedule table (`caption`, `subCaption`, `rows[].cells`).
    ///
    /// `others` are the same-round tables of other brackets, paired with the
    /// bracket name; their matchup keys continue after the main table's.
    pub fn from_table(
        table: &Value,
        reference: &ReferenceData,
        today: NaiveDate,
        others: &[(String, &Value)],
    ) -> Result<Self> {
        let name = str_field(table, "caption", "period result")?.to_string();
        let playoffs = name.starts_with("Playoffs");
        let (start, end) = parse_caption_range(str_field(table, "subCaption", "period result")?)?;

        let period = if playoffs {
            // Playoff rounds are numbered per bracket, so match on dates instead
            let range = format_range(start, end);
            reference
                .scoring_period_by_range(&range)
                .cloned()
                .ok_or_else(|| FantraxError::period_not_in_season(&range))?
        } else {
            let number = trailing_number(&name).ok_or_else(|| {
                FantraxError::malformed("period result", format!("no period number in caption {name:?}"))
            })?;
            reference
                .scoring_period(number)
                .cloned()
                .ok_or_else(|| FantraxError::period_not_in_season(number))?
        };

        let title = period_title(playoffs, period.number);
        let matchups = table_matchups(table, reference, &title, 1)?;

        let mut other_brackets: Vec<Bracket> = Vec::new();
        for (bracket_name, other) in others {
            let mapped = table_matchups(other, reference, &title, matchups.len() + 1)?;
            match other_brackets.iter_mut().find(|b| &b.name == bracket_name) {
                Some(bracket) => bracket.matchups.extend(mapped),
                None => other_brackets.push(Bracket {
                    name: bracket_name.clone(),
                    matchups: mapped,
                }),
            }
        }

        let next = end + TimeDelta::days(1);
        Ok(Self {
            name,
            playoffs,
            period,
            start,
            end,
            next,
            days: (next - start).num_days(),
            state: PeriodState::classify(start, end, today),
            matchups,
            other_brackets,
        })
    }

    /// `"Period N"` or `"Playoff Period N"`.
    pub fn title(&self) -> String {
        period_title(self.playoffs, self.period.number)
    }

    pub fn range(&self) -> String {
        format_range(self.start, self.end)
    }
}

fn period_title(playoffs: bool, number: u32) -> String {
    if playoffs {
        format!("Playoff Period {number}")
    } else {
        format!("Period {number}")
    }
}

fn table_matchups(
    table: &Value,
    reference: &ReferenceData,
    title: &str,
    first_key: usize,
) -> Result<Vec<Matchup>> {
    array_field(table, "rows", "period result")?
        .iter()
        .enumerate()
        .map(|(i, row)| Matchup::from_cells(first_key + i, field(row, "cells", "matchup")?, reference, title))
        .collect()
}

impl fmt::Display for ScoringPeriodResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{} Days ({} - {})\n{}",
            self.name,
            self.days,
            self.start.format("%a %b %d, %Y"),
            self.end.format("%a %b %d, %Y"),
            self.state
        )?;
        for matchup in &self.matchups {
            write!(f, "\n{matchup}")?;
        }
        for bracket in &self.other_brackets {
            write!(f, "\n{}", bracket.name)?;
            for matchup in &bracket.matchups {
                write!(f, "\n{matchup}")?;
            }
        }
        Ok(())
    }
}
