//! Head-to-head matchups within a scoring period.

use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{FantraxError, Result};
use crate::models::Team;
use crate::reference::ReferenceData;
use crate::util::{cell_number, scalar_text};

/// One side of a matchup: a league team, or the placeholder text the server
/// shows when the slot is not a team yet (`"Winner of Match 1"`).
#[derive(Debug, Clone, PartialEq)]
pub enum MatchupSide {
    Team(Arc<Team>),
    Label(String),
}

impl MatchupSide {
    pub fn team(&self) -> Option<&Arc<Team>> {
        match self {
            MatchupSide::Team(team) => Some(team),
            MatchupSide::Label(_) => None,
        }
    }

    /// Resolve a team cell, degrading to its display content when the id is
    /// missing or unknown.
    fn from_cell(cell: &Value, reference: &ReferenceData) -> Self {
        cell.get("teamId")
            .and_then(scalar_text)
            .and_then(|id| reference.team(&id).ok())
            .map(MatchupSide::Team)
            .unwrap_or_else(|| {
                MatchupSide::Label(cell.get("content").and_then(scalar_text).unwrap_or_default())
            })
    }
}

impl fmt::Display for MatchupSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchupSide::Team(team) => write!(f, "{team}"),
            MatchupSide::Label(label) => write!(f, "{label}"),
        }
    }
}

/// Scores are kept as exact decimals so margins carry no float noise.
#[derive(Debug, Clone)]
pub struct Matchup {
    /// 1-based position within the period. Each bracket's matchups are
    /// numbered on from the end of the main table.
    pub matchup_key: usize,
    /// Title of the owning period, e.g. `"Playoff Period 24"`.
    pub period_title: String,
    pub away: MatchupSide,
    pub away_score: Decimal,
    pub home: MatchupSide,
    pub home_score: Decimal,
}

impl Matchup {
    /// Map the four cells of a schedule row: away team, away score, home
    /// team, home score.
    pub fn from_cells(
        matchup_key: usize,
        cells: &Value,
        reference: &ReferenceData,
        period_title: &str,
    ) -> Result<Self> {
        let Some([away, away_score, home, home_score, ..]) = cells.as_array().map(Vec::as_slice) else {
            return Err(FantraxError::malformed(
                "matchup",
                "expected at least four cells",
            ));
        };

        Ok(Self {
            matchup_key,
            period_title: period_title.to_string(),
            away: MatchupSide::from_cell(away, reference),
            away_score: cell_number(away_score, "matchup score")?,
            home: MatchupSide::from_cell(home, reference),
            home_score: cell_number(home_score, "matchup score")?,
        })
    }

    /// Winner, winner score, loser, loser score; `None` on a tie.
    pub fn winner(&self) -> Option<(&MatchupSide, Decimal, &MatchupSide, Decimal)> {
        if self.away_score > self.home_score {
            Some((&self.away, self.away_score, &self.home, self.home_score))
        } else if self.home_score > self.away_score {
            Some((&self.home, self.home_score, &self.away, self.away_score))
        } else {
            None
        }
    }

    /// Winning margin; zero on a tie.
    pub fn difference(&self) -> Decimal {
        (self.away_score - self.home_score).abs()
    }

    pub fn is_played(&self) -> bool {
        !self.away_score.is_zero() || !self.home_score.is_zero()
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_played() {
            return write!(f, "{} {} vs {}", self.period_title, self.away, self.home);
        }
        let (first, first_score, second, second_score) = self
            .winner()
            .unwrap_or((&self.away, self.away_score, &self.home, self.home_score));
        write!(
            f,
            "{} {} ({}) vs {} ({})",
            self.period_title, first, first_score, second, second_score
        )
    }
}
