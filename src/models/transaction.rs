//! Completed roster transactions (claims, drops, free agent pickups).

use chrono::NaiveDateTime;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{FantraxError, Result};
use crate::models::{Player, Team};
use crate::reconcile::parse_transaction_timestamp;
use crate::reference::ReferenceData;
use crate::util::{array_field, field, str_field, text_field};

/// One transaction set: every player move submitted together by a team.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: String,
    pub team: Arc<Team>,
    pub date: NaiveDateTime,
    pub players: Vec<TransactionPlayer>,
}

/// A player and what happened to them (`"WW"`, `"FA"`, `"DROP"`...).
#[derive(Debug, Clone)]
pub struct TransactionPlayer {
    pub player: Player,
    pub kind: String,
}

impl Transaction {
    /// Map the history rows of one transaction set; the first row carries
    /// the team and timestamp cells.
    pub fn from_rows(rows: &[Value], reference: &ReferenceData) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| FantraxError::malformed("transaction", "no rows"))?;
        let cells = array_field(first, "cells", "transaction")?;
        let (Some(team_cell), Some(date_cell)) = (cells.first(), cells.get(1)) else {
            return Err(FantraxError::malformed("transaction", "expected team and date cells"));
        };

        Ok(Self {
            id: text_field(first, "txSetId", "transaction")?,
            team: reference.team(str_field(team_cell, "teamId", "transaction")?)?,
            date: parse_transaction_timestamp(str_field(date_cell, "content", "transaction")?)?,
            players: rows
                .iter()
                .map(|row| TransactionPlayer::from_row(row, reference))
                .collect::<Result<_>>()?,
        })
    }
}

/// Group history rows into transactions.
///
/// Rows of one set are expected to be contiguous; a set whose rows are
/// interleaved with another's comes out split in two.
pub fn group_transactions(rows: &[Value], reference: &ReferenceData) -> Result<Vec<Transaction>> {
    rows.chunk_by(|a, b| a.get("txSetId") == b.get("txSetId"))
        .map(|group| Transaction::from_rows(group, reference))
        .collect()
}

impl TransactionPlayer {
    fn from_row(row: &Value, reference: &ReferenceData) -> Result<Self> {
        let code = str_field(row, "transactionCode", "transaction row")?;
        let kind = if code == "CLAIM" {
            str_field(row, "claimType", "transaction row")?
        } else {
            code
        };
        Ok(Self {
            player: Player::from_payload(field(row, "scorer", "transaction row")?, reference)?,
            kind: kind.to_string(),
        })
    }
}

impl fmt::Display for TransactionPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.player.name)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let players: Vec<String> = self.players.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", players.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{self, scorer};
    use chrono::NaiveDate;
    use serde_json::json;

    fn row(set: &str, team: &str, code: &str, claim: Option<&str>, player: (&str, &str)) -> Value {
        let mut row = json!({
            "txSetId": set,
            "transactionCode": code,
            "cells": [{"teamId": team, "content": team}, {"content": "Sat Apr 12, 2025, 10:30AM"}],
            "scorer": scorer(player.0, player.1, &["206"], &[])
        });
        if let Some(claim) = claim {
            row["claimType"] = json!(claim);
        }
        row
    }

    #[test]
    fn test_consecutive_rows_group_into_one_transaction() {
        let reference = test_fixtures::reference();
        let rows = vec![
            row("X", "t1", "CLAIM", Some("WW"), ("p1", "Mason Marchment")),
            row("X", "t1", "DROP", None, ("p2", "Jake Neighbours")),
            row("X", "t1", "CLAIM", Some("FA"), ("p3", "Jordan Kyrou")),
            row("Y", "t2", "DROP", None, ("p4", "Tyler Bertuzzi")),
        ];

        let transactions = group_transactions(&rows, &reference).unwrap();
        assert_eq!(transactions.len(), 2);

        let first = &transactions[0];
        assert_eq!(first.id, "X");
        assert_eq!(first.team.id, "t1");
        assert_eq!(
            first.date,
            NaiveDate::from_ymd_opt(2025, 4, 12).unwrap().and_hms_opt(10, 30, 0).unwrap()
        );
        let kinds: Vec<_> = first.players.iter().map(|p| p.kind.as_str()).collect();
        assert_eq!(kinds, vec!["WW", "DROP", "FA"]);
        assert_eq!(
            first.to_string(),
            "[WW Mason Marchment, DROP Jake Neighbours, FA Jordan Kyrou]"
        );
        assert_eq!(transactions[1].players.len(), 1);
    }

    #[test]
    fn test_interleaved_rows_split() {
        let reference = test_fixtures::reference();
        let rows = vec![
            row("X", "t1", "DROP", None, ("p1", "A B")),
            row("Y", "t2", "DROP", None, ("p2", "C D")),
            row("X", "t1", "DROP", None, ("p3", "E F")),
        ];
        assert_eq!(group_transactions(&rows, &reference).unwrap().len(), 3);
    }

    #[test]
    fn test_no_rows() {
        let reference = test_fixtures::reference();
        assert!(group_transactions(&[], &reference).unwrap().is_empty());
    }
}
