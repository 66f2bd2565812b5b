//! Per-day live scoring: which players scored what for which team.

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{FantraxError, Result};
use crate::models::Player;
use crate::reference::ReferenceData;
use crate::util::{array_field, field, number_field, path, text_field};

/// Players of each team in a matchup that day, keyed by team id, each
/// carrying their points for the date.
pub type LiveScores = BTreeMap<String, Vec<Player>>;

/// Map a `getLiveScoringStats` response for `scoring_date`.
///
/// Scorers come from the nested `scorerMap`; only teams named in `matchups`
/// (`"<team>_<team>"`) are reported, with the active-lineup entries of
/// `statsPerTeam.allTeamsStats`. Stats keys starting with `_` are team
/// aggregates, not players.
pub fn live_scores_from_payload(
    data: &Value,
    reference: &ReferenceData,
    scoring_date: NaiveDate,
) -> Result<LiveScores> {
    let mut scorers: HashMap<String, Player> = HashMap::new();
    let scorer_map = field(data, "scorerMap", "live scoring")?;
    for entry in nested_entries(scorer_map) {
        let scorer = field(entry, "scorer", "live scoring scorer")?;
        let id = text_field(scorer, "scorerId", "live scoring scorer")?;
        if !scorers.contains_key(&id) {
            scorers.insert(id, Player::from_payload(scorer, reference)?);
        }
    }

    let mut active_teams: HashSet<&str> = HashSet::new();
    for matchup in array_field(data, "matchups", "live scoring")? {
        let pairing = matchup
            .as_str()
            .ok_or_else(|| FantraxError::malformed("live scoring", "matchup is not a string"))?;
        active_teams.extend(pairing.split('_'));
    }

    let mut scores = LiveScores::new();
    let team_stats = path(data, &["statsPerTeam", "allTeamsStats"], "live scoring")?
        .as_object()
        .ok_or_else(|| FantraxError::malformed("live scoring", "allTeamsStats is not an object"))?;
    for (team_id, stats) in team_stats {
        if !active_teams.contains(team_id.as_str()) {
            continue;
        }
        let team = reference.team(team_id)?;
        let players = scores.entry(team_id.clone()).or_default();

        let stats_map = path(stats, &["ACTIVE", "statsMap"], "live scoring team")?
            .as_object()
            .ok_or_else(|| FantraxError::malformed("live scoring team", "statsMap is not an object"))?;
        for (scorer_id, points) in stats_map {
            if scorer_id.starts_with('_') {
                continue;
            }
            let player = scorers.get(scorer_id).ok_or_else(|| {
                FantraxError::malformed("live scoring", format!("no scorer entry for {scorer_id}"))
            })?;
            let points: f64 = number_field(points, "object1", "live scoring points")?;
            players.push(player.with_points(team.clone(), points, scoring_date));
        }
    }

    Ok(scores)
}

/// Entries of `scorerMap`, which nests three object levels above the lists.
fn nested_entries(scorer_map: &Value) -> impl Iterator<Item = &Value> {
    objects(scorer_map)
        .flat_map(objects)
        .flat_map(objects)
        .flat_map(|list| list.as_array().into_iter().flatten())
}

fn objects(value: &Value) -> impl Iterator<Item = &Value> {
    value.as_object().into_iter().flat_map(|map| map.values())
}
