//! Shared payload fixtures for unit tests.
//!
//! A small hockey league: four teams, a 2024-10-01..2025-06-01 season, a
//! handful of scoring days and weekly periods including three playoff rounds.

use serde_json::{json, Value};

use crate::ids::LeagueId;
use crate::reference::ReferenceData;

pub const LEAGUE_ID: &str = "testleague";
pub const SEASON_START_MS: i64 = 1727740800000; // 2024-10-01T00:00:00Z
pub const SEASON_END_MS: i64 = 1748736000000; // 2025-06-01T00:00:00Z

pub fn fantasy_teams() -> Value {
    json!([
        {"id": "t1", "name": "Kashyyyk Wookies 🏴‍☠️", "shortName": "KW", "logoUrl512": "kw512.png"},
        {"id": "t2", "name": "Bunch of Yahoos", "shortName": "BoY", "logoUrl256": "boy256.png"},
        {"id": "t3", "name": "Son of a Mich", "shortName": "SoaM", "logoUrl128": "soam128.png"},
        {"id": "t4", "name": "Pirate Horde", "shortName": "PH", "logoUrl128": "ph128.png"}
    ])
}

pub fn league_info() -> Value {
    json!({
        "fantasySettings": {
            "leagueName": "Cowley's Chaos",
            "subtitle": "2024-25 NHL",
            "season": {"startDate": SEASON_START_MS, "endDate": SEASON_END_MS}
        },
        "positionMap": {
            "206": {"id": "206", "name": "Center", "shortName": "C"},
            "203": {"id": "203", "name": "Winger", "shortName": "W"},
            "202": {"id": "202", "name": "Defense", "shortName": "D"},
            "701": {"id": "701", "name": "Skater", "shortName": "Skt"},
            "705": {"id": "705", "name": "Team Goalie", "shortName": "TmG"}
        }
    })
}

pub fn status_refs() -> Value {
    json!({
        "allObjs": {
            "1": {"id": "1", "code": "ACTIVE", "name": "Active", "shortName": "Act", "description": "Active"},
            "2": {"id": "2", "code": "RESERVE", "name": "Reserve", "shortName": "Res", "description": "Reserve"},
            "3": {"id": "3", "code": "INJURED_RESERVE", "name": "Inj Res", "shortName": "IR", "description": "Injured reserve"},
            "4": {"id": "4", "code": "FREE_AGENT", "name": "Free Agent", "shortName": "FA", "description": "Free agent"},
            "9": {"id": "9", "code": "UNUSED"}
        }
    })
}

pub fn live_scoring_shell() -> Value {
    json!({
        "dates": [
            {"object1": "2024-10-04"},
            {"object1": "2024-10-05"},
            {"object1": "2024-10-08"},
            {"object1": "2024-10-10"},
            {"object1": "2024-10-18"},
            {"object1": "2025-04-17"},
            {"object1": "2024-07-01"}
        ]
    })
}

pub fn roster_games_per_pos() -> Value {
    json!({
        "displayedLists": {
            "scoringPeriodList": [
                {"name": "Full Season", "value": 0},
                {"name": "(Oct 4/24 - Oct 13/24)", "value": 1},
                {"name": "(Oct 14/24 - Oct 20/24)", "value": 2},
                {"name": "(Oct 21/24 - Oct 27/24)", "value": 3},
                {"name": "(Dec 16/24 - Dec 22/24)", "value": 11},
                {"name": "(Mar 24/25 - Mar 30/25)", "value": 23},
                {"name": "(Mar 31/25 - Apr 6/25)", "value": 24},
                {"name": "(Apr 7/25 - Apr 17/25)", "value": 25}
            ]
        },
        "fantasyTeams": fantasy_teams()
    })
}

pub fn roster_stats_periods() -> Value {
    json!({
        "displayedLists": {
            "periodList": [
                "1 (Fri Oct 4)",
                "2 (Sat Oct 5)",
                "5 (Tue Oct 8)",
                "7 (Thu Oct 10)",
                "15 (Fri Oct 18)",
                "178 (Thu Apr 17)"
            ]
        }
    })
}

pub fn init_responses() -> Vec<Value> {
    vec![
        league_info(),
        status_refs(),
        live_scoring_shell(),
        roster_games_per_pos(),
        roster_stats_periods(),
    ]
}

pub fn reference() -> ReferenceData {
    ReferenceData::from_init_responses(LeagueId::new(LEAGUE_ID), &init_responses())
        .expect("fixture reference data")
}

/// Scorer payload as embedded in rosters, trades and transactions.
pub fn scorer(id: &str, name: &str, pos_ids: &[&str], icons: &[&str]) -> Value {
    json!({
        "scorerId": id,
        "name": name,
        "shortName": name.split(' ').last().unwrap_or(name),
        "teamName": "Tampa Bay Lightning",
        "teamShortName": "TBL",
        "posShortNames": "C,W",
        "posIdsNoFlex": pos_ids,
        "posIds": pos_ids.iter().copied().chain(["701"]).collect::<Vec<_>>(),
        "icons": icons.iter().map(|code| json!({"typeId": code})).collect::<Vec<_>>()
    })
}
