//! Shared mock server and payloads for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use fantrax_api::{ClientConfig, FantraxClient, FixedClock, League, LeagueId};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_string_contains, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const LEAGUE_ID: &str = "intleague";

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn client_for(server: &MockServer) -> FantraxClient {
    let config = ClientConfig::new(LeagueId::new(LEAGUE_ID))
        .with_endpoint(format!("{}/fxpa/req", server.uri()));
    FantraxClient::new(config).unwrap()
}

/// Wrap method payloads in a response envelope.
pub fn envelope(bodies: Vec<Value>) -> Value {
    json!({"responses": bodies.into_iter().map(|data| json!({"data": data})).collect::<Vec<_>>()})
}

/// Answer every request whose body contains `needle`.
pub async fn respond_to(server: &MockServer, needle: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path("/fxpa/req"))
        .and(query_param("leagueId", LEAGUE_ID))
        .and(body_string_contains(needle))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn teams() -> Value {
    json!([
        {"id": "t1", "name": "Kashyyyk Wookies", "shortName": "KW", "logoUrl512": "kw.png"},
        {"id": "t2", "name": "Bunch of Yahoos", "shortName": "BoY", "logoUrl256": "boy.png"}
    ])
}

pub fn init_bodies() -> Vec<Value> {
    vec![
        json!({
            "fantasySettings": {
                "leagueName": "Cowley's Chaos",
                "subtitle": "2024-25 NHL",
                "season": {"startDate": 1727740800000i64, "endDate": 1748736000000i64}
            },
            "positionMap": {
                "206": {"id": "206", "name": "Center", "shortName": "C"},
                "202": {"id": "202", "name": "Defense", "shortName": "D"},
                "701": {"id": "701", "name": "Skater", "shortName": "Skt"}
            }
        }),
        json!({"allObjs": {
            "1": {"id": "1", "code": "ACTIVE", "name": "Active", "shortName": "Act", "description": "Active"},
            "2": {"id": "2", "code": "RESERVE", "name": "Reserve", "shortName": "Res", "description": "Reserve"}
        }}),
        json!({"dates": [{"object1": "2024-10-04"}, {"object1": "2024-10-18"}]}),
        json!({
            "displayedLists": {"scoringPeriodList": [
                {"name": "Full Season", "value": 0},
                {"name": "(Oct 4/24 - Oct 13/24)", "value": 1},
                {"name": "(Oct 14/24 - Oct 20/24)", "value": 2},
                {"name": "(Dec 16/24 - Dec 22/24)", "value": 11},
                {"name": "(Mar 24/25 - Mar 30/25)", "value": 23},
                {"name": "(Mar 31/25 - Apr 6/25)", "value": 24},
                {"name": "(Apr 7/25 - Apr 17/25)", "value": 25}
            ]},
            "fantasyTeams": teams()
        }),
        json!({"displayedLists": {"periodList": ["1 (Fri Oct 4)", "15 (Fri Oct 18)"]}}),
    ]
}

/// One schedule row: away team, away score, home team, home score.
pub fn matchup_row(away: &str, away_score: &str, home: &str, home_score: &str) -> Value {
    json!({"cells": [
        {"teamId": away, "content": away},
        {"content": away_score},
        {"teamId": home, "content": home},
        {"content": home_score}
    ]})
}

/// Start a server answering the reference-data batch and connect to it.
pub async fn connected_league(today: NaiveDate) -> (MockServer, League) {
    let server = MockServer::start().await;
    respond_to(&server, "getFantasyLeagueInfo", envelope(init_bodies())).await;
    let league = League::connect_with_clock(client_for(&server), Box::new(FixedClock(today)))
        .await
        .unwrap();
    (server, league)
}

pub fn scorer(id: &str, name: &str, pos_id: &str) -> Value {
    json!({
        "scorerId": id,
        "name": name,
        "shortName": name,
        "teamName": "Tampa Bay Lightning",
        "teamShortName": "TBL",
        "posShortNames": "C",
        "posIdsNoFlex": [pos_id],
        "posIds": [pos_id, "701"],
        "icons": []
    })
}
