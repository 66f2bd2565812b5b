//! Named backend calls used by the league facade.
//!
//! Each function only builds the method batch and returns raw payloads;
//! mapping into domain objects happens in `models`.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::Result;
use crate::fantrax::http::{FantraxClient, Method};

/// Views of `getStandings`.
pub const VIEW_SCHEDULE: &str = "SCHEDULE";
pub const VIEW_PLAYOFFS: &str = "PLAYOFFS";

/// Methods fetched together to build the league's reference data, in the
/// order `ReferenceData::from_init_responses` expects them.
pub fn init_methods() -> Vec<Method> {
    vec![
        Method::new("getFantasyLeagueInfo"),
        Method::new("getRefObject").param("type", "FantasyItemStatus"),
        Method::new("getLiveScoringStats").param("newView", true),
        Method::new("getTeamRosterInfo").param("view", "GAMES_PER_POS"),
        Method::new("getTeamRosterInfo").param("view", "STATS"),
    ]
}

pub async fn get_init_info(client: &FantraxClient) -> Result<Vec<Value>> {
    client.request(&init_methods()).await
}

/// Period filter of a standings request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandingsPeriod {
    pub number: u32,
    /// Only that period's results instead of the season up to it.
    pub only_period: bool,
}

/// Build one `getStandings` method per view.
pub fn standings_methods(views: &[Option<&str>], period: Option<StandingsPeriod>) -> Vec<Method> {
    views
        .iter()
        .map(|view| {
            let mut m = Method::new("getStandings").opt_param("view", *view);
            if let Some(p) = period {
                m = m
                    .param("period", p.number)
                    .param("timeframeType", "BY_PERIOD")
                    .param(
                        "timeStartType",
                        if p.only_period {
                            "PERIOD_ONLY"
                        } else {
                            "FROM_SEASON_START"
                        },
                    );
            }
            m
        })
        .collect()
}

pub async fn get_standings(
    client: &FantraxClient,
    views: &[Option<&str>],
    period: Option<StandingsPeriod>,
) -> Result<Vec<Value>> {
    client.request(&standings_methods(views, period)).await
}

pub async fn get_pending_transactions(client: &FantraxClient) -> Result<Value> {
    client
        .request_one(Method::new("getPendingTransactions"))
        .await
}

/// Raw trade block list (`tradeBlocks`).
pub async fn get_trade_blocks(client: &FantraxClient) -> Result<Value> {
    let mut response = client.request_one(Method::new("getTradeBlocks")).await?;
    Ok(response
        .get_mut("tradeBlocks")
        .map(Value::take)
        .unwrap_or(Value::Array(Vec::new())))
}

pub async fn get_team_roster_position_counts(
    client: &FantraxClient,
    team_id: &str,
    scoring_period_number: Option<u32>,
) -> Result<Value> {
    client
        .request_one(
            Method::new("getTeamRosterInfo")
                .param("teamId", team_id)
                .opt_param("scoringPeriod", scoring_period_number)
                .param("view", "GAMES_PER_POS"),
        )
        .await
}

/// Stats view followed by the full schedule view of one team's roster.
pub fn team_roster_methods(team_id: &str, period_number: Option<u32>) -> Vec<Method> {
    ["STATS", "SCHEDULE_FULL"]
        .into_iter()
        .map(|view| {
            Method::new("getTeamRosterInfo")
                .param("teamId", team_id)
                .opt_param("period", period_number)
                .param("view", view)
        })
        .collect()
}

pub async fn get_team_roster_info(
    client: &FantraxClient,
    team_id: &str,
    period_number: Option<u32>,
) -> Result<Vec<Value>> {
    client
        .request(&team_roster_methods(team_id, period_number))
        .await
}

pub async fn get_transaction_history(client: &FantraxClient, per_page_results: u32) -> Result<Value> {
    client
        .request_one(
            Method::new("getTransactionDetailsHistory").param("maxResultsPerPage", per_page_results),
        )
        .await
}

pub fn live_scoring_method(scoring_date: Option<NaiveDate>) -> Method {
    let m = Method::new("getLiveScoringStats");
    let m = match scoring_date {
        Some(d) => m.date_param("date", d),
        None => m,
    };
    m.param("newView", true)
        .param("period", 1)
        .param("playerViewType", 1)
        .param("sppId", -1)
        .param("viewType", 1)
}

pub async fn get_live_scoring_stats(
    client: &FantraxClient,
    scoring_date: Option<NaiveDate>,
) -> Result<Value> {
    client.request_one(live_scoring_method(scoring_date)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::LeagueId;
    use serde_json::json;

    fn data_of(m: &Method) -> Value {
        Value::Object(m.msg_block(&LeagueId::new("L")).data)
    }

    #[test]
    fn test_init_methods_order() {
        let names: Vec<_> = init_methods().iter().map(|m| m.name().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "getFantasyLeagueInfo",
                "getRefObject",
                "getLiveScoringStats",
                "getTeamRosterInfo",
                "getTeamRosterInfo"
            ]
        );
        assert_eq!(data_of(&init_methods()[4])["view"], "STATS");
    }

    #[test]
    fn test_standings_methods_with_period() {
        let methods = standings_methods(
            &[None],
            Some(StandingsPeriod {
                number: 11,
                only_period: false,
            }),
        );
        assert_eq!(methods.len(), 1);
        assert_eq!(
            data_of(&methods[0]),
            json!({
                "leagueId": "L",
                "period": "11",
                "timeframeType": "BY_PERIOD",
                "timeStartType": "FROM_SEASON_START"
            })
        );
    }

    #[test]
    fn test_standings_methods_only_period_and_views() {
        let methods = standings_methods(
            &[Some(VIEW_PLAYOFFS), Some(".3rd")],
            Some(StandingsPeriod {
                number: 6,
                only_period: true,
            }),
        );
        assert_eq!(methods.len(), 2);
        assert_eq!(data_of(&methods[0])["view"], "PLAYOFFS");
        assert_eq!(data_of(&methods[1])["view"], ".3rd");
        assert_eq!(data_of(&methods[1])["timeStartType"], "PERIOD_ONLY");
    }

    #[test]
    fn test_team_roster_methods() {
        let methods = team_roster_methods("t1", Some(8));
        assert_eq!(data_of(&methods[0])["view"], "STATS");
        assert_eq!(data_of(&methods[1])["view"], "SCHEDULE_FULL");
        assert_eq!(data_of(&methods[1])["period"], "8");

        let methods = team_roster_methods("t1", None);
        assert!(data_of(&methods[0]).get("period").is_none());
    }

    #[test]
    fn test_live_scoring_method() {
        let m = live_scoring_method(NaiveDate::from_ymd_opt(2024, 10, 18));
        assert_eq!(
            data_of(&m),
            json!({
                "leagueId": "L",
                "date": "2024-10-18",
                "newView": "true",
                "period": "1",
                "playerViewType": "1",
                "sppId": "-1",
                "viewType": "1"
            })
        );
    }
}
