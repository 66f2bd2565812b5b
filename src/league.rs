//! League facade: one object per Fantrax league tying the transport, the
//! reference data and the mappers together.
//!
//! Every operation issues its request, awaits it, and maps the payload.
//! Operations whose responses carry team info refresh the team list first
//! and therefore take `&mut self`.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{Clock, SystemClock};
use crate::error::{FantraxError, Result};
use crate::fantrax::api::{self, StandingsPeriod, VIEW_PLAYOFFS, VIEW_SCHEDULE};
use crate::fantrax::FantraxClient;
use crate::ids::LeagueId;
use crate::models::standings::first_table;
use crate::models::{
    group_transactions, live_scores_from_payload, LiveScores, Player, PositionCount, Roster,
    ScoringPeriodResult, Standings, Team, Trade, TradeBlock, Transaction,
};
use crate::reference::ReferenceData;
use crate::util::{array_field, field, path, str_field, trailing_number};

/// Caption of the standings table that playoff responses carry next to the
/// bracket rounds.
const STANDINGS_CAPTION: &str = "Standings";

/// Prefix of the tab ids naming secondary playoff brackets.
const BRACKET_TAB_PREFIX: char = '.';

pub struct League {
    client: FantraxClient,
    reference: ReferenceData,
    clock: Box<dyn Clock>,
    logged_in: bool,
}

impl std::fmt::Debug for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("League")
            .field("league_id", self.reference.league_id())
            .field("name", &self.reference.name())
            .field("logged_in", &self.logged_in)
            .finish()
    }
}

impl League {
    /// Connect to the client's league and load its reference data.
    pub async fn connect(client: FantraxClient) -> Result<Self> {
        Self::connect_with_clock(client, Box::new(SystemClock)).await
    }

    /// As [`League::connect`], with the source of "today" supplied.
    pub async fn connect_with_clock(client: FantraxClient, clock: Box<dyn Clock>) -> Result<Self> {
        let reference = load_reference(&client).await?;
        Ok(Self {
            client,
            reference,
            clock,
            logged_in: false,
        })
    }

    /// Re-fetch and replace all reference data.
    pub async fn reset_info(&mut self) -> Result<()> {
        self.reference = load_reference(&self.client).await?;
        Ok(())
    }

    pub fn client(&self) -> &FantraxClient {
        &self.client
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn league_id(&self) -> &LeagueId {
        self.reference.league_id()
    }

    pub fn name(&self) -> &str {
        self.reference.name()
    }

    pub fn year(&self) -> &str {
        self.reference.year()
    }

    pub fn start_date(&self) -> NaiveDateTime {
        self.reference.start_date()
    }

    pub fn end_date(&self) -> NaiveDateTime {
        self.reference.end_date()
    }

    /// Whether the last trade block fetch succeeded with a logged-in session.
    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn teams(&self) -> &[Arc<Team>] {
        self.reference.teams()
    }

    /// Team by id, else by case-insensitive name fragment.
    pub fn team(&self, identifier: &str) -> Result<Arc<Team>> {
        self.reference.team(identifier)
    }

    /// Replace the team list from a team-info payload.
    pub fn apply_team_snapshot(&mut self, data: &Value) -> Result<()> {
        self.reference.apply_team_snapshot(data)
    }

    /// Schedule results keyed by canonical period number.
    ///
    /// Regular-season tables come from the SCHEDULE view. Playoff rounds come
    /// from the PLAYOFFS view, fetched together with every secondary bracket
    /// tab; bracket tables are attached to the main round sharing their
    /// round number.
    pub async fn scoring_period_results(
        &mut self,
        season: bool,
        playoffs: bool,
    ) -> Result<BTreeMap<u32, ScoringPeriodResult>> {
        let today = self.clock.today();
        let schedule = first_response(api::get_standings(&self.client, &[Some(VIEW_SCHEDULE)], None).await?)?;
        self.apply_team_info(std::slice::from_ref(&schedule))?;

        let mut periods = BTreeMap::new();
        if season {
            for table in array_field(&schedule, "tableList", "schedule")? {
                let result = ScoringPeriodResult::from_table(table, &self.reference, today, &[])?;
                periods.insert(result.period.number, result);
            }
        }

        if playoffs {
            let bracket_tabs: Vec<&str> = tabs(&schedule)
                .filter_map(|tab| tab.get("id").and_then(Value::as_str))
                .filter(|id| id.starts_with(BRACKET_TAB_PREFIX))
                .collect();
            let views: Vec<Option<&str>> = std::iter::once(VIEW_PLAYOFFS)
                .chain(bracket_tabs)
                .map(Some)
                .collect();
            let responses = api::get_standings(&self.client, &views, None).await?;
            self.apply_team_info(&responses)?;

            let Some((main, brackets)) = responses.split_first() else {
                return Err(FantraxError::malformed("playoffs", "no responses"));
            };

            let mut other_rounds: HashMap<u32, Vec<(String, &Value)>> = HashMap::new();
            for bracket in brackets {
                let view = str_field(field(bracket, "displayedSelections", "bracket")?, "view", "bracket")?;
                let name = tabs(bracket)
                    .find(|tab| tab.get("id").and_then(Value::as_str) == Some(view))
                    .and_then(|tab| tab.get("name").and_then(Value::as_str))
                    .unwrap_or(view)
                    .to_string();
                for (round, table) in round_tables(bracket)? {
                    other_rounds.entry(round).or_default().push((name.clone(), table));
                }
            }

            // Later rounds first, so an earlier round sharing a period wins
            for (round, table) in round_tables(main)?.into_iter().rev() {
                let others = other_rounds.get(&round).map(Vec::as_slice).unwrap_or_default();
                let result = ScoringPeriodResult::from_table(table, &self.reference, today, others)?;
                periods.insert(result.period.number, result);
            }
        }

        debug!(periods = periods.len(), season, playoffs, "Mapped scoring period results");
        Ok(periods)
    }

    /// Standings after `scoring_period_number`, or the latest standings when
    /// `None`. With `only_period`, only that period's results count.
    pub async fn standings(&mut self, scoring_period_number: Option<u32>, only_period: bool) -> Result<Standings> {
        let period = scoring_period_number.map(|number| StandingsPeriod { number, only_period });
        let responses = api::get_standings(&self.client, &[None], period).await?;
        self.apply_team_info(&responses)?;
        let response = first_response(responses)?;
        Standings::from_table(first_table(&response)?, &self.reference, scoring_period_number)
    }

    /// Trades awaiting acceptance or execution.
    ///
    /// Needs a logged-in session; when none has been seen yet the trade block
    /// is fetched first so a missing login surfaces as `NotLoggedIn`.
    pub async fn pending_trades(&mut self) -> Result<Vec<Trade>> {
        if !self.logged_in {
            self.trade_block().await?;
        }
        let response = api::get_pending_transactions(&self.client).await?;
        response
            .get("tradeInfoList")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(|trade| Trade::from_payload(trade, &self.reference))
            .collect()
    }

    /// Every team's trading block. Records whether the session is logged in.
    pub async fn trade_block(&mut self) -> Result<Vec<TradeBlock>> {
        let blocks = match api::get_trade_blocks(&self.client).await {
            Err(FantraxError::NotLoggedIn) => {
                self.logged_in = false;
                return Err(FantraxError::NotLoggedIn);
            }
            other => other?,
        };
        let blocks = blocks
            .as_array()
            .ok_or_else(|| FantraxError::malformed("trade blocks", "tradeBlocks is not an array"))?
            .iter()
            .filter(|block| !TradeBlock::is_placeholder(block))
            .map(|block| TradeBlock::from_payload(block, &self.reference))
            .collect::<Result<Vec<_>>>()?;
        self.logged_in = true;
        Ok(blocks)
    }

    /// The latest `count` transaction rows, grouped into transactions.
    pub async fn transactions(&self, count: u32) -> Result<Vec<Transaction>> {
        let response = api::get_transaction_history(&self.client, count).await?;
        let rows = path(&response, &["table", "rows"], "transaction history")?
            .as_array()
            .ok_or_else(|| FantraxError::malformed("transaction history", "rows is not an array"))?;
        group_transactions(rows, &self.reference)
    }

    /// Games played per position for a team, keyed by position short name.
    pub async fn position_counts(
        &mut self,
        team_id: &str,
        scoring_period_number: Option<u32>,
    ) -> Result<BTreeMap<String, PositionCount>> {
        if let Some(number) = scoring_period_number {
            if self.reference.scoring_period(number).is_none() {
                return Err(FantraxError::period_not_in_season(number));
            }
        }
        let response = api::get_team_roster_position_counts(&self.client, team_id, scoring_period_number).await?;
        if let Some(teams) = response.get("fantasyTeams") {
            self.reference.apply_team_snapshot(teams)?;
        }
        path(&response, &["gamePlayedPerPosData", "tableData"], "position counts")?
            .as_array()
            .ok_or_else(|| FantraxError::malformed("position counts", "tableData is not an array"))?
            .iter()
            .map(|row| {
                let count = PositionCount::from_payload(row)?;
                Ok((count.short_name.clone(), count))
            })
            .collect()
    }

    /// Live points of every team in a matchup on `scoring_date`, keyed by
    /// team id.
    pub async fn live_scores(&self, scoring_date: NaiveDate) -> Result<LiveScores> {
        if !self.reference.is_scoring_date(scoring_date) {
            return Err(FantraxError::date_not_in_season(scoring_date));
        }
        let response = api::get_live_scoring_stats(&self.client, Some(scoring_date)).await?;
        live_scores_from_payload(&response, &self.reference, scoring_date)
    }

    /// Live points of one team's players on `scoring_date`.
    pub async fn team_live_scores(&self, team_identifier: &str, scoring_date: NaiveDate) -> Result<Vec<Player>> {
        let team = self.team(team_identifier)?;
        let mut scores = self.live_scores(scoring_date).await?;
        Ok(scores.remove(&team.id).unwrap_or_default())
    }

    /// A team's roster for a daily period, or the current one when `None`.
    pub async fn team_roster(&mut self, team_id: &str, period_number: Option<u32>) -> Result<Roster> {
        if let Some(number) = period_number {
            if self.reference.scoring_date(number).is_none() {
                return Err(FantraxError::period_not_in_season(number));
            }
        }
        let responses = api::get_team_roster_info(&self.client, team_id, period_number).await?;
        let [stats, schedule] = responses.as_slice() else {
            return Err(FantraxError::malformed(
                "team roster",
                format!("expected 2 responses, got {}", responses.len()),
            ));
        };
        if let Some(teams) = stats.get("fantasyTeams") {
            self.reference.apply_team_snapshot(teams)?;
        }
        let team = self.team(team_id)?;
        Roster::from_responses(team, stats, schedule, &self.reference)
    }

    /// Refresh teams from any `fantasyTeamInfo` a standings response carries.
    fn apply_team_info(&mut self, responses: &[Value]) -> Result<()> {
        for response in responses {
            if let Some(info) = response.get("fantasyTeamInfo") {
                self.reference.apply_team_snapshot(info)?;
            }
        }
        Ok(())
    }
}

async fn load_reference(client: &FantraxClient) -> Result<ReferenceData> {
    info!(league_id = %client.league_id(), "Loading league reference data");
    let responses = api::get_init_info(client).await?;
    ReferenceData::from_init_responses(client.league_id().clone(), &responses)
}

fn first_response(responses: Vec<Value>) -> Result<Value> {
    responses
        .into_iter()
        .next()
        .ok_or_else(|| FantraxError::malformed("standings", "no responses"))
}

/// `displayedLists.tabs` of a standings response; empty when absent.
fn tabs(response: &Value) -> impl Iterator<Item = &Value> {
    response
        .pointer("/displayedLists/tabs")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// Bracket round tables of a playoff response with their round numbers,
/// skipping the standings table.
fn round_tables(response: &Value) -> Result<Vec<(u32, &Value)>> {
    array_field(response, "tableList", "playoffs")?
        .iter()
        .filter(|table| table.get("caption").and_then(Value::as_str) != Some(STANDINGS_CAPTION))
        .map(|table| {
            let caption = str_field(table, "caption", "playoff round")?;
            let round = trailing_number(caption).ok_or_else(|| {
                FantraxError::malformed("playoff round", format!("no round number in caption {caption:?}"))
            })?;
            Ok((round, table))
        })
        .collect()
}

