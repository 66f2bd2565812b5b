//! Fantrax API Client Library
//!
//! A typed async client for Fantrax fantasy sports leagues. It talks to the
//! single `fxpa/req` endpoint and maps the UI-oriented JSON it returns into
//! teams, standings, schedules, rosters, trades, transactions and live scores.
//!
//! ## Features
//!
//! - **Batched Transport**: every call is one POST carrying one or more named methods
//! - **Reference Data**: positions, statuses, scoring periods, scoring days and teams loaded once per league
//! - **Period Reconciliation**: year-less dates and captions resolved against the season
//! - **Typed Domain Objects**: standings records, matchups, rosters, games, trades and more
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fantrax_api::{ClientConfig, FantraxClient, League, LeagueId};
//!
//! # async fn example() -> fantrax_api::Result<()> {
//! let config = ClientConfig::new(LeagueId::new("abc123"));
//! let mut league = League::connect(FantraxClient::new(config)?).await?;
//!
//! let standings = league.standings(None, false).await?;
//! println!("{standings}");
//!
//! for (number, result) in league.scoring_period_results(true, true).await? {
//!     println!("{number}: {}", result.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! `ClientConfig::from_env` reads the league id, and optionally the endpoint
//! and a logged-in session cookie:
//! ```bash
//! export FANTRAX_LEAGUE_ID=abc123
//! export FANTRAX_COOKIE="JSESSIONID=..."
//! ```

pub mod core;
pub mod error;
pub mod fantrax;
pub mod ids;
pub mod league;
pub mod models;
pub mod reconcile;
pub mod reference;
pub mod util;

#[cfg(test)]
mod test_fixtures;

// Re-export commonly used types
pub use crate::core::{Clock, ClientConfig, FixedClock, SystemClock};
pub use error::{FantraxError, Result};
pub use fantrax::{FantraxClient, Method};
pub use ids::LeagueId;
pub use league::League;
pub use reference::ReferenceData;

pub const LEAGUE_ID_ENV_VAR: &str = "FANTRAX_LEAGUE_ID";
