//! Domain objects mapped from Fantrax payloads.
//!
//! Every mapper takes the raw payload fragment plus the league's
//! [`ReferenceData`](crate::reference::ReferenceData) and never touches the
//! network. Teams are shared `Arc<Team>` handles taken from the reference
//! data at construction time.

pub mod game;
pub mod live_scoring;
pub mod matchup;
pub mod player;
pub mod position;
pub mod roster;
pub mod scoring_period;
pub mod standings;
pub mod status;
pub mod team;
pub mod trade;
pub mod trade_block;
pub mod transaction;

pub use game::Game;
pub use live_scoring::{live_scores_from_payload, LiveScores};
pub use matchup::{Matchup, MatchupSide};
pub use player::Player;
pub use position::{Position, PositionCount};
pub use roster::{Roster, RosterRow};
pub use scoring_period::{Bracket, PeriodState, ScoringPeriod, ScoringPeriodResult};
pub use standings::{Record, Standings};
pub use status::Status;
pub use team::Team;
pub use trade::{Trade, TradeAsset, TradeItem, TradedPick, TradedPlayer};
pub use trade_block::TradeBlock;
pub use transaction::{group_transactions, Transaction, TransactionPlayer};
