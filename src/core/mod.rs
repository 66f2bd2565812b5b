//! Core utilities for the Fantrax API client
//!
//! This module consolidates the ambient pieces the league facade builds on:
//! - `clock`: injectable source of "today"
//! - `config`: client configuration resolved from code or the environment
//! - `http`: default headers and session construction

pub mod clock;
pub mod config;
pub mod http;

// Re-export commonly used items for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ClientConfig;
pub use http::{build_session, default_header_map};
