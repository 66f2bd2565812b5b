//! Fantrax backend access: wire types, transport and named calls.

pub mod api;
pub mod http;
pub mod types;

pub use http::{FantraxClient, Method};
