//! Error types for the Fantrax API client

use thiserror::Error;


pub type Result<T> = std::result::Result<T, FantraxError>;

#[derive(Error, Debug)]
pub enum FantraxError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Date parsing failed: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Invalid JSON response to {methods}: {message}")]
    InvalidResponse { methods: String, message: String },

    #[error("({status} [{reason}]) {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Not a member of league")]
    NotMemberOfLeague,

    #[error("Fantrax error: {}", server_message(.code, .title, .payload))]
    Server {
        code: Option<String>,
        title: Option<String>,
        payload: String,
    },

    #[error("Team identifier: {identifier} not found in league: {league}")]
    TeamNotInLeague { identifier: String, league: String },

    #[error("Date: {date} not in the season")]
    DateNotInSeason { date: String },

    #[error("Period: {period} not in the season")]
    PeriodNotInSeason { period: String },

    #[error("Unknown position id: {id}")]
    UnknownPosition { id: String },

    #[error("Malformed {context} payload: {detail}")]
    MalformedPayload { context: String, detail: String },

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },
}

fn server_message(code: &Option<String>, title: &Option<String>, payload: &str) -> String {
    match (code, title) {
        (Some(code), Some(title)) => format!("{title} ({code})"),
        (None, Some(title)) => title.clone(),
        _ => payload.to_string(),
    }
}

impl FantraxError {
    pub(crate) fn malformed(context: impl Into<String>, detail: impl Into<String>) -> Self {
        FantraxError::MalformedPayload {
            context: context.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn date_not_in_season(date: impl ToString) -> Self {
        FantraxError::DateNotInSeason {
            date: date.to_string(),
        }
    }

    pub(crate) fn period_not_in_season(period: impl ToString) -> Self {
        FantraxError::PeriodNotInSeason {
            period: period.to_string(),
        }
    }
}
