//! Request transport for the Fantrax `fxpa/req` endpoint.
//!
//! Every call is a single POST whose body batches one or more named methods:
//!
//! ```json
//! {"msgs": [{"method": "getStandings", "data": {"leagueId": "abc", "view": "SCHEDULE"}}]}
//! ```
//!
//! The server answers with `{"responses": [{"data": ...}, ...]}` in request
//! order, or with a `pageError` object describing an application failure.

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{build_session, ClientConfig};
use crate::error::{FantraxError, Result};
use crate::fantrax::types::{MsgBlock, PageError, RequestEnvelope, ResponseEnvelope};
use crate::ids::LeagueId;


/// One named backend method with its keyword parameters.
///
/// Parameters are sent as strings; dates are formatted `YYYY-MM-DD` and absent
/// optional values are left out of the message entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    name: String,
    params: Vec<(String, String)>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a parameter, rendered with `to_string`.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a parameter only when a value is present.
    pub fn opt_param<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Add a date parameter formatted as `YYYY-MM-DD`.
    pub fn date_param(self, key: &str, value: NaiveDate) -> Self {
        self.param(key, value.format("%Y-%m-%d"))
    }

    /// Render the message block sent for this method.
    pub fn msg_block(&self, league_id: &LeagueId) -> MsgBlock {
        let mut data = Map::new();
        data.insert("leagueId".to_string(), Value::String(league_id.to_string()));
        for (key, value) in &self.params {
            data.insert(key.clone(), Value::String(value.clone()));
        }
        MsgBlock {
            method: self.name.clone(),
            data,
        }
    }
}

/// Handle to one league's endpoint over an injected HTTP session.
#[derive(Debug, Clone)]
pub struct FantraxClient {
    http: Client,
    endpoint: String,
    league_id: LeagueId,
}

impl FantraxClient {
    /// Build a client (and its own session) from configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_session(&config.user_agent, config.cookie.as_deref())?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
            league_id: config.league_id,
        })
    }

    /// Use an externally built, possibly pre-authenticated, session.
    pub fn with_session(http: Client, config: ClientConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint,
            league_id: config.league_id,
        }
    }

    pub fn league_id(&self) -> &LeagueId {
        &self.league_id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one method and return its response body.
    pub async fn request_one(&self, method: Method) -> Result<Value> {
        let mut bodies = self.request(std::slice::from_ref(&method)).await?;
        Ok(bodies.swap_remove(0))
    }

    /// Send a batch of methods and return their bodies in request order.
    pub async fn request(&self, methods: &[Method]) -> Result<Vec<Value>> {
        let envelope = RequestEnvelope {
            msgs: methods
                .iter()
                .map(|m| m.msg_block(&self.league_id))
                .collect(),
        };
        let method_names = methods
            .iter()
            .map(Method::name)
            .collect::<Vec<_>>()
            .join(", ");

        debug!(league_id = %self.league_id, methods = %method_names, request = ?envelope, "Sending Fantrax request");

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("leagueId", self.league_id.as_str())])
            .json(&envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), body_len = body.len(), "Received Fantrax response");

        if status.as_u16() >= 400 {
            return Err(FantraxError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        decode_response(&body, methods.len(), &method_names)
    }
}

/// Decode a response body into one payload per requested method.
pub fn decode_response(body: &str, expected: usize, method_names: &str) -> Result<Vec<Value>> {
    let raw: Value = serde_json::from_str(body).map_err(|e| FantraxError::InvalidResponse {
        methods: method_names.to_string(),
        message: e.to_string(),
    })?;

    let envelope: ResponseEnvelope = serde_json::from_value(raw.clone())?;

    if let Some(page_error) = envelope.page_error {
        if let Some(err) = page_error_to_error(page_error, &raw) {
            return Err(err);
        }
    }

    if envelope.responses.len() < expected {
        return Err(FantraxError::malformed(
            "response envelope",
            format!(
                "expected {expected} responses to [{method_names}], got {}",
                envelope.responses.len()
            ),
        ));
    }

    Ok(envelope
        .responses
        .into_iter()
        .take(expected)
        .map(|r| r.data)
        .collect())
}

/// Translate a `pageError` object; an error without a code is not a failure.
fn page_error_to_error(page_error: PageError, raw: &Value) -> Option<FantraxError> {
    let code = page_error.code?;
    Some(match code.as_str() {
        "WARNING_NOT_LOGGED_IN" => FantraxError::NotLoggedIn,
        "NOT_MEMBER_OF_LEAGUE" => FantraxError::NotMemberOfLeague,
        _ => FantraxError::Server {
            code: Some(code),
            title: page_error.title,
            payload: raw.to_string(),
        },
    })
}
