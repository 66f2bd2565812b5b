//! Client configuration.

use crate::core::http::COOKIE_ENV_VAR;
use crate::error::{FantraxError, Result};
use crate::ids::LeagueId;
use crate::LEAGUE_ID_ENV_VAR;

/// Fixed request endpoint of the Fantrax web API.
pub const FANTRAX_ENDPOINT: &str = "https://www.fantrax.com/fxpa/req";

/// Environment variable overriding the endpoint (mock servers, proxies).
pub const ENDPOINT_ENV_VAR: &str = "FANTRAX_ENDPOINT";

pub const DEFAULT_USER_AGENT: &str = concat!("fantrax-api/", env!("CARGO_PKG_VERSION"));

/// Everything needed to talk to one league.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub league_id: LeagueId,
    pub endpoint: String,
    pub user_agent: String,
    /// Raw `Cookie` header of an already logged-in session.
    pub cookie: Option<String>,
}

impl ClientConfig {
    pub fn new(league_id: LeagueId) -> Self {
        Self {
            league_id,
            endpoint: FANTRAX_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cookie: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Resolve configuration from `FANTRAX_LEAGUE_ID`, `FANTRAX_ENDPOINT` and
    /// `FANTRAX_COOKIE`. An explicit league id takes precedence over the env.
    pub fn from_env(league_id: Option<LeagueId>) -> Result<Self> {
        let league_id = resolve_league_id(league_id)?;
        let mut config = Self::new(league_id);

        if let Some(endpoint) = non_blank_env(ENDPOINT_ENV_VAR) {
            config.endpoint = endpoint;
        }
        config.cookie = non_blank_env(COOKIE_ENV_VAR);

        Ok(config)
    }
}

/// Resolve league ID from the argument or the environment variable.
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    match league_id {
        Some(id) => Ok(id),
        None => match non_blank_env(LEAGUE_ID_ENV_VAR) {
            Some(raw) => raw.parse(),
            None => Err(FantraxError::MissingLeagueId {
                env_var: LEAGUE_ID_ENV_VAR.to_string(),
            }),
        },
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_fixed_endpoint() {
        let config = ClientConfig::new(LeagueId::new("abc"));
        assert_eq!(config.endpoint, "https://www.fantrax.com/fxpa/req");
        assert!(config.user_agent.starts_with("fantrax-api/"));
        assert!(config.cookie.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new(LeagueId::new("abc"))
            .with_endpoint("http://localhost:1234/fxpa/req")
            .with_cookie("FX_RM=1");
        assert_eq!(config.endpoint, "http://localhost:1234/fxpa/req");
        assert_eq!(config.cookie.as_deref(), Some("FX_RM=1"));
    }

    #[test]
    fn test_from_env_resolution() {
        // Env mutations share process state, so all cases run in one test.
        std::env::remove_var(LEAGUE_ID_ENV_VAR);
        std::env::remove_var(ENDPOINT_ENV_VAR);
        std::env::remove_var(COOKIE_ENV_VAR);

        let err = ClientConfig::from_env(None).unwrap_err();
        assert!(matches!(err, FantraxError::MissingLeagueId { .. }));

        let config = ClientConfig::from_env(Some(LeagueId::new("explicit"))).unwrap();
        assert_eq!(config.league_id.as_str(), "explicit");
        assert_eq!(config.endpoint, FANTRAX_ENDPOINT);

        std::env::set_var(LEAGUE_ID_ENV_VAR, "from-env");
        std::env::set_var(ENDPOINT_ENV_VAR, "http://127.0.0.1:9/req");
        std::env::set_var(COOKIE_ENV_VAR, "FX_RM=2");

        let config = ClientConfig::from_env(None).unwrap();
        assert_eq!(config.league_id.as_str(), "from-env");
        assert_eq!(config.endpoint, "http://127.0.0.1:9/req");
        assert_eq!(config.cookie.as_deref(), Some("FX_RM=2"));

        let config = ClientConfig::from_env(Some(LeagueId::new("explicit"))).unwrap();
        assert_eq!(config.league_id.as_str(), "explicit");

        std::env::remove_var(LEAGUE_ID_ENV_VAR);
        std::env::remove_var(ENDPOINT_ENV_VAR);
        std::env::remove_var(COOKIE_ENV_VAR);
    }
}
