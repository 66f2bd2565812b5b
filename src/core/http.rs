//! HTTP utilities for Fantrax API communication

use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::Client;

/// Environment variable holding a raw `Cookie` header for a logged-in session.
pub const COOKIE_ENV_VAR: &str = "FANTRAX_COOKIE";

/// Default headers for a JSON request, carrying the cookie when present.
///
/// A blank cookie is treated as absent (public leagues).
pub fn default_header_map(cookie: Option<&str>) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(cookie) = cookie.map(str::trim).filter(|c| !c.is_empty()) {
        h.insert(COOKIE, HeaderValue::from_str(cookie)?);
    }
    Ok(h)
}

/// Build a `reqwest` client with the given user agent and optional cookie.
///
/// Callers that manage their own authenticated session should build the
/// client themselves and hand it to `FantraxClient::with_session` instead.
pub fn build_session(user_agent: &str, cookie: Option<&str>) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .default_headers(default_header_map(cookie)?)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header_map_with_cookie() {
        let headers = default_header_map(Some(" FX_RM=abc; JSESSIONID=xyz ")).unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(headers.get(COOKIE).unwrap(), "FX_RM=abc; JSESSIONID=xyz");
    }

    #[test]
    fn test_default_header_map_without_cookie() {
        let headers = default_header_map(None).unwrap();
        assert!(headers.contains_key(ACCEPT));
        assert!(!headers.contains_key(COOKIE));

        let headers = default_header_map(Some("   ")).unwrap();
        assert!(!headers.contains_key(COOKIE));
    }

    #[test]
    fn test_default_header_map_rejects_invalid_value() {
        let err = default_header_map(Some("bad\ncookie")).unwrap_err();
        assert!(matches!(err, crate::FantraxError::InvalidHeader(_)));
    }

    #[test]
    fn test_build_session_with_and_without_cookie() {
        assert!(build_session("fantrax-api/0.1", None).is_ok());
        assert!(build_session("fantrax-api/0.1", Some("FX_RM=abc")).is_ok());
    }
}
