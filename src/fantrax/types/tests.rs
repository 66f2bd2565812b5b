//! Unit tests for envelope wire types

use super::*;
use serde_json::json;

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn test_request_envelope_serialization() {
        let mut data = Map::new();
        data.insert("leagueId".to_string(), json!("abc"));
        data.insert("view".to_string(), json!("STATS"));

        let envelope = RequestEnvelope {
            msgs: vec![MsgBlock {
                method: "getTeamRosterInfo".to_string(),
                data,
            }],
        };

        let v = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            v,
            json!({"msgs": [{"method": "getTeamRosterInfo", "data": {"leagueId": "abc", "view": "STATS"}}]})
        );
    }

    #[test]
    fn test_response_envelope_with_responses() {
        let v = json!({"responses": [{"data": {"a": 1}}, {"data": [1, 2]}]});
        let envelope: ResponseEnvelope = serde_json::from_value(v).unwrap();

        assert_eq!(envelope.responses.len(), 2);
        assert_eq!(envelope.responses[0].data["a"], 1);
        assert!(envelope.responses[1].data.is_array());
        assert!(envelope.page_error.is_none());
    }

    #[test]
    fn test_response_envelope_with_page_error() {
        let v = json!({"pageError": {"code": "WARNING_NOT_LOGGED_IN", "title": "Please log in"}});
        let envelope: ResponseEnvelope = serde_json::from_value(v).unwrap();

        assert!(envelope.responses.is_empty());
        let page_error = envelope.page_error.unwrap();
        assert_eq!(page_error.code.as_deref(), Some("WARNING_NOT_LOGGED_IN"));
        assert_eq!(page_error.title.as_deref(), Some("Please log in"));
    }

    #[test]
    fn test_page_error_without_code() {
        let v = json!({"pageError": {}});
        let envelope: ResponseEnvelope = serde_json::from_value(v).unwrap();
        let page_error = envelope.page_error.unwrap();
        assert!(page_error.code.is_none());
        assert!(page_error.title.is_none());
    }

    #[test]
    fn test_response_item_missing_data_defaults_to_null() {
        let v = json!({"responses": [{}]});
        let envelope: ResponseEnvelope = serde_json::from_value(v).unwrap();
        assert!(envelope.responses[0].data.is_null());
    }
}
