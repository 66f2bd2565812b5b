//! Wire types of the `fxpa/req` envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
mod tests;

/// One message of a request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgBlock {
    pub method: String,
    pub data: Map<String, Value>,
}

/// Top-level request body: `{"msgs": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub msgs: Vec<MsgBlock>,
}

/// One response slot; its `data` is method-specific.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseItem {
    #[serde(default)]
    pub data: Value,
}

/// Application-level error object embedded in an otherwise successful response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Top-level response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub responses: Vec<ResponseItem>,
    #[serde(rename = "pageError", default)]
    pub page_error: Option<PageError>,
}
