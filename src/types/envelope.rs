//! The JSON envelope every API response is wrapped in.

use serde::Deserialize;
use serde_json::Value;

/// Outer wrapper of an API response.
///
/// On success `data` holds the payload; on failure `error_type` and
/// `message` describe the error.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// `"success"` or `"error"`; kept as a string so that other values still
    /// parse.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Whether the body reports a failure, either through `status` or by
    /// carrying an `error_type`.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error") || self.error_type.is_some()
    }
}
