//! The uniform JSON response body.
//!
//! Every JSON response, success or failure, carries the same shape:
//!
//! ```text
//! {"status_code": 200, "messages": ["ok"], "data": {"id": 1}}
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Message of the fixed internal-error envelope.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// Serialized internal-error envelope, used whenever encoding fails.
pub const INTERNAL_SERVER_ERROR_BODY: &[u8] =
    br#"{"status_code":500,"messages":["Internal Server Error"],"data":null}"#;

/// Response envelope: status code, messages and payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    /// Numeric HTTP status, repeated in the body.
    pub status_code: u16,
    /// Human-readable messages.
    pub messages: Vec<String>,
    /// Payload; `null` when absent.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Create an envelope for `status`.
    pub fn new(status: StatusCode, messages: Vec<String>, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            messages,
            data,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Encode to JSON bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl Envelope<()> {
    /// The fixed internal-error envelope.
    pub fn internal_server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            vec![INTERNAL_SERVER_ERROR_MESSAGE.to_string()],
            (),
        )
    }
}
