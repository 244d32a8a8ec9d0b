//! Maps application errors onto envelope responses.
//!
//! The two configured sentinels always produce their fixed responses, whatever
//! else the caller supplied. Every other error keeps the caller's status but
//! loses its payload; only a successful call passes data through.

use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::HandlerError;
use crate::util::HttpUtil;

/// How an error is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The configured internal sentinel: 500 and the fixed envelope.
    Application,
    /// The configured decode sentinel: 400 and the error text.
    Decode,
    /// Anything else: caller status and the error text.
    Generic,
}

impl HttpUtil {
    /// Classify `err` against the configured sentinels.
    pub fn classify(&self, err: &HandlerError) -> ErrorClass {
        if err.is(self.config.application_error) {
            ErrorClass::Application
        } else if err.is(self.config.decode_request_error) {
            ErrorClass::Decode
        } else {
            ErrorClass::Generic
        }
    }

    /// Respond to the outcome of a handler.
    ///
    /// With no error the response is 200 with `messages` and `data`. With an
    /// error, `status` is used only for errors that are not one of the
    /// configured sentinels, and `data` is dropped.
    pub fn error_json<T: Serialize>(
        &self,
        err: Option<&HandlerError>,
        status: StatusCode,
        messages: Vec<String>,
        data: T,
    ) -> Response {
        let Some(err) = err else {
            return self.json(StatusCode::OK, messages, data);
        };

        match self.classify(err) {
            ErrorClass::Application => {
                warn!(error = %err, "responding with internal server error");
                self.internal_server_error()
            }
            ErrorClass::Decode => self.json(StatusCode::BAD_REQUEST, vec![err.to_string()], ()),
            ErrorClass::Generic => {
                debug!(error = %err, status = status.as_u16(), "responding with error");
                self.json(status, vec![err.to_string()], ())
            }
        }
    }

    /// Respond to a handler result: `Ok` data with `messages`, or the
    /// classified error using `error_status` for generic errors.
    pub fn respond<T: Serialize>(
        &self,
        result: Result<T, HandlerError>,
        error_status: StatusCode,
        messages: Vec<String>,
    ) -> Response {
        match result {
            Ok(data) => self.error_json(None, error_status, messages, data),
            Err(err) => self.error_json(Some(&err), error_status, messages, ()),
        }
    }
}
