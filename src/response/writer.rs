//! Envelope, redirect and HTML responses.

use axum::body::{Body, Bytes};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, LOCATION,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;
use tracing::error;

use crate::envelope::{Envelope, INTERNAL_SERVER_ERROR_BODY};
use crate::metrics;
use crate::util::HttpUtil;

const APPLICATION_JSON: &str = "application/json";
const TEXT_HTML: &str = "text/html; charset=utf-8";

/// Attach permissive cross-origin headers.
pub fn accept_all_request(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

impl HttpUtil {
    /// Write `data` wrapped in an envelope with `status` and `messages`.
    ///
    /// If the envelope cannot be serialized the response is the fixed
    /// internal-error envelope instead.
    pub fn json<T: Serialize>(
        &self,
        status: StatusCode,
        messages: Vec<String>,
        data: T,
    ) -> Response {
        match Envelope::new(status, messages, data).to_vec() {
            Ok(body) => self.write(status, Some(APPLICATION_JSON), Body::from(body)),
            Err(err) => {
                error!(
                    error = %err,
                    status = status.as_u16(),
                    "failed to serialize response envelope"
                );
                metrics::inc_serialization_fallbacks();
                self.internal_server_error()
            }
        }
    }

    /// Write the fixed internal-error envelope with status 500.
    pub fn internal_server_error(&self) -> Response {
        self.write(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(APPLICATION_JSON),
            Body::from(Bytes::from_static(INTERNAL_SERVER_ERROR_BODY)),
        )
    }

    /// Answer a malformed request with an example of the expected shape.
    pub fn decode_hint<T: Serialize>(&self, example: T) -> Response {
        self.json(
            StatusCode::BAD_REQUEST,
            vec![self.config.decode_request_error.message().to_string()],
            example,
        )
    }

    /// Redirect permanently (301) to `url`.
    pub fn redirect(&self, url: &str) -> Response {
        let location = match HeaderValue::from_str(url) {
            Ok(location) => location,
            Err(err) => {
                error!(error = %err, "invalid redirect location");
                return self.internal_server_error();
            }
        };

        let mut response = self.write(StatusCode::MOVED_PERMANENTLY, None, Body::empty());
        response.headers_mut().insert(LOCATION, location);
        response
    }

    /// Write an HTML body.
    pub fn html(&self, status: StatusCode, body: impl Into<String>) -> Response {
        self.write(status, Some(TEXT_HTML), Body::from(body.into()))
    }

    fn write(&self, status: StatusCode, content_type: Option<&'static str>, body: Body) -> Response {
        let mut response = Response::new(body);
        *response.status_mut() = status;

        let headers = response.headers_mut();
        if self.config.cors {
            accept_all_request(headers);
        }
        if let Some(content_type) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        metrics::record_response(status);
        response
    }
}
