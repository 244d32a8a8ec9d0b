//! HTTP API handlers.

use axum::extract::{FromRef, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::HandlerError;
use crate::util::HttpUtil;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Response/request helper.
    pub util: HttpUtil,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(util: HttpUtil) -> Self {
        Self {
            util,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl FromRef<AppState> for HttpUtil {
    fn from_ref(state: &AppState) -> Self {
        state.util
    }
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Body accepted by the echo endpoint.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EchoRequest {
    /// Name to echo back.
    #[validate(length(min = 1, max = 64))]
    #[serde(default)]
    pub name: String,
    /// How many times to repeat it.
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_times")]
    pub times: u8,
}

fn default_times() -> u8 {
    1
}

impl EchoRequest {
    /// Example shown to clients that send something unparseable.
    pub fn example() -> Self {
        Self {
            name: "alice".to_string(),
            times: 2,
        }
    }
}

/// Echo payload.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EchoResponse {
    /// The name, repeated.
    pub echoed: Vec<String>,
}

/// Health check handler - always returns 200.
pub async fn health(State(util): State<HttpUtil>) -> Response {
    util.json(
        StatusCode::OK,
        vec!["ok".to_string()],
        HealthResponse { status: "ok" },
    )
}

/// Describe the echo request shape.
pub async fn echo_example(State(util): State<HttpUtil>) -> Response {
    util.decode_hint(EchoRequest::example())
}

/// Echo handler - decodes, validates and answers through the classifier.
///
/// Undecodable bodies get 400, invalid ones 422.
pub async fn echo(State(util): State<HttpUtil>, req: Request) -> Response {
    let result = util
        .decode_validate::<EchoRequest>(req)
        .await
        .map(|req| EchoResponse {
            echoed: vec![req.name; usize::from(req.times)],
        });

    util.respond(result, StatusCode::UNPROCESSABLE_ENTITY, vec!["echoed".to_string()])
}

/// Permanent redirect to the health endpoint.
pub async fn moved(State(util): State<HttpUtil>) -> Response {
    util.redirect("/health")
}

/// Prometheus metrics, or 503 when no recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => state.util.error_json(
            Some(&HandlerError::other("metrics recorder not installed")),
            StatusCode::SERVICE_UNAVAILABLE,
            Vec::new(),
            (),
        ),
    }
}
