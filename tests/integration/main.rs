//! Integration tests for the public helper surface.
//!
//! Run with: cargo test --test integration

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use axum::http::{self, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower::ServiceExt;

use httputil::{
    ContentType, Decoded, Envelope, HandlerError, HttpUtil, Sentinel, UtilConfig,
    ERR_INTERNAL_SERVER_ERROR,
};

static BAD_INPUT: Sentinel = Sentinel::new("bad input");
static NOT_FOUND: Sentinel = Sentinel::new("order not found");

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: u64,
    #[serde(default)]
    items: Vec<String>,
}

/// Looks up an order; id 0 is an internal fault, id 404 does not exist.
async fn get_order(State(util): State<HttpUtil>, Decoded(order): Decoded<Order>) -> Response {
    let result = match order.id {
        0 => Err(HandlerError::from(&ERR_INTERNAL_SERVER_ERROR)),
        404 => Err(HandlerError::from(&NOT_FOUND)),
        _ => Ok(order),
    };
    util.respond(result, StatusCode::NOT_FOUND, vec!["found".to_string()])
}

/// Decodes manually so the decode sentinel flows through the classifier.
async fn create_order(State(util): State<HttpUtil>, req: Request) -> Response {
    let result = util.decode_request::<Order>(req).await;
    util.respond(result, StatusCode::CONFLICT, vec!["created".to_string()])
}

fn app(config: UtilConfig) -> Router {
    Router::new()
        .route("/orders/lookup", post(get_order))
        .route("/orders", post(create_order))
        .with_state(HttpUtil::new(config))
}

async fn call(app: Router, uri: &str, content_type: &str, body: &'static str) -> Response {
    app.oneshot(
        http::Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn success_passes_data_through() {
    let response = call(
        app(UtilConfig::default()),
        "/orders/lookup",
        "application/json",
        r#"{"id":1}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(
        body_string(response).await,
        r#"{"status_code":200,"messages":["found"],"data":{"id":1,"items":[]}}"#
    );
}

#[tokio::test]
async fn internal_sentinel_yields_fixed_envelope() {
    let response = call(
        app(UtilConfig::default()),
        "/orders/lookup",
        "application/json",
        r#"{"id":0,"items":["secret"]}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_string(response).await,
        r#"{"status_code":500,"messages":["Internal Server Error"],"data":null}"#
    );
}

#[tokio::test]
async fn unconfigured_sentinel_is_generic() {
    let response = call(
        app(UtilConfig::default()),
        "/orders/lookup",
        "application/json",
        r#"{"id":404}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        r#"{"status_code":404,"messages":["order not found"],"data":null}"#
    );
}

#[tokio::test]
async fn custom_decode_sentinel_reaches_client() {
    let config = UtilConfig::default().with_decode_request_error(&BAD_INPUT);
    let response = call(app(config), "/orders", "application/json", "{oops").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        r#"{"status_code":400,"messages":["bad input"],"data":null}"#
    );
}

#[tokio::test]
async fn empty_bodies_decode_to_default_in_both_modes() {
    for content_type in [ContentType::Json, ContentType::Form] {
        let config = UtilConfig::default().with_request_content_type(content_type);
        let response = call(app(config), "/orders", "text/plain", "").await;

        assert_eq!(response.status(), StatusCode::OK, "mode {content_type}");
        assert_eq!(
            body_string(response).await,
            r#"{"status_code":200,"messages":["created"],"data":{"id":0,"items":[]}}"#
        );
    }
}

#[tokio::test]
async fn form_mode_decodes_fields() {
    let config = UtilConfig::default().with_request_content_type(ContentType::Form);
    let response = call(
        app(config),
        "/orders",
        "application/x-www-form-urlencoded",
        "id=12",
    )
    .await;

    let envelope: Envelope<Order> = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.data.id, 12);
}

#[tokio::test]
async fn cors_headers_on_every_response() {
    let config = UtilConfig::default().with_cors(true);

    for body in [r#"{"id":3}"#, r#"{"id":0}"#, "not json"] {
        let response = call(app(config), "/orders/lookup", "application/json", body).await;
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }
}

#[test]
fn envelope_survives_a_round_trip() {
    let original = Envelope::new(
        StatusCode::ACCEPTED,
        vec!["queued".to_string()],
        json!({"order": {"id": 9, "items": ["tea"]}, "eta": null}),
    );

    let encoded = original.to_vec().unwrap();
    let decoded: Envelope = serde_json::from_slice(&encoded).unwrap();
    assert_eq!(decoded, original);
}
