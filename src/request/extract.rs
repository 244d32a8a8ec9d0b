//! Axum extractor decoding with the [`HttpUtil`] held in router state.

use axum::async_trait;
use axum::extract::{FromRef, FromRequest, Request};
use axum::http::StatusCode;
use axum::response::Response;
use serde::de::DeserializeOwned;

use crate::util::HttpUtil;

/// Request body decoded per the configured content type.
///
/// Rejects with the classified decode error, a 400 envelope carrying the
/// decode sentinel's message.
///
/// ```no_run
/// use axum::{routing::post, Router};
/// use axum::response::Response;
/// use axum::http::StatusCode;
/// use httputil::{Decoded, HttpUtil};
///
/// #[derive(Default, serde::Deserialize, serde::Serialize)]
/// struct Ping { seq: u32 }
///
/// async fn ping(
///     axum::extract::State(util): axum::extract::State<HttpUtil>,
///     Decoded(ping): Decoded<Ping>,
/// ) -> Response {
///     util.json(StatusCode::OK, vec!["pong".into()], ping)
/// }
///
/// let app: Router = Router::new()
///     .route("/ping", post(ping))
///     .with_state(HttpUtil::default());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoded<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Decoded<T>
where
    HttpUtil: FromRef<S>,
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let util = HttpUtil::from_ref(state);

        match util.decode_request(req).await {
            Ok(value) => Ok(Decoded(value)),
            Err(err) => Err(util.error_json(Some(&err), StatusCode::BAD_REQUEST, Vec::new(), ())),
        }
    }
}
