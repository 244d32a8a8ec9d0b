//! JSON and form body decoding.

use axum::extract::Request;
use serde::de::DeserializeOwned;
use tracing::{error, instrument, warn};
use validator::Validate;

use crate::config::ContentType;
use crate::error::{DecodeError, HandlerError};
use crate::metrics;
use crate::util::HttpUtil;

/// Decode the first JSON value of a body.
///
/// An empty or all-whitespace body, or a literal `null`, yields `T::default()`.
/// Anything after the first value is ignored.
pub fn decode_json<T>(body: &[u8]) -> Result<T, DecodeError>
where
    T: DeserializeOwned + Default,
{
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<T>>();

    match values.next() {
        Some(value) => Ok(value?.unwrap_or_default()),
        None => Ok(T::default()),
    }
}

/// Decode URL-encoded form fields from `body` merged with `query`.
///
/// Body fields come first; a query field whose name already appeared is
/// dropped. No fields at all yields `T::default()`.
pub fn decode_form<T>(body: &[u8], query: Option<&str>) -> Result<T, DecodeError>
where
    T: DeserializeOwned + Default,
{
    let mut fields: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;
    let query: Vec<(String, String)> =
        serde_urlencoded::from_str(query.unwrap_or_default())?;

    for (name, value) in query {
        if !fields.iter().any(|(seen, _)| *seen == name) {
            fields.push((name, value));
        }
    }

    if fields.is_empty() {
        return Ok(T::default());
    }
    Ok(serde_urlencoded::from_str(&serde_urlencoded::to_string(&fields)?)?)
}

impl HttpUtil {
    /// Decode an already-buffered body according to the configured content
    /// type. Failures are logged and reported as the decode sentinel.
    pub fn decode<T>(&self, body: &[u8], query: Option<&str>) -> Result<T, HandlerError>
    where
        T: DeserializeOwned + Default,
    {
        let decoded = match self.config.request_content_type {
            ContentType::Json => decode_json(body),
            ContentType::Form => decode_form(body, query),
        };
        decoded.map_err(|err| self.decode_failure(err))
    }

    /// Buffer the request body, up to the configured limit, and decode it.
    #[instrument(skip_all, fields(method = %req.method(), uri = %req.uri()))]
    pub async fn decode_request<T>(&self, req: Request) -> Result<T, HandlerError>
    where
        T: DeserializeOwned + Default,
    {
        let _timer = metrics::timer_decode();
        let (parts, body) = req.into_parts();

        let bytes = axum::body::to_bytes(body, self.config.max_body_bytes)
            .await
            .map_err(|err| self.decode_failure(err.into()))?;

        self.decode(&bytes, parts.uri.query())
    }

    /// Decode the request, then validate the result.
    ///
    /// Validation failures come back as [`HandlerError::Validation`], which
    /// the classifier treats as a generic error.
    pub async fn decode_validate<T>(&self, req: Request) -> Result<T, HandlerError>
    where
        T: DeserializeOwned + Default + Validate,
    {
        let value: T = self.decode_request(req).await?;

        if let Err(errors) = value.validate() {
            warn!(error = %errors, "request failed validation");
            return Err(errors.into());
        }
        Ok(value)
    }

    fn decode_failure(&self, err: DecodeError) -> HandlerError {
        error!(
            error = %err,
            content_type = %self.config.request_content_type,
            "failed to decode request"
        );
        metrics::inc_decode_failures();
        self.config.decode_request_error.into()
    }
}
