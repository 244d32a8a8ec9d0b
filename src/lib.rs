//! Uniform JSON responses and request decoding for axum servers.
//!
//! Every JSON response carries the same envelope, success or failure:
//!
//! ```text
//! {"status_code": 404, "messages": ["user not found"], "data": null}
//! ```
//!
//! [`HttpUtil`] owns an immutable [`UtilConfig`]: the request content type,
//! two sentinel errors and a CORS flag. Handlers decode with it and hand their
//! outcome back to it for writing.
//!
//! # Error classification
//!
//! | error                          | status       | messages         | data      |
//! |--------------------------------|--------------|------------------|-----------|
//! | configured internal sentinel   | 500          | fixed            | `null`    |
//! | configured decode sentinel     | 400          | `[error text]`   | `null`    |
//! | any other error                | caller's     | `[error text]`   | `null`    |
//! | none                           | 200          | caller's         | caller's  |
//!
//! # Modules
//!
//! - [`config`]: Helper configuration and environment loading
//! - [`error`]: Sentinels and error types
//! - [`envelope`]: The response body shape
//! - [`request`]: JSON/form decoding and the [`Decoded`] extractor
//! - [`response`]: Envelope writing and error classification
//! - [`metrics`]: Response and decode counters
//! - [`api`]: Demo router exercising the helper

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod metrics;
pub mod request;
pub mod response;
pub mod util;

pub use config::{Config, ContentType, UtilConfig};
pub use envelope::Envelope;
pub use error::{HandlerError, Result, Sentinel, ERR_DECODE_REQUEST, ERR_INTERNAL_SERVER_ERROR};
pub use request::Decoded;
pub use response::ErrorClass;
pub use util::HttpUtil;
