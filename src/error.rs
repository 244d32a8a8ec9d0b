//! Error types and sentinel values.

use std::fmt;
use std::ptr;

use thiserror::Error;

/// A distinguished error value compared by identity.
///
/// Two sentinels match only when they are the same `static` item. The text is
/// what clients get to see; it plays no part in matching, so two sentinels
/// with identical messages are still different errors.
///
/// ```
/// use httputil::error::Sentinel;
///
/// static NOT_READY: Sentinel = Sentinel::new("not ready");
/// static ALSO_NOT_READY: Sentinel = Sentinel::new("not ready");
///
/// assert!(NOT_READY.is(&NOT_READY));
/// assert!(!NOT_READY.is(&ALSO_NOT_READY));
/// ```
#[derive(Debug)]
pub struct Sentinel {
    message: &'static str,
}

impl Sentinel {
    /// Create a sentinel. Bind it to a `static`, never a `const`.
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }

    /// Client-facing message.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Whether `self` and `other` are the same sentinel.
    pub fn is(&self, other: &Sentinel) -> bool {
        ptr::eq(self, other)
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for Sentinel {}

/// Default "internal error" sentinel.
pub static ERR_INTERNAL_SERVER_ERROR: Sentinel = Sentinel::new("Internal server error");

/// Default "decode error" sentinel.
pub static ERR_DECODE_REQUEST: Sentinel =
    Sentinel::new("Wrong request params format, see example in data");

/// Error handed to the response classifier by application code.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// A sentinel, matched by identity against the configured ones.
    #[error("{0}")]
    Sentinel(&'static Sentinel),

    /// A decoded request failed validation.
    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Any other application error.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Wrap an arbitrary error or message.
    pub fn other<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Other(err.into())
    }

    /// The sentinel carried by this error, if any.
    pub fn sentinel(&self) -> Option<&'static Sentinel> {
        match self {
            Self::Sentinel(sentinel) => Some(sentinel),
            _ => None,
        }
    }

    /// Whether this error is exactly `sentinel`.
    pub fn is(&self, sentinel: &Sentinel) -> bool {
        self.sentinel().is_some_and(|s| s.is(sentinel))
    }
}

impl From<&'static Sentinel> for HandlerError {
    fn from(sentinel: &'static Sentinel) -> Self {
        Self::Sentinel(sentinel)
    }
}

/// Malformed client input. Logged, then reported as the decode sentinel.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// JSON body failed to parse or did not match the target type.
    #[error("invalid json body: {0}")]
    Json(#[from] serde_json::Error),

    /// Form fields failed to parse or did not match the target type.
    #[error("invalid form body: {0}")]
    Form(#[from] serde_urlencoded::de::Error),

    /// Merged body and query fields could not be re-encoded.
    #[error("invalid form fields: {0}")]
    FormMerge(#[from] serde_urlencoded::ser::Error),

    /// Body could not be read, or exceeded the size limit.
    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment could not be deserialized.
    #[error("configuration error: {0}")]
    Env(#[from] envy::Error),

    /// `REQUEST_CONTENT_TYPE` names no supported content type.
    #[error("unknown request content type: {0}")]
    UnknownContentType(String),

    /// `MAX_BODY_BYTES` is zero.
    #[error("MAX_BODY_BYTES must be greater than zero")]
    ZeroBodyLimit,
}

/// Convenient Result type alias.
pub type Result<T, E = HandlerError> = std::result::Result<T, E>;
