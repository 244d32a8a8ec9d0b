//! Helper configuration and environment loading.

use serde::Deserialize;
use strum::{Display, EnumString};

use crate::error::{ConfigError, Sentinel, ERR_DECODE_REQUEST, ERR_INTERNAL_SERVER_ERROR};

/// Default request body limit, matching axum's own default.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// How request bodies are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ContentType {
    /// `application/json`.
    #[default]
    #[strum(to_string = "json", serialize = "application/json")]
    Json,
    /// `application/x-www-form-urlencoded`.
    #[strum(to_string = "form", serialize = "application/x-www-form-urlencoded")]
    Form,
}

/// Immutable configuration of an [`HttpUtil`](crate::HttpUtil).
///
/// Built once during setup, then handed to [`HttpUtil::new`](crate::HttpUtil::new).
///
/// ```
/// use httputil::config::{ContentType, UtilConfig};
/// use httputil::error::Sentinel;
///
/// static STORE_DOWN: Sentinel = Sentinel::new("store unavailable");
///
/// let config = UtilConfig::default()
///     .with_request_content_type(ContentType::Form)
///     .with_application_error(&STORE_DOWN)
///     .with_cors(true);
///
/// assert!(config.application_error.is(&STORE_DOWN));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UtilConfig {
    /// Content type used to decode request bodies.
    pub request_content_type: ContentType,
    /// Sentinel answered with the fixed 500 envelope.
    pub application_error: &'static Sentinel,
    /// Sentinel answered with 400 and its own message.
    pub decode_request_error: &'static Sentinel,
    /// Attach permissive cross-origin headers to every response.
    pub cors: bool,
    /// Largest request body buffered while decoding.
    pub max_body_bytes: usize,
}

impl Default for UtilConfig {
    fn default() -> Self {
        Self {
            request_content_type: ContentType::Json,
            application_error: &ERR_INTERNAL_SERVER_ERROR,
            decode_request_error: &ERR_DECODE_REQUEST,
            cors: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl UtilConfig {
    /// Set the request content type.
    pub fn with_request_content_type(mut self, content_type: ContentType) -> Self {
        self.request_content_type = content_type;
        self
    }

    /// Set the "internal error" sentinel.
    pub fn with_application_error(mut self, sentinel: &'static Sentinel) -> Self {
        self.application_error = sentinel;
        self
    }

    /// Set the "decode error" sentinel.
    pub fn with_decode_request_error(mut self, sentinel: &'static Sentinel) -> Self {
        self.decode_request_error = sentinel;
        self
    }

    /// Enable or disable permissive CORS headers.
    pub fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    /// Set the request body limit.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Process configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Helper ===
    /// Request content type name: `json` or `form`.
    #[serde(default = "default_content_type")]
    pub request_content_type: String,

    /// Attach permissive CORS headers.
    #[serde(default)]
    pub cors: bool,

    /// Request body limit in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    // === Server ===
    /// HTTP port for the demo server.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_content_type() -> String {
    ContentType::Json.to_string()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.content_type()?;

        if self.max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }

        Ok(())
    }

    /// Parsed request content type.
    pub fn content_type(&self) -> Result<ContentType, ConfigError> {
        self.request_content_type
            .parse()
            .map_err(|_| ConfigError::UnknownContentType(self.request_content_type.clone()))
    }

    /// Log filter directive: debug for this crate when verbose, otherwise
    /// `rust_log`.
    pub fn log_directive(&self, verbose: bool) -> String {
        if verbose || self.verbose {
            "httputil=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Helper configuration with the default sentinels.
    pub fn util_config(&self) -> Result<UtilConfig, ConfigError> {
        self.validate()?;

        Ok(UtilConfig::default()
            .with_request_content_type(self.content_type()?)
            .with_cors(self.cors)
            .with_max_body_bytes(self.max_body_bytes))
    }
}
