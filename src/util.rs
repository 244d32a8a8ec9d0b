//! The request/response helper shared by handlers.

use crate::config::UtilConfig;

/// Decodes requests and writes envelope responses according to a fixed
/// [`UtilConfig`].
///
/// Cheap to clone; use it directly as axum state or expose it through
/// [`FromRef`](axum::extract::FromRef).
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpUtil {
    pub(crate) config: UtilConfig,
}

impl HttpUtil {
    /// Create a helper from its configuration.
    pub fn new(config: UtilConfig) -> Self {
        Self { config }
    }

    /// The configuration this helper was built with.
    pub fn config(&self) -> &UtilConfig {
        &self.config
    }
}

impl From<UtilConfig> for HttpUtil {
    fn from(config: UtilConfig) -> Self {
        Self::new(config)
    }
}
