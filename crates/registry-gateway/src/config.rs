//! Client configuration
//!
//! One explicit config object, constructed at startup and passed into the
//! gateway and engine; nothing reads ambient global state.

use std::time::Duration;

/// Registry client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Backend base URL
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Directory page size applied before the user picks one (10/20/50)
    pub default_page_size: u64,
}

impl RegistryConfig {
    /// Configuration for a backend base URL, with defaults elsewhere
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the per-request timeout
    #[inline]
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the default page size
    #[inline]
    #[must_use]
    pub fn with_default_page_size(mut self, size: u64) -> Self {
        self.default_page_size = size;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
            default_page_size: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = RegistryConfig::new("https://registry.example")
            .with_request_timeout(Duration::from_secs(5))
            .with_default_page_size(20);

        assert_eq!(config.base_url, "https://registry.example");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.default_page_size, 20);
    }
}
