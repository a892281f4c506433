//! Client configuration
//!
//! One immutable configuration value per client instance. Built through
//! [`ClientConfigBuilder`]; the infra crate can also load it from the
//! environment or a TOML file.

use crate::constants::{
    DEFAULT_LOOKUP_URL, DEFAULT_MATCH_FILE_URL, DEFAULT_MATCH_URL, DEFAULT_SEARCH_URL,
    DEFAULT_TAG_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{PermIdError, Result};

/// Endpoint URLs, credential, and timeout for one client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Lookup base URL; the entity identifier is appended to the path.
    pub lookup_url: String,
    pub search_url: String,
    pub match_url: String,
    pub match_file_url: String,
    pub tag_url: String,
    /// Credential token. `None` sends unauthenticated requests.
    pub access_token: Option<String>,
    /// Request timeout applied to every call.
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            match_url: DEFAULT_MATCH_URL.to_string(),
            match_file_url: DEFAULT_MATCH_FILE_URL.to_string(),
            tag_url: DEFAULT_TAG_URL.to_string(),
            access_token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a builder for fluent configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// A default configuration carrying the given credential token.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self { access_token: normalize_token(token.into()), ..Self::default() }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn lookup_url(mut self, url: impl Into<String>) -> Self {
        self.config.lookup_url = url.into();
        self
    }

    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.config.search_url = url.into();
        self
    }

    pub fn match_url(mut self, url: impl Into<String>) -> Self {
        self.config.match_url = url.into();
        self
    }

    pub fn match_file_url(mut self, url: impl Into<String>) -> Self {
        self.config.match_file_url = url.into();
        self
    }

    pub fn tag_url(mut self, url: impl Into<String>) -> Self {
        self.config.tag_url = url.into();
        self
    }

    /// Set the credential token. An empty token means unauthenticated.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = normalize_token(token.into());
        self
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.timeout_seconds = seconds;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PermIdError::Config`] when an endpoint URL is empty or
    /// the timeout is zero.
    pub fn build(self) -> Result<ClientConfig> {
        let config = self.config;
        for (name, url) in [
            ("lookup", &config.lookup_url),
            ("search", &config.search_url),
            ("match", &config.match_url),
            ("match-file", &config.match_file_url),
            ("tag", &config.tag_url),
        ] {
            if url.is_empty() {
                return Err(PermIdError::Config(format!("{name} URL must not be empty")));
            }
        }
        if config.timeout_seconds == 0 {
            return Err(PermIdError::Config("timeout must be positive".to_string()));
        }
        Ok(config)
    }
}

fn normalize_token(token: String) -> Option<String> {
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_public_service() {
        let config = ClientConfig::default();
        assert_eq!(config.lookup_url, DEFAULT_LOOKUP_URL);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.access_token.is_none());
    }

    #[test]
    fn empty_token_means_unauthenticated() {
        let config = ClientConfig::builder().access_token("").build().unwrap();
        assert!(config.access_token.is_none());
    }

    #[test]
    fn builder_rejects_empty_urls_and_zero_timeout() {
        assert!(ClientConfig::builder().search_url("").build().is_err());
        assert!(ClientConfig::builder().timeout_seconds(0).build().is_err());
    }
}
