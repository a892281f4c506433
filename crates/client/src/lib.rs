//! # permid
//!
//! Client for the PermID entity-identification and content-tagging web
//! services: look up an entity by identifier, search entities by query,
//! match free-text or tabular records against canonical entities
//! (inline or as a file upload), and submit text for semantic tagging.
//!
//! Every operation performs at most one HTTP round trip and returns a
//! `Result`; quota telemetry from response headers accumulates in a
//! usage ledger readable through [`PermIdClient::usage`].
//!
//! ```no_run
//! use permid::{PermIdClient, SearchQuery};
//!
//! # async fn run() -> permid::Result<()> {
//! let client = PermIdClient::builder().access_token("<token>").build()?;
//!
//! let results = client.search(SearchQuery::new("IBM")).await?;
//! println!("{results:?}");
//! println!("{:?}", client.usage());
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// Re-export the caller-facing vocabulary
pub use permid_core::ports::HttpTransport;
pub use permid_core::PermIdService;
pub use permid_domain::{
    ClientConfig, ClientConfigBuilder, EntityType, Language, LookupFormat, LookupOptions,
    LookupOutput, MatchDataType, MatchInput, MatchOptions, MatchOutput, Orient, PermIdError,
    Result, SearchFormat, SearchOrder, SearchOutput, SearchQuery, Table, TagContentType,
    TagOptions, TagOutputFormat, UsageSample,
};
pub use permid_infra::telemetry::{self, LogFormat, LogRotation, TelemetryConfig};
pub use permid_infra::{config, ReqwestTransport};

/// Client for the PermID web services.
///
/// Wraps the operation façade around a reqwest transport built from the
/// configuration's timeout. Construct one per configuration; the
/// configuration is immutable for the client's lifetime.
pub struct PermIdClient {
    service: PermIdService,
}

impl PermIdClient {
    /// A client with the default (unauthenticated) configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PermIdError::Config`] if the HTTP stack cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// A client over the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PermIdError::Config`] if the HTTP stack cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { service: PermIdService::new(Arc::new(transport), config) })
    }

    /// A client configured from `PERMID_*` environment variables with a
    /// TOML-file fallback (see [`config::load`]).
    ///
    /// # Errors
    ///
    /// Returns [`PermIdError::Config`] for unusable configuration.
    pub fn from_env() -> Result<Self> {
        Self::with_config(config::load()?)
    }

    /// Create a builder for fluent configuration.
    pub fn builder() -> PermIdClientBuilder {
        PermIdClientBuilder::default()
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        self.service.config()
    }

    /// Look up a single entity by identifier.
    pub async fn lookup(&self, id: &str, options: LookupOptions) -> Result<LookupOutput> {
        self.service.lookup(id, options).await
    }

    /// Search entities by free-text query.
    pub async fn search(&self, query: SearchQuery) -> Result<SearchOutput> {
        self.service.search(query).await
    }

    /// Match records against canonical entities, one request.
    pub async fn match_records(
        &self,
        input: impl Into<MatchInput>,
        options: &MatchOptions,
    ) -> Result<MatchOutput> {
        self.service.match_records(input, options).await
    }

    /// Match records from a delimited file, sent as a multipart upload.
    pub async fn match_file(
        &self,
        path: impl AsRef<Path>,
        options: &MatchOptions,
    ) -> Result<MatchOutput> {
        self.service.match_file(path, options).await
    }

    /// Submit text for semantic tagging; the result is always raw text.
    pub async fn tag(&self, text: &str, options: &TagOptions) -> Result<String> {
        self.service.tag(text, options).await
    }

    /// Usage report derived from quota response headers.
    pub fn usage(&self) -> Table {
        self.service.usage()
    }
}

/// Builder for [`PermIdClient`].
#[derive(Debug, Default)]
pub struct PermIdClientBuilder {
    config: ClientConfigBuilder,
}

impl PermIdClientBuilder {
    /// Set the credential token. An empty token means unauthenticated.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config = self.config.access_token(token);
        self
    }

    pub fn lookup_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.lookup_url(url);
        self
    }

    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.search_url(url);
        self
    }

    pub fn match_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.match_url(url);
        self
    }

    pub fn match_file_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.match_file_url(url);
        self
    }

    pub fn tag_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.tag_url(url);
        self
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config = self.config.timeout_seconds(seconds);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`PermIdError::Config`] for unusable configuration or an
    /// HTTP stack that cannot be built.
    pub fn build(self) -> Result<PermIdClient> {
        PermIdClient::with_config(self.config.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_a_client_with_the_given_config() {
        let client = PermIdClient::builder()
            .access_token("token")
            .search_url("https://staging.example.test/search")
            .timeout_seconds(5)
            .build()
            .unwrap();

        assert_eq!(client.config().access_token.as_deref(), Some("token"));
        assert_eq!(client.config().search_url, "https://staging.example.test/search");
        assert_eq!(client.config().timeout_seconds, 5);
    }

    #[test]
    fn default_client_is_unauthenticated() {
        let client = PermIdClient::new().unwrap();
        assert!(client.config().access_token.is_none());
    }
}
