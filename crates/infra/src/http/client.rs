//! reqwest-backed transport
//!
//! Performs exactly one HTTP exchange per call: GET with query
//! parameters, POST with an inline text body, or POST with a multipart
//! file upload. No retries; the configured timeout applies to every
//! request. Connection and timeout failures map to transport errors,
//! everything that reached the HTTP layer is handed back raw.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use permid_core::ports::{HttpMethod, HttpTransport, Payload, RawResponse, RequestSpec};
use permid_domain::constants::{DEFAULT_TIMEOUT_SECS, UPLOAD_FIELD_NAME};
use permid_domain::{PermIdError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client as ReqwestClient;
use tracing::debug;

/// Transport adapter over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Start building a transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    async fn file_part(path: &Path) -> Result<Part> {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            PermIdError::Transport(format!("failed to read upload {}: {err}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Part::bytes(bytes).file_name(file_name))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, spec: RequestSpec) -> Result<RawResponse> {
        let mut request = match spec.method {
            HttpMethod::Get => self.client.get(&spec.url),
            HttpMethod::Post => self.client.post(&spec.url),
        };

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        for (name, value) in &spec.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request = match spec.payload {
            Payload::Empty => request,
            Payload::Text(body) => request.body(body),
            Payload::File(path) => {
                let part = Self::file_part(&path).await?;
                request.multipart(Form::new().part(UPLOAD_FIELD_NAME, part))
            }
        };

        debug!(url = %spec.url, method = ?spec.method, "executing request");
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(text) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), text.to_string());
            }
        }
        let body = response.text().await.map_err(map_transport_error)?;

        Ok(RawResponse { status: status.as_u16(), reason, headers, body })
    }
}

fn map_transport_error(err: reqwest::Error) -> PermIdError {
    if err.is_timeout() {
        PermIdError::Transport(format!("request timed out: {err}"))
    } else {
        PermIdError::Transport(err.to_string())
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS), user_agent: None }
    }
}

impl ReqwestTransportBuilder {
    /// Timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns [`PermIdError::Config`] when the underlying client cannot
    /// be constructed.
    pub fn build(self) -> Result<ReqwestTransport> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        let client = builder
            .build()
            .map_err(|err| PermIdError::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(ReqwestTransport { client })
    }
}
