//! Port interfaces between the operation façade and the HTTP stack
//!
//! These types define the boundary between core service logic and
//! transport implementations.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use permid_domain::Result;

/// HTTP method of a request spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Payload of a POST request. A file payload is sent as multipart form
/// data and is mutually exclusive with an inline body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    #[default]
    Empty,
    /// Inline text body.
    Text(String),
    /// File uploaded as multipart form data under the `file` field.
    File(PathBuf),
}

/// One outbound request: constructed per call, discarded after use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub payload: Payload,
}

impl RequestSpec {
    /// A GET request for the given URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            payload: Payload::Empty,
        }
    }

    /// A POST request for the given URL.
    pub fn post(url: impl Into<String>) -> Self {
        Self { method: HttpMethod::Post, ..Self::get(url) }
    }

    /// Append a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set the payload.
    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Value of the first header with the given name, if any.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Value of the first query parameter with the given name, if any.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(param, _)| param == name).map(|(_, value)| value.as_str())
    }
}

/// Raw result of one HTTP exchange that reached the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Status reason phrase (e.g. "Internal Server Error").
    pub reason: String,
    /// Response headers with lower-cased names.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RawResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Capability to perform one HTTP exchange.
///
/// Implementations surface connection and timeout failures as
/// [`permid_domain::PermIdError::Transport`]; any response that reached
/// the HTTP layer is returned as a [`RawResponse`] regardless of status.
/// No retries at this layer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute the request and return the raw exchange result.
    async fn execute(&self, spec: RequestSpec) -> Result<RawResponse>;
}
