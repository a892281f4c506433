//! Outcome classification for HTTP exchanges
//!
//! Wraps the transport port and applies a uniform failure policy:
//! transport errors pass through, success statuses hiding error pages
//! become `NotFound`, other non-success statuses become `Application`
//! errors carrying the reason phrase and a body excerpt. Successful
//! exchanges record a quota sample before the body is handed back.

use std::sync::Arc;

use permid_domain::constants::BODY_EXCERPT_CHARS;
use permid_domain::{PermIdError, Result};
use tracing::{debug, error};

use crate::ports::{HttpMethod, HttpTransport, RawResponse, RequestSpec};
use crate::usage::UsageLedger;

/// Transport wrapper applying classification and quota accounting.
pub struct RequestGateway {
    transport: Arc<dyn HttpTransport>,
    ledger: Arc<UsageLedger>,
}

impl RequestGateway {
    /// Create a gateway over the given transport and ledger.
    pub fn new(transport: Arc<dyn HttpTransport>, ledger: Arc<UsageLedger>) -> Self {
        Self { transport, ledger }
    }

    /// Execute a request and return the response body on success.
    ///
    /// Every failure is logged before it is returned; quota samples are
    /// recorded exactly once per successful exchange and never for
    /// failed ones.
    pub async fn send(&self, spec: RequestSpec) -> Result<String> {
        let method = spec.method;
        let url = spec.url.clone();
        debug!(?method, %url, "sending request");

        let response = match self.transport.execute(spec).await {
            Ok(response) => response,
            Err(err) => {
                debug!(%url, error = %err, "transport failure");
                return Err(err);
            }
        };
        debug!(%url, status = response.status, "received response");

        if response.is_success() && is_error_page(&response, method) {
            error!(
                %url,
                status = response.status,
                body = %excerpt(&response.body),
                "endpoint answered with an error page"
            );
            return Err(PermIdError::NotFound(
                "the endpoint answered with an error page instead of data".to_string(),
            ));
        }

        if !response.is_success() {
            error!(
                %url,
                status = response.status,
                reason = %response.reason,
                body = %excerpt(&response.body),
                "request failed"
            );
            return Err(PermIdError::Application {
                reason: response.reason.clone(),
                body: excerpt(&response.body),
            });
        }

        self.ledger.record(&response);
        Ok(response.body)
    }
}

/// A success status that hides an error page: an HTML content type, or a
/// missing content type on a GET that asked for structured data.
fn is_error_page(response: &RawResponse, method: HttpMethod) -> bool {
    match response.header("content-type") {
        Some(value) => value.starts_with("text/html"),
        None => method == HttpMethod::Get,
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
