//! Quota samples extracted from response headers

use serde::{Deserialize, Serialize};

/// One recorded observation of the API call allowance.
///
/// Derived from the `x-permid-quota-*` response headers of a successful
/// call; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSample {
    /// HTTP-date of the observation: the response `Date` header when
    /// present, otherwise the client's current UTC time.
    pub time: String,
    /// Daily quota reported by the service, when present.
    pub quota_daily: Option<String>,
    /// Used-call count reported by the service, when present.
    pub quota_used: Option<String>,
}
