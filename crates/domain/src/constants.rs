//! Wire-level constants for the PermID endpoints
//!
//! Centralized location for endpoint defaults and the header/parameter
//! names used on the wire.

// Default endpoint URLs
pub const DEFAULT_LOOKUP_URL: &str = "https://permid.org/";
pub const DEFAULT_SEARCH_URL: &str = "https://api-eit.refinitiv.com/permid/search";
pub const DEFAULT_MATCH_URL: &str = "https://api-eit.refinitiv.com/permid/match";
pub const DEFAULT_MATCH_FILE_URL: &str = "https://api-eit.refinitiv.com/permid/match/file";
pub const DEFAULT_TAG_URL: &str = "https://api-eit.refinitiv.com/permid/calais";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Request headers and query parameters
pub const HEADER_ACCESS_TOKEN: &str = "x-ag-access-token";
pub const PARAM_ACCESS_TOKEN: &str = "access-token";
pub const HEADER_MATCHES_PER_RECORD: &str = "x-openmatch-numberOfMatchesPerRecord";
pub const HEADER_MATCH_DATA_TYPE: &str = "x-openmatch-dataType";
pub const HEADER_TAG_LANGUAGE: &str = "x-calais-language";
pub const HEADER_TAG_OUTPUT_FORMAT: &str = "outputFormat";

// Response headers carrying quota telemetry
pub const HEADER_QUOTA_DAILY: &str = "x-permid-quota-daily";
pub const HEADER_QUOTA_USED: &str = "x-permid-quota-used";

/// HTTP-date format used for usage timestamps when the `Date` header is absent
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Characters of a response body kept in diagnostics for failed requests
pub const BODY_EXCERPT_CHARS: usize = 200;

/// Multipart field name for file uploads
pub const UPLOAD_FIELD_NAME: &str = "file";
