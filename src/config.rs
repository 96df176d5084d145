use std::collections::BTreeMap;
use std::time::Duration;

/// Configuration constants for the accounting API
pub mod api {
    /// Upper bound for every single request
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Connect timeout (part of the request timeout budget)
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Default page size for list requests
    pub const DEFAULT_PAGE_SIZE: u32 = 50;

    /// Default cap on pages fetched by one traversal
    pub const DEFAULT_MAX_PAGES: u32 = 10;

    /// Query parameter carrying the page counter
    pub const PAGE_PARAM: &str = "page";

    /// Query parameter carrying the page size
    pub const PAGE_SIZE_PARAM: &str = "pageSize";

    /// Query parameter carrying the filter expression
    pub const QUERY_PARAM: &str = "query";

    /// Query parameter carrying the sort field
    pub const ORDER_BY_PARAM: &str = "orderBy";

    /// Envelope keys holding the records of a page (checked in order)
    pub const RECORD_KEYS: &[&str] = &["data", "items", "results"];

    /// Envelope keys holding the continuation marker (checked in order)
    pub const CONTINUATION_KEYS: &[&str] = &["next", "nextPage", "hasMore"];

    /// Maximum number of body characters kept in error detail
    pub const BODY_EXCERPT_CHARS: usize = 200;
}

/// Configuration constants for credentials
pub mod auth {
    /// Environment variable holding the API token
    pub const TOKEN_ENV_VAR: &str = "ACCTCTL_TOKEN";

    /// Environment variable holding the service base URL
    pub const BASE_URL_ENV_VAR: &str = "ACCTCTL_BASE_URL";
}

/// Display constants for rendered output
pub mod output {
    /// Shown for missing or null cells
    pub const PLACEHOLDER: &str = "-";

    pub const TRUE_GLYPH: &str = "✓";

    pub const FALSE_GLYPH: &str = "✗";

    /// Strings longer than this are truncated in table cells
    pub const MAX_CELL_CHARS: usize = 40;

    pub const ELLIPSIS: &str = "…";

    /// Printed instead of an empty table or empty compact listing
    pub const NO_RESULTS: &str = "No results found.";
}

/// Default values for CLI
pub mod defaults {
    /// Default service base URL
    pub const BASE_URL: &str = "https://api.accounting.example.com/v1";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}

/// Everything the resource client needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root URL, without trailing slash
    pub base_url: String,
    /// Authentication headers attached to every request
    pub auth_headers: BTreeMap<String, String>,
    /// Upper bound for a single request
    pub timeout: Duration,
    /// Page size used when the caller does not pass one
    pub page_size: u32,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, auth_headers: BTreeMap<String, String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_headers,
            timeout: Duration::from_secs(api::REQUEST_TIMEOUT_SECS),
            page_size: api::DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}
