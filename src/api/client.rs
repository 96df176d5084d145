//! HTTP resource client for the accounting API

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::{Client, Method, Url};
use std::time::Duration;

use crate::api::classify::{classify, classify_invalid_endpoint, classify_unparseable, Outcome};
use crate::config::{api, ClientConfig};
use crate::error::{AcctError, ClientResult, Result};

/// Query parameters as ordered key/value pairs
pub type Params = [(String, String)];

/// A single operation against the API
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn with_params(mut self, params: &Params) -> Self {
        self.params = params.to_vec();
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Accounting API client
///
/// Holds the base address and the authentication headers, both fixed at
/// construction. Every call is a single attempt bounded by the configured
/// timeout.
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    headers: HeaderMap,
    timeout: Duration,
    page_size: u32,
}

impl ApiClient {
    /// Create a client from resolved configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(config.timeout.min(Duration::from_secs(api::CONNECT_TIMEOUT_SECS)))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AcctError::Config(format!("could not build HTTP client: {}", e)))?;

        // Url::join drops the last path segment unless it ends with '/'
        let base_url = Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))
            .map_err(|e| {
                AcctError::Config(format!("invalid base URL '{}': {}", config.base_url, e))
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.auth_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AcctError::Config(format!("invalid header name '{}': {}", name, e)))?;
            let mut value = HeaderValue::from_str(value)
                .map_err(|e| AcctError::Config(format!("invalid value for header '{}': {}", name, e)))?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        Ok(Self {
            client,
            base_url,
            headers,
            timeout: config.timeout,
            page_size: config.page_size,
        })
    }

    /// Service root this client talks to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Page size to use when the caller does not pick one
    pub fn default_page_size(&self) -> u32 {
        self.page_size
    }

    /// GET a resource or collection
    pub async fn read(&self, endpoint: &str, params: &Params) -> ClientResult<serde_json::Value> {
        self.execute(&ApiRequest::new(Method::GET, endpoint).with_params(params))
            .await
    }

    /// POST a new resource
    pub async fn create(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> ClientResult<serde_json::Value> {
        self.execute(&ApiRequest::new(Method::POST, endpoint).with_body(body.clone()))
            .await
    }

    /// PUT a full replacement of a resource
    pub async fn replace(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> ClientResult<serde_json::Value> {
        self.execute(&ApiRequest::new(Method::PUT, endpoint).with_body(body.clone()))
            .await
    }

    /// DELETE a resource; an empty response body yields `null`
    pub async fn delete(&self, endpoint: &str) -> ClientResult<serde_json::Value> {
        self.execute(&ApiRequest::new(Method::DELETE, endpoint))
            .await
    }

    /// Perform one request and parse its body
    pub async fn execute(&self, request: &ApiRequest) -> ClientResult<serde_json::Value> {
        let url = self.url(&request.endpoint, &request.params)?;
        debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .headers(self.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        debug!("{} {} -> {} ({} bytes)", request.method, url, status, body.len());

        if !(200..300).contains(&status) {
            return Err(classify(Outcome::Response {
                status,
                retry_after: retry_after.as_deref(),
                body: &String::from_utf8_lossy(&body),
            }));
        }

        parse_body(&body)
    }

    /// Join an endpoint path and query parameters onto the base URL
    fn url(&self, endpoint: &str, params: &Params) -> ClientResult<Url> {
        let mut url = self
            .base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| classify_invalid_endpoint(endpoint, &e.to_string()))?;
        if url.origin() != self.base_url.origin() {
            return Err(classify_invalid_endpoint(
                endpoint,
                "must be a path relative to the base URL",
            ));
        }
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> crate::error::ClientError {
        let message = if err.is_timeout() {
            format!("request timed out after {:?}: {}", self.timeout, err)
        } else {
            err.to_string()
        };
        classify(Outcome::Transport { message: &message })
    }
}

/// Parse a success body from raw bytes; empty bodies become `null`.
///
/// Invalid UTF-8 is a parse failure, never silently replaced.
fn parse_body(body: &[u8]) -> ClientResult<serde_json::Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| classify_unparseable(&String::from_utf8_lossy(body), &e.to_string()))
}

#[cfg(test)]
impl ApiClient {
    /// Client pointed at a mock server with a fixed bearer token
    pub fn test_client(base_url: &str) -> Self {
        let mut headers = std::collections::BTreeMap::new();
        headers.insert("Authorization".to_string(), "Bearer test-token".to_string());
        Self::new(&ClientConfig::new(base_url, headers)).expect("valid test config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::test_client("https://example.com/api/v1/");
        assert_eq!(client.base_url(), "https://example.com/api/v1");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = ApiClient::test_client("https://example.com/api/v1");
        let url = client.url("/invoices", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1/invoices");
    }

    #[test]
    fn test_url_appends_params_in_order() {
        let client = ApiClient::test_client("https://example.com");
        let params = vec![
            ("query".to_string(), "status=\"Paid\"".to_string()),
            ("page".to_string(), "1".to_string()),
        ];
        let url = client.url("invoices", &params).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs, params);
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = ApiClient::new(&ClientConfig::new("not a url", BTreeMap::new()));
        assert!(matches!(result, Err(AcctError::Config(_))));
    }

    #[test]
    fn test_invalid_header_is_config_error() {
        let mut headers = BTreeMap::new();
        headers.insert("Bad Header".to_string(), "x".to_string());
        let result = ApiClient::new(&ClientConfig::new("https://example.com", headers));
        assert!(matches!(result, Err(AcctError::Config(_))));
    }

    #[test]
    fn test_parse_empty_body_is_null() {
        assert_eq!(parse_body(b"").unwrap(), serde_json::Value::Null);
        assert_eq!(parse_body(b"  \n").unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn test_parse_invalid_utf8_is_serialization_error() {
        let err = parse_body(b"{\"name\":\"Soci\xE9t\"}").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::SerializationError);
    }

    #[test]
    fn test_url_rejects_absolute_endpoint() {
        let client = ApiClient::test_client("https://example.com/api/v1");
        for endpoint in [
            "https://other.example.com/grab",
            "http://example.com/api/v1/invoices",
            "mailto:someone@example.com",
        ] {
            let err = client.url(endpoint, &[]).unwrap_err();
            assert_eq!(err.kind, crate::error::ErrorKind::BadRequest, "{}", endpoint);
        }
    }

    #[test]
    fn test_url_allows_nested_paths() {
        let client = ApiClient::test_client("https://example.com/api/v1");
        let url = client.url("customers/7/contacts", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/v1/customers/7/contacts");
    }

    #[test]
    fn test_default_page_size_from_config() {
        let config = ClientConfig::new("https://example.com", BTreeMap::new()).with_page_size(7);
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.default_page_size(), 7);
    }
}
