//! Token and base URL resolution from CLI arguments and environment

use log::debug;
use std::collections::BTreeMap;

use crate::api::traits::AuthProvider;
use crate::config::{auth, defaults};
use crate::error::{AcctError, Result};

/// Bearer token resolution with fallback logic
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    cli_token: Option<String>,
}

impl TokenResolver {
    pub fn new(cli_token: Option<&str>) -> Self {
        Self {
            cli_token: cli_token.map(str::to_string),
        }
    }

    /// Resolve the token:
    /// 1. CLI argument (if provided)
    /// 2. `ACCTCTL_TOKEN` environment variable
    pub fn resolve(&self) -> Result<String> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    fn resolve_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<String> {
        if let Some(token) = self.cli_token.as_deref().filter(|t| !t.is_empty()) {
            debug!("Using token from CLI argument");
            return Ok(token.to_string());
        }

        if let Some(token) = env(auth::TOKEN_ENV_VAR).filter(|t| !t.is_empty()) {
            debug!("Using token from {} environment variable", auth::TOKEN_ENV_VAR);
            return Ok(token);
        }

        Err(AcctError::TokenNotFound(format!(
            "No API token found. Pass --token or set the {} environment variable.",
            auth::TOKEN_ENV_VAR
        )))
    }
}

impl AuthProvider for TokenResolver {
    fn auth_headers(&self) -> Result<BTreeMap<String, String>> {
        let token = self.resolve()?;
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        Ok(headers)
    }
}

/// Base URL resolution with fallback logic
pub struct BaseUrlResolver;

impl BaseUrlResolver {
    /// Resolve the base URL:
    /// 1. CLI argument (if provided)
    /// 2. `ACCTCTL_BASE_URL` environment variable
    /// 3. Built-in default
    pub fn resolve(cli_base_url: Option<&str>) -> String {
        Self::resolve_with(cli_base_url, |name| std::env::var(name).ok())
    }

    fn resolve_with(cli_base_url: Option<&str>, env: impl Fn(&str) -> Option<String>) -> String {
        if let Some(url) = cli_base_url.filter(|u| !u.is_empty()) {
            debug!("Using base URL from CLI argument: {}", url);
            return url.to_string();
        }

        if let Some(url) = env(auth::BASE_URL_ENV_VAR).filter(|u| !u.is_empty()) {
            debug!(
                "Using base URL from {} environment variable: {}",
                auth::BASE_URL_ENV_VAR,
                url
            );
            return url;
        }

        debug!("Using default base URL: {}", defaults::BASE_URL);
        defaults::BASE_URL.to_string()
    }
}
