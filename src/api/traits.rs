//! Seams for the collaborators the client consumes

use std::collections::BTreeMap;

use crate::error::Result;

/// Supplies the authentication headers attached to every request.
///
/// Called once when the client configuration is assembled; the returned
/// headers are never modified afterwards.
pub trait AuthProvider {
    fn auth_headers(&self) -> Result<BTreeMap<String, String>>;
}

/// Fixed header set, for pre-built credentials or tests
#[derive(Debug, Clone, Default)]
pub struct StaticHeaders(pub BTreeMap<String, String>);

impl AuthProvider for StaticHeaders {
    fn auth_headers(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.0.clone())
    }
}
