//! Accounting API client module
//!
//! Single-request operations, sequential pagination, filter queries and
//! failure classification.

pub mod classify;
mod client;
mod credentials;
pub mod pagination;
pub mod query;
pub mod traits;

pub use classify::{classify, Outcome};
pub use client::{ApiClient, ApiRequest, Params};
pub use credentials::{BaseUrlResolver, TokenResolver};
pub use pagination::Page;
pub use query::{build_query, query_params, FilterCriterion, FilterOp, Literal};
pub use traits::{AuthProvider, StaticHeaders};
