//! acctctl - Explore and manage accounting service resources
//!
//! A CLI and library for a remote accounting REST API.
//!
//! # Features
//!
//! - Generic read/create/replace/delete against any endpoint path
//! - Sequential, bounded pagination with deterministic ordering
//! - AND-combined filter queries (`status="Open"&&totalAmount>500`)
//! - A closed error taxonomy for service and transport failures
//! - Table, JSON and compact output over arbitrarily nested records
//!
//! # Example
//!
//! ```bash
//! # List all invoices (up to 10 pages)
//! acctctl list invoices
//!
//! # Filter and pick columns
//! acctctl list invoices --query status=Open --query 'totalAmount>500' \
//!     --columns id:ID,customer.name:Customer,totalAmount:Total:amount
//!
//! # Output as JSON
//! acctctl get invoices/inv-42 -o json --pretty
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod record;
pub mod ui;

pub use api::{
    build_query, classify, ApiClient, AuthProvider, BaseUrlResolver, FilterCriterion, FilterOp,
    Literal, Outcome, Page, StaticHeaders, TokenResolver,
};
pub use cli::{Cli, Command, OutputFormat};
pub use config::ClientConfig;
pub use error::{AcctError, ClientError, ClientResult, ErrorDetail, ErrorKind, Result};
pub use output::{render, ColumnSpec, RenderInput, RenderOptions};
pub use record::resolve_path;
