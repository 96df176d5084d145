//! CLI argument parsing

mod common;

use clap::{Args, Parser, Subcommand};

use crate::api::FilterCriterion;
use crate::config::{api, defaults};
use crate::output::{ColumnSpec, RenderOptions};

pub use common::OutputFormat;

/// Accounting service CLI
#[derive(Parser, Debug)]
#[command(name = "acctctl")]
#[command(version)]
#[command(about = "List and manage accounting service resources", long_about = None)]
pub struct Cli {
    /// Service base URL (overrides ACCTCTL_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API token (overrides ACCTCTL_TOKEN)
    #[arg(short = 't', long, global = true)]
    pub token: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL, global = true)]
    pub log_level: String,

    /// Suppress the progress spinner
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List records of a paged endpoint (all pages up to --max-pages, or one --page)
    List(ListArgs),
    /// Fetch a single resource
    Get(GetArgs),
    /// Create a resource from a JSON body
    Create(WriteArgs),
    /// Replace a resource with a JSON body
    Replace(WriteArgs),
    /// Delete a resource
    Delete(DeleteArgs),
}

/// Display flags shared by commands that print records
#[derive(Args, Debug, Clone, Default)]
pub struct DisplayArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Table columns as path[:Label[:amount|date]], comma separated
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<ColumnSpec>,

    /// Field paths for compact output, comma separated
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Title printed above table output
    #[arg(long)]
    pub title: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl DisplayArgs {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            columns: (!self.columns.is_empty()).then(|| self.columns.clone()),
            fields: (!self.fields.is_empty()).then(|| self.fields.clone()),
            title: self.title.clone(),
            pretty: self.pretty,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Endpoint path, e.g. invoices
    pub endpoint: String,

    /// Fetch only this page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Records per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Upper bound on pages fetched when listing everything
    #[arg(long, default_value_t = api::DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// Filter as field<op>value with op one of = ~ > < (repeatable, AND-combined)
    #[arg(long = "query")]
    pub query: Vec<FilterCriterion>,

    /// Sort field
    #[arg(long)]
    pub order_by: Option<String>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

impl ListArgs {
    /// Filter and sort parameters, without paging
    pub fn base_params(&self) -> Vec<(String, String)> {
        let mut params = crate::api::query_params(&self.query);
        if let Some(field) = &self.order_by {
            params.push((api::ORDER_BY_PARAM.to_string(), field.clone()));
        }
        params
    }
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Endpoint path, e.g. invoices/inv-42
    pub endpoint: String,

    #[command(flatten)]
    pub display: DisplayArgs,
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Endpoint path
    pub endpoint: String,

    /// JSON request body
    #[arg(short, long)]
    pub data: String,

    #[command(flatten)]
    pub display: DisplayArgs,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Endpoint path, e.g. customers/7
    pub endpoint: String,
}
