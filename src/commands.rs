//! Generic command handlers
//!
//! Each handler drives the API client for one subcommand and returns the
//! rendered text; printing and exit codes are left to `main`.

use log::{debug, info};

use crate::api::{ApiClient, AuthProvider, BaseUrlResolver, TokenResolver};
use crate::cli::{Cli, Command, DisplayArgs, ListArgs, WriteArgs};
use crate::config::ClientConfig;
use crate::error::{AcctError, Result};
use crate::output::render;
use crate::ui::{create_spinner, finish_spinner};

/// Resolve configuration, build the client and run the parsed command
pub async fn run(cli: &Cli) -> Result<String> {
    let base_url = BaseUrlResolver::resolve(cli.base_url.as_deref());
    let auth_headers = TokenResolver::new(cli.token.as_deref()).auth_headers()?;

    let mut config = ClientConfig::new(base_url, auth_headers);
    if let Command::List(ListArgs {
        page_size: Some(size),
        ..
    }) = &cli.command
    {
        config = config.with_page_size(*size);
    }

    let client = ApiClient::new(&config)?;
    debug!("Client ready for {}", client.base_url());
    execute(&client, &cli.command, cli.quiet).await
}

/// Run one command against an existing client
pub async fn execute(client: &ApiClient, command: &Command, quiet: bool) -> Result<String> {
    match command {
        Command::List(args) => run_list_command(client, args, quiet).await,
        Command::Get(args) => {
            let record = client.read(&args.endpoint, &[]).await?;
            render(&record, &args.display.render_options())
        }
        Command::Create(args) => {
            let body = parse_data(args)?;
            let created = client.create(&args.endpoint, &body).await?;
            render_written(&created, &args.display, "Created", &args.endpoint)
        }
        Command::Replace(args) => {
            let body = parse_data(args)?;
            let replaced = client.replace(&args.endpoint, &body).await?;
            render_written(&replaced, &args.display, "Replaced", &args.endpoint)
        }
        Command::Delete(args) => {
            client.delete(&args.endpoint).await?;
            info!("Deleted {}", args.endpoint);
            Ok(format!("Deleted {}", args.endpoint))
        }
    }
}

async fn run_list_command(client: &ApiClient, args: &ListArgs, quiet: bool) -> Result<String> {
    let params = args.base_params();
    let page_size = client.default_page_size();

    let spinner = create_spinner(&format!("Fetching {}...", args.endpoint), quiet);
    let result = match args.page {
        Some(page) => client
            .read_page(&args.endpoint, &params, page, page_size)
            .await
            .map(|p| p.records),
        None => {
            client
                .collect_all(&args.endpoint, &params, page_size, args.max_pages)
                .await
        }
    };
    finish_spinner(spinner);

    let records = result?;
    info!("Fetched {} records from {}", records.len(), args.endpoint);
    render(&records, &args.display.render_options())
}

fn parse_data(args: &WriteArgs) -> Result<serde_json::Value> {
    serde_json::from_str(&args.data)
        .map_err(|e| AcctError::InvalidArgument(format!("--data is not valid JSON: {}", e)))
}

/// Render the service's echo of a written resource, or a short notice when it sent none
fn render_written(
    value: &serde_json::Value,
    display: &DisplayArgs,
    verb: &str,
    endpoint: &str,
) -> Result<String> {
    if value.is_null() {
        return Ok(format!("{} {}", verb, endpoint));
    }
    render(value, &display.render_options())
}
