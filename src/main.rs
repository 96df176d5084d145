//! acctctl - Main entry point

use std::process::ExitCode;

use clap::Parser;
use log::info;

use acctctl::{commands, AcctError, Cli, ErrorDetail, ErrorKind};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting acctctl v{}", env!("CARGO_PKG_VERSION"));

    match commands::run(&cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = hint(&e) {
                eprintln!("  {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Extra line pointing the user at the next step
fn hint(err: &AcctError) -> Option<String> {
    let AcctError::Client(client_err) = err else {
        return None;
    };
    match (&client_err.kind, &client_err.detail) {
        (ErrorKind::RateLimited, Some(ErrorDetail::RetryAfter(wait))) => {
            match client_err.retry_after_secs() {
                Some(secs) => Some(format!("Retry after {} seconds.", secs)),
                None => Some(format!("Retry after {}.", wait)),
            }
        }
        (ErrorKind::RateLimited, _) => Some("Wait a moment before retrying.".to_string()),
        (ErrorKind::Unauthorized, _) => {
            Some("Check the token passed with --token or ACCTCTL_TOKEN.".to_string())
        }
        (ErrorKind::BadRequest, Some(ErrorDetail::Validation(detail))) => {
            Some(format!("Details: {}", detail))
        }
        (ErrorKind::NetworkError, Some(ErrorDetail::Transport(msg))) => Some(msg.clone()),
        (ErrorKind::SerializationError, Some(ErrorDetail::Body(body))) => {
            Some(format!("Body: {}", body))
        }
        (ErrorKind::Unknown, Some(ErrorDetail::Status { body, .. })) if !body.is_empty() => {
            Some(format!("Body: {}", body))
        }
        _ => None,
    }
}
