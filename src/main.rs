//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `netsuite_client` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use netsuite_client::initialization::init_logger_with;
use netsuite_client::{
    Config, HttpMethod, LogFormat, LogLevel, MemorySession, NetSuiteClient, RequestSpec,
    RetryStrategy, TokenPair,
};

#[derive(Parser)]
#[command(name = "netsuite_client", version, about)]
struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Issue a single request against the REST API
    Request {
        /// Endpoint path below the account base URL (e.g. /services/rest/record/v1/salesOrder/42)
        endpoint: String,

        /// HTTP method
        #[arg(long, value_enum, default_value = "get")]
        method: HttpMethod,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,

        /// Retry strategy
        #[arg(long, value_enum, default_value = "standard")]
        strategy: RetryStrategy,
    },

    /// Run a SuiteQL query
    Suiteql {
        /// The query text
        query: String,

        /// Retry strategy
        #[arg(long, value_enum, default_value = "aggressive")]
        strategy: RetryStrategy,
    },

    /// Probe the current rate-limit state and print a health report
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = Config {
        log_level: cli.log_level,
        log_format: cli.log_format,
        ..Config::from_env().context("Failed to load configuration from environment")?
    };

    let session = Arc::new(MemorySession::new(TokenPair {
        access_token: std::env::var("NETSUITE_ACCESS_TOKEN").unwrap_or_default(),
        refresh_token: std::env::var("NETSUITE_REFRESH_TOKEN").unwrap_or_default(),
    }));

    let client =
        NetSuiteClient::new(&config, session).context("Failed to initialize HTTP client")?;

    match run_command(&client, cli.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("netsuite_client error: {e:#}");
            process::exit(1);
        }
    }
}

async fn run_command(client: &NetSuiteClient, command: Command) -> Result<()> {
    match command {
        Command::Request {
            endpoint,
            method,
            body,
            strategy,
        } => {
            let mut spec = RequestSpec::new(method, endpoint);
            if let Some(body) = body {
                let value = serde_json::from_str(&body).context("Request body is not valid JSON")?;
                spec = spec.with_body(value);
            }

            let result = client.single_request(&spec, strategy).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Suiteql { query, strategy } => {
            let result = client.suiteql_query(&query, strategy).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Status => {
            let status = client.check_rate_limit().await;
            let report = serde_json::json!({
                "status": status.tier.as_str(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "rateLimit": {
                    "limit": status.info.limit,
                    "remaining": status.info.remaining,
                    "resetTime": status.info.reset_epoch_seconds,
                    "resetIn": status.reset_in_seconds,
                    "retryAfter": status.info.retry_after_seconds,
                },
                "warning": status.warning,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
