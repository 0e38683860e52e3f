//! Command-line interface

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rwsheets::api::SheetsClient;
use rwsheets::api::client::new_sheets_client_with_config;
use rwsheets::config::Config;

pub mod commands;

#[derive(Debug, Parser)]
#[command(name = "rwsheets", version, about = "Read and update Google Sheets data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// OAuth client-secret file (overrides CREDENTIALS)
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Cached token file (overrides TOKEN)
    #[arg(long, global = true)]
    pub token: Option<PathBuf>,

    /// OAuth scope, may be repeated (overrides RWSHEETS_SCOPES)
    #[arg(long = "scope", global = true)]
    pub scopes: Vec<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authorize access and cache the token
    Auth,
    /// Print the rows of a range
    Read(commands::read::ReadArgs),
    /// Write the sample invoice data to a sheet
    UpdateInvoices(commands::invoices::InvoiceArgs),
    /// Convert a date to its Sheets serial number
    SerialDate(commands::serial_date::SerialDateArgs),
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(path) = cli.credentials {
        config.credentials = Some(path);
    }
    if let Some(path) = cli.token {
        config.token = Some(path);
    }
    if !cli.scopes.is_empty() {
        config.scopes = cli.scopes;
    }

    match cli.command {
        Commands::Auth => commands::auth::handle_auth_command(&config).await,
        Commands::Read(args) => commands::read::handle_read_command(&config, args).await,
        Commands::UpdateInvoices(args) => {
            commands::invoices::handle_invoices_command(&config, args).await
        }
        Commands::SerialDate(args) => commands::serial_date::handle_serial_date_command(args),
    }
}

/// Build an authenticated client from the resolved configuration
pub async fn connect(config: &Config) -> Result<SheetsClient> {
    let credentials = config
        .credentials
        .as_ref()
        .context("No credential file configured. Set CREDENTIALS or pass --credentials")?;
    let token = config
        .token
        .as_ref()
        .context("No token file configured. Set TOKEN or pass --token")?;

    let scopes = config.scopes();
    let scopes: Vec<&str> = scopes.iter().map(String::as_str).collect();

    new_sheets_client_with_config(credentials, token, &scopes, config.client_config())
        .await
        .context("Failed to create a new sheets service")
}
