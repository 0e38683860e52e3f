//! Read command handler

use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use rwsheets::api::models::{CellData, RowData};
use rwsheets::api::get_sheet_data;
use rwsheets::config::Config;
use rwsheets::sheet::{display_value, remove_row};

use crate::cli::connect;

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Range in A1 notation, e.g. `Invoices!B2:F20`
    pub range: String,

    /// Spreadsheet id (overrides SSID)
    #[arg(long)]
    pub ssid: Option<String>,

    /// Zero-based row to leave out of the output, e.g. 0 for a header row
    #[arg(long)]
    pub drop_row: Option<usize>,

    /// Print the raw row data as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_read_command(config: &Config, args: ReadArgs) -> Result<()> {
    let ssid = args
        .ssid
        .or_else(|| config.spreadsheet_id.clone())
        .context("No spreadsheet id given. Set SSID or pass --ssid")?;

    let client = connect(config).await?;
    let mut rows = get_sheet_data(&client, &ssid, &args.range)
        .await
        .with_context(|| format!("Failed to read {} from {}", args.range, ssid))?;

    if let Some(index) = args.drop_row {
        rows = remove_row(rows, index);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for line in render_rows(&rows) {
        println!("{}", line);
    }
    println!();
    println!("{} rows", rows.len().to_string().bright_green());
    Ok(())
}

/// Tab-separated text of each row
pub fn render_rows(rows: &[RowData]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            row.values
                .iter()
                .map(cell_text)
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect()
}

fn cell_text(cell: &CellData) -> String {
    if let Some(text) = &cell.formatted_value {
        return text.clone();
    }
    cell.effective_value
        .as_ref()
        .or(cell.user_entered_value.as_ref())
        .map(display_value)
        .unwrap_or_default()
}
