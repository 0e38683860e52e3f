//! Invoice demo: writes styled sample data to a sheet

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use serde::Deserialize;

use rwsheets::api::models::{HorizontalAlign, RowData, VerticalAlign};
use rwsheets::api::{UpdateTarget, update_sheet_data};
use rwsheets::config::Config;
use rwsheets::sheet::{BorderConf, Styler};

use crate::cli::connect;

/// Layout of the `date` field in the sample data
const SAMPLE_DATE_LAYOUT: &str = "YYYY-MM-DD";

#[derive(Debug, Args)]
pub struct InvoiceArgs {
    /// Sample data JSON file (overrides SAMPLE_DATA)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Spreadsheet id (overrides SSID)
    #[arg(long)]
    pub ssid: Option<String>,

    /// Sheet gid (overrides GID)
    #[arg(long)]
    pub gid: Option<i64>,

    /// Build the rows and print them as JSON without writing
    #[arg(long)]
    pub dry: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleData {
    pub headers: Vec<String>,
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Invoice {
    pub customer: String,
    pub invoice: String,
    pub amount: f64,
    pub date: String,
    pub paid: bool,
}

pub async fn handle_invoices_command(config: &Config, args: InvoiceArgs) -> Result<()> {
    let data_path = args
        .data
        .or_else(|| config.sample_data.clone())
        .context("No sample data file given. Set SAMPLE_DATA or pass --data")?;

    let contents = fs::read_to_string(&data_path)
        .with_context(|| format!("Failed to read sample data from file: {}", data_path.display()))?;
    let data: SampleData = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid sample data in {}", data_path.display()))?;

    let rows = invoice_rows(&data)?;

    if args.dry {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let ssid = args
        .ssid
        .or_else(|| config.spreadsheet_id.clone())
        .context("No spreadsheet id given. Set SSID or pass --ssid")?;
    let gid = args
        .gid
        .or(config.sheet_id)
        .context("No sheet gid given. Set GID or pass --gid")?;

    let client = connect(config).await?;
    update_sheet_data(&client, &ssid, invoice_target(gid), rows)
        .await
        .context("Failed to update sheet data")?;

    println!("{}", "Successfully updated sheet data!".green().bold());
    Ok(())
}

/// Five columns B..F starting at row 2
pub fn invoice_target(gid: i64) -> UpdateTarget {
    UpdateTarget::new(gid, 1, 1, 6)
}

/// Header row followed by one row per invoice
pub fn invoice_rows(data: &SampleData) -> Result<Vec<RowData>> {
    let header = Styler::new()
        .font_bold(true)
        .font_family("Verdana")
        .font_size(12)
        .horizontal_alignment(HorizontalAlign::Center)
        .vertical_alignment(VerticalAlign::Middle);
    let mut rows = header.header_row(&data.headers, &BorderConf::HEADER);

    let body = header.font_size(10).font_bold(false);
    let left = body.clone().horizontal_alignment(HorizontalAlign::Left);
    let center = body.clone().horizontal_alignment(HorizontalAlign::Center);
    let right = body.horizontal_alignment(HorizontalAlign::Right);
    let date = right.clone().date_pattern("M/d/yyyy");

    for (i, invoice) in data.invoices.iter().enumerate() {
        // The header's bottom border already closes the first row
        let borders = if i == 0 {
            BorderConf::OPEN_TOP
        } else {
            BorderConf::ALL_SOLID
        };

        let date_cell = date
            .date_cell(&invoice.date, SAMPLE_DATE_LAYOUT, &borders)
            .with_context(|| format!("Invalid date '{}' on invoice {}", invoice.date, invoice.invoice))?;

        rows.push(RowData::new(vec![
            left.text_cell(&invoice.customer, &borders),
            center.text_cell(&invoice.invoice, &borders),
            right.accounting_cell(invoice.amount, &borders),
            date_cell,
            center.checkbox_cell(invoice.paid, &borders),
        ]));
    }

    Ok(rows)
}
