//! Serial date command handler

use anyhow::{Context, Result};
use clap::Args;

use rwsheets::sheet::serial_date;

#[derive(Debug, Args)]
pub struct SerialDateArgs {
    /// Date to convert
    pub value: String,

    /// Layout of the date, tokens (`M/D/YYYY`) or strftime (`%m/%d/%Y`)
    #[arg(short, long, default_value = "M/D/YYYY")]
    pub layout: String,
}

pub fn handle_serial_date_command(args: SerialDateArgs) -> Result<()> {
    let serial = serial_date(&args.value, &args.layout)
        .with_context(|| format!("'{}' does not match layout '{}'", args.value, args.layout))?;
    println!("{}", serial);
    Ok(())
}
