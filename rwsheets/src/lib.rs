//! Read and update Google Sheets data
//!
//! - [`api`]: authenticated client, `get_sheet_data` / `update_sheet_data`
//! - [`sheet`]: cell values, formats, borders, the [`Styler`](sheet::Styler),
//!   serial dates and row splicing
//! - [`config`]: layered configuration for the `rwsheets` binary

pub mod api;
pub mod config;
pub mod error;
pub mod sheet;

pub use api::{
    SheetsApi, SheetsClient, UpdateTarget, get_sheet_data, new_sheets_client, update_sheet_data,
};
pub use error::{Result, SheetsError};
pub use sheet::{BorderConf, Styler, remove_row, serial_date};
