//! Google Sheets v4 API module
//!
//! Serde models of the Sheets resources, OAuth2 authentication, the reqwest
//! transport, and the read/update operations built on top of them.

pub mod auth;
pub mod client;
pub mod config;
pub mod models;
pub mod operations;

#[cfg(test)]
mod test_server;

pub use auth::{
    Authenticator, CodePrompt, OAuthConfig, StaticToken, TerminalPrompt, Token, TokenProvider,
};
pub use client::{SheetsApi, SheetsClient, new_sheets_client, new_sheets_client_with_config};
pub use config::{ClientConfig, ClientConfigBuilder, RetryConfig};
pub use models::{
    BatchUpdateSpreadsheetRequest, BatchUpdateSpreadsheetResponse, BooleanCondition, Border,
    BorderStyle, Borders, CellData, CellFormat, Color, ConditionType, DataValidationRule,
    ExtendedValue, GridData, GridRange, HorizontalAlign, NumberFormat, NumberFormatType, Request,
    RowData, Sheet, Spreadsheet, TextFormat, UpdateCellsRequest, VerticalAlign, WrapStrategy,
};
pub use operations::{UpdateTarget, get_sheet_data, update_request, update_sheet_data};
