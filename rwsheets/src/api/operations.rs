//! Read and update operations on sheet row data

use log::{debug, info};

use super::client::SheetsApi;
use super::models::{BatchUpdateSpreadsheetRequest, GridRange, Request, RowData, UpdateCellsRequest};
use crate::error::{Result, SheetsError};

/// Where an update lands on a sheet.
///
/// Start indices are zero-based; `end_column_index` is exclusive, so a write whose
/// last column is A has `end_column_index == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateTarget {
    /// gid of the sheet (tab)
    pub sheet_id: i64,
    pub start_row_index: i64,
    pub start_column_index: i64,
    pub end_column_index: i64,
}

impl UpdateTarget {
    pub fn new(sheet_id: i64, start_row_index: i64, start_column_index: i64, end_column_index: i64) -> Self {
        Self {
            sheet_id,
            start_row_index,
            start_column_index,
            end_column_index,
        }
    }

    /// Grid range covering `row_count` rows from the start row
    pub fn grid_range(&self, row_count: usize) -> GridRange {
        GridRange {
            sheet_id: self.sheet_id,
            start_row_index: Some(self.start_row_index),
            end_row_index: Some(self.start_row_index + row_count as i64),
            start_column_index: Some(self.start_column_index),
            end_column_index: Some(self.end_column_index),
        }
    }
}

/// Retrieve the row data of `read_range` (A1 notation, e.g. `Invoices!B2:F20`)
pub async fn get_sheet_data(
    api: &dyn SheetsApi,
    spreadsheet_id: &str,
    read_range: &str,
) -> Result<Vec<RowData>> {
    let ranges = vec![read_range.to_string()];
    let spreadsheet = api.get_spreadsheet(spreadsheet_id, &ranges, true).await?;

    let sheet = spreadsheet.sheets.into_iter().next().ok_or(SheetsError::NoData)?;
    let grid = sheet.data.into_iter().next().ok_or(SheetsError::NoData)?;

    debug!("Read {} rows from {}", grid.row_data.len(), read_range);
    Ok(grid.row_data)
}

/// Build the batch request that overwrites the target range with `rows`
pub fn update_request(target: UpdateTarget, rows: Vec<RowData>) -> BatchUpdateSpreadsheetRequest {
    let range = target.grid_range(rows.len());
    BatchUpdateSpreadsheetRequest {
        requests: vec![Request::UpdateCells(UpdateCellsRequest {
            rows,
            fields: "*".to_string(),
            range: Some(range),
        })],
        include_spreadsheet_in_response: false,
    }
}

/// Update the spreadsheet with new values, replacing every field of the target cells
pub async fn update_sheet_data(
    api: &dyn SheetsApi,
    spreadsheet_id: &str,
    target: UpdateTarget,
    rows: Vec<RowData>,
) -> Result<()> {
    let row_count = rows.len();
    let request = update_request(target, rows);
    api.batch_update(spreadsheet_id, &request).await?;

    info!(
        "Updated {} rows on sheet {} starting at row {}",
        row_count, target.sheet_id, target.start_row_index
    );
    Ok(())
}
