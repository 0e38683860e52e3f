//! Row sequence helpers

use log::debug;

/// Remove the row at `index`, keeping the order of the remaining rows.
///
/// An index past the end leaves the rows untouched; removing out of range is not an error.
pub fn remove_row<T>(mut rows: Vec<T>, index: usize) -> Vec<T> {
    if index >= rows.len() {
        debug!("remove_row: index {} out of range for {} rows", index, rows.len());
        return rows;
    }

    rows.remove(index);
    rows
}
