//! Collaborator seams for the spreadsheet store and the form-copy executor.
//!
//! Every procedure in this crate is generic over these traits. The HTTP
//! bindings live in `citysync-clients`; tests substitute in-memory fakes.

use citysync_core::{CityName, FormUrl, SheetKey, SpreadsheetId};

use crate::error::RosterError;

/// An open worksheet with buffered cell writes.
///
/// Rows and columns are 1-indexed, matching the spreadsheet UI. Reads outside
/// the materialized range yield the empty string; short rows read the same as
/// blank cells.
pub trait Worksheet {
    /// Number of rows carrying data, header included.
    fn num_rows(&self) -> u32;

    /// Cell text at (row, col).
    fn cell(&self, row: u32, col: u32) -> &str;

    /// Stage a cell value. Nothing reaches the store until [`Worksheet::save`].
    fn set_cell(&mut self, row: u32, col: u32, value: &str);

    /// Flush staged cells to the store.
    fn save(&mut self) -> Result<(), RosterError>;
}

/// A session against the spreadsheet store.
pub trait SpreadsheetSession {
    type Sheet: Worksheet;

    /// Open the worksheet at `index` (0-based) within the spreadsheet `id`.
    fn open_worksheet(&self, id: &SpreadsheetId, index: usize)
        -> Result<Self::Sheet, RosterError>;

    /// Create a new spreadsheet document and return its key.
    fn create_spreadsheet(&self, title: &str) -> Result<SheetKey, RosterError>;
}

/// Executor that copies the to-do form template for one city.
pub trait FormCopier {
    /// Copy the template form for `city`, wiring its submissions to the sheet
    /// behind `responses_key`. Returns the copied form's URL.
    fn copy_form(&self, city: &CityName, responses_key: &SheetKey)
        -> Result<FormUrl, RosterError>;
}
