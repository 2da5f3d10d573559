//! Roster reading — the Cities worksheet as typed records.

use std::collections::BTreeMap;

use citysync_core::{CityName, CityRecord, SpreadsheetId};

use crate::error::RosterError;
use crate::session::{SpreadsheetSession, Worksheet};

// ---------------------------------------------------------------------------
// Worksheet layout
// ---------------------------------------------------------------------------

// Fixed offsets agreed with the spreadsheet's owners; never discovered
// dynamically.

/// Index of the Cities worksheet within the roster spreadsheet.
pub const CITIES_WORKSHEET_INDEX: usize = 0;
/// 1-indexed column holding the city name.
pub const CITY_COLUMN: u32 = 2;
/// 1-indexed column holding the to-do form URL.
pub const FORM_COLUMN: u32 = 8;
/// 1-indexed column holding the responses sheet reference.
pub const RESPONSES_COLUMN: u32 = 9;
/// First data row; row 1 is the header.
pub const FIRST_DATA_ROW: u32 = 2;

/// The roster: one record per city, keyed and ordered by city name.
///
/// A duplicate city name overwrites the earlier entry.
pub type Roster = BTreeMap<CityName, CityRecord>;

// ---------------------------------------------------------------------------
// read
// ---------------------------------------------------------------------------

/// Read every data row of the Cities worksheet into a [`Roster`].
///
/// Rows with a blank city cell are skipped. Only opening the worksheet can
/// fail; once the grid is in hand the pass is total.
pub fn read<S: SpreadsheetSession>(
    session: &S,
    roster_id: &SpreadsheetId,
) -> Result<Roster, RosterError> {
    let sheet = session.open_worksheet(roster_id, CITIES_WORKSHEET_INDEX)?;
    Ok(read_rows(&sheet))
}

/// Build the roster mapping from an already-open worksheet.
pub fn read_rows(sheet: &impl Worksheet) -> Roster {
    let mut roster = Roster::new();
    for row in FIRST_DATA_ROW..=sheet.num_rows() {
        let record = CityRecord::from_cells(
            sheet.cell(row, CITY_COLUMN),
            sheet.cell(row, FORM_COLUMN),
            sheet.cell(row, RESPONSES_COLUMN),
        );
        if record.city.0.is_empty() {
            tracing::debug!("roster row {row} has no city name; skipped");
            continue;
        }
        roster.insert(record.city.clone(), record);
    }
    roster
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
