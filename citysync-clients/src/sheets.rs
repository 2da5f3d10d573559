//! Spreadsheet-store binding over the Sheets v4 HTTP API.
//!
//! One trait method maps to one or two HTTP calls; body handling is split
//! into pure `parse_*` functions so the mappings are testable without a
//! network.

use serde::Deserialize;

use citysync_core::{Credentials, SheetKey, SpreadsheetId};
use citysync_roster::{RosterError, SpreadsheetSession, Worksheet};

use crate::http::{agent, bearer, roster_err, send, send_json};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Blocking Sheets session. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct SheetsSession {
    agent: ureq::Agent,
    token: String,
}

impl SheetsSession {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            agent: agent(),
            token: credentials.google_token.clone(),
        }
    }

    fn get_body(&self, url: &str, query: &[(&str, &str)]) -> Result<String, RosterError> {
        let mut request = self.agent.get(url).set("Authorization", &bearer(&self.token));
        for (name, value) in query {
            request = request.query(name, value);
        }
        send(request).map_err(roster_err)
    }
}

impl SpreadsheetSession for SheetsSession {
    type Sheet = SheetsWorksheet;

    fn open_worksheet(
        &self,
        id: &SpreadsheetId,
        index: usize,
    ) -> Result<Self::Sheet, RosterError> {
        // Two calls: worksheet title from the document metadata, then the
        // whole grid for that title.
        let meta_url = format!("{SHEETS_API_BASE}/{}", id.0);
        let body = self.get_body(&meta_url, &[("fields", "sheets.properties.title")])?;
        let title = parse_worksheet_title(&body, index)?;

        let values_url = format!("{SHEETS_API_BASE}/{}/values/{}", id.0, quote_range(&title));
        let body = self.get_body(&values_url, &[("majorDimension", "ROWS")])?;
        let grid = parse_value_grid(&body)?;
        tracing::debug!("opened worksheet '{title}' ({} rows)", grid.len());

        Ok(SheetsWorksheet {
            agent: self.agent.clone(),
            token: self.token.clone(),
            spreadsheet_id: id.clone(),
            title,
            grid,
            staged: Vec::new(),
        })
    }

    fn create_spreadsheet(&self, title: &str) -> Result<SheetKey, RosterError> {
        let request = self
            .agent
            .post(SHEETS_API_BASE)
            .set("Authorization", &bearer(&self.token));
        let payload = serde_json::json!({ "properties": { "title": title } });
        let body = send_json(request, payload).map_err(roster_err)?;
        parse_spreadsheet_key(&body)
    }
}

// ---------------------------------------------------------------------------
// Worksheet
// ---------------------------------------------------------------------------

/// A worksheet snapshot with buffered writes.
///
/// Cells are read from the grid fetched at open time; `set_cell` updates the
/// local grid and stages the write, `save` flushes every staged cell in one
/// batch call.
pub struct SheetsWorksheet {
    agent: ureq::Agent,
    token: String,
    spreadsheet_id: SpreadsheetId,
    title: String,
    grid: Vec<Vec<String>>,
    staged: Vec<(u32, u32, String)>,
}

impl Worksheet for SheetsWorksheet {
    fn num_rows(&self) -> u32 {
        self.grid.len() as u32
    }

    fn cell(&self, row: u32, col: u32) -> &str {
        let (Some(row), Some(col)) = (row.checked_sub(1), col.checked_sub(1)) else {
            return "";
        };
        self.grid
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn set_cell(&mut self, row: u32, col: u32, value: &str) {
        let (Some(row_index), Some(col_index)) = (row.checked_sub(1), col.checked_sub(1)) else {
            return;
        };
        let (row_index, col_index) = (row_index as usize, col_index as usize);
        if self.grid.len() <= row_index {
            self.grid.resize(row_index + 1, Vec::new());
        }
        let cells = &mut self.grid[row_index];
        if cells.len() <= col_index {
            cells.resize(col_index + 1, String::new());
        }
        cells[col_index] = value.to_string();
        self.staged.push((row, col, value.to_string()));
    }

    fn save(&mut self) -> Result<(), RosterError> {
        if self.staged.is_empty() {
            return Ok(());
        }
        let url = format!(
            "{SHEETS_API_BASE}/{}/values:batchUpdate",
            self.spreadsheet_id.0
        );
        let request = self
            .agent
            .post(&url)
            .set("Authorization", &bearer(&self.token));
        let payload = batch_update_payload(&self.title, &self.staged);
        send_json(request, payload).map_err(roster_err)?;
        tracing::debug!("saved {} cell(s) to '{}'", self.staged.len(), self.title);
        self.staged.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pure parsing and payload building
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

fn parse_worksheet_title(body: &str, index: usize) -> Result<String, RosterError> {
    let meta: SpreadsheetMeta = serde_json::from_str(body)
        .map_err(|err| RosterError::Malformed(format!("spreadsheet metadata: {err}")))?;
    meta.sheets
        .into_iter()
        .nth(index)
        .map(|sheet| sheet.properties.title)
        .ok_or(RosterError::WorksheetMissing { index })
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

fn parse_value_grid(body: &str) -> Result<Vec<Vec<String>>, RosterError> {
    let range: ValueRange = serde_json::from_str(body)
        .map_err(|err| RosterError::Malformed(format!("value range: {err}")))?;
    Ok(range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

// The values API returns whatever JSON type the cell holds; everything is
// text to the roster.
fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct CreatedSpreadsheet {
    #[serde(rename = "spreadsheetId")]
    spreadsheet_id: String,
}

fn parse_spreadsheet_key(body: &str) -> Result<SheetKey, RosterError> {
    let created: CreatedSpreadsheet = serde_json::from_str(body)
        .map_err(|err| RosterError::Malformed(format!("create response: {err}")))?;
    Ok(SheetKey::from(created.spreadsheet_id))
}

/// A1 range for a whole worksheet; quoting survives spaces in the title.
fn quote_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn batch_update_payload(title: &str, staged: &[(u32, u32, String)]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = staged
        .iter()
        .map(|(row, col, value)| {
            serde_json::json!({
                "range": format!("{}!{}{row}", quote_range(title), col_letter(*col)),
                "values": [[value]],
            })
        })
        .collect();
    serde_json::json!({ "valueInputOption": "RAW", "data": data })
}

/// A1 column letters for a 1-indexed column (1 is A, 27 is AA).
fn col_letter(mut col: u32) -> String {
    let mut letters = String::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.insert(0, (b'A' + rem) as char);
        col = (col - 1) / 26;
    }
    letters
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worksheet_title_by_index() {
        let body = r#"{"sheets":[
            {"properties":{"title":"Cities"}},
            {"properties":{"title":"Budget"}}
        ]}"#;
        assert_eq!(parse_worksheet_title(body, 0).expect("title"), "Cities");
        assert_eq!(parse_worksheet_title(body, 1).expect("title"), "Budget");
    }

    #[test]
    fn missing_worksheet_index_is_an_error() {
        let body = r#"{"sheets":[{"properties":{"title":"Cities"}}]}"#;
        let err = parse_worksheet_title(body, 3).expect_err("no index 3");
        assert!(matches!(err, RosterError::WorksheetMissing { index: 3 }));
    }

    #[test]
    fn no_sheets_field_reads_as_empty() {
        let err = parse_worksheet_title("{}", 0).expect_err("no sheets");
        assert!(matches!(err, RosterError::WorksheetMissing { index: 0 }));
    }

    #[test]
    fn value_grid_stringizes_every_cell() {
        let body = r#"{"range":"Cities!A1:I4","values":[
            ["a","b"],
            [1, true, null],
            []
        ]}"#;
        let grid = parse_value_grid(body).expect("grid");
        assert_eq!(grid[0], vec!["a", "b"]);
        assert_eq!(grid[1], vec!["1", "true", ""]);
        assert!(grid[2].is_empty());
    }

    #[test]
    fn empty_sheet_has_no_values_field() {
        let grid = parse_value_grid(r#"{"range":"Cities!A1:I1"}"#).expect("grid");
        assert!(grid.is_empty());
    }

    #[test]
    fn malformed_grid_body_is_an_error() {
        let err = parse_value_grid("not json").expect_err("malformed");
        assert!(matches!(err, RosterError::Malformed(_)));
    }

    #[test]
    fn created_spreadsheet_key() {
        let body = r#"{"spreadsheetId":"new-key-1","properties":{"title":"T"}}"#;
        assert_eq!(
            parse_spreadsheet_key(body).expect("key"),
            SheetKey::from("new-key-1")
        );
    }

    #[test]
    fn col_letters() {
        assert_eq!(col_letter(1), "A");
        assert_eq!(col_letter(8), "H");
        assert_eq!(col_letter(9), "I");
        assert_eq!(col_letter(26), "Z");
        assert_eq!(col_letter(27), "AA");
        assert_eq!(col_letter(52), "AZ");
        assert_eq!(col_letter(53), "BA");
    }

    #[test]
    fn batch_payload_targets_a1_ranges() {
        let staged = vec![
            (2, 8, "form-url".to_string()),
            (2, 9, "responses-url".to_string()),
        ];
        let payload = batch_update_payload("Cities", &staged);
        assert_eq!(payload["valueInputOption"], "RAW");
        assert_eq!(payload["data"][0]["range"], "'Cities'!H2");
        assert_eq!(payload["data"][0]["values"][0][0], "form-url");
        assert_eq!(payload["data"][1]["range"], "'Cities'!I2");
    }

    #[test]
    fn quoted_range_escapes_embedded_quotes() {
        assert_eq!(quote_range("Tour '25"), "'Tour ''25'");
    }
}
