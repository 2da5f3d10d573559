//! Sheet reconciliation — provision missing per-city resources and write the
//! references back into the roster.
//!
//! Each data row lands in one of four cases, keyed on whether the form and
//! responses cells are populated:
//!
//! 1. both blank: create the responses sheet, then copy the form.
//! 2. form blank: copy the form against the existing responses key.
//! 3. responses blank: create the responses sheet, then copy a fresh form.
//! 4. both present: nothing to do; the row is not touched.
//!
//! Sheet creation always precedes the form copy, since the copy is
//! parameterized by the responses key. A row that fails is recorded in the
//! report and the remaining rows still run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use citysync_core::{CityName, CityRecord, FormUrl, SyncConfig};

use crate::error::RosterError;
use crate::reader::{
    CITIES_WORKSHEET_INDEX, CITY_COLUMN, FIRST_DATA_ROW, FORM_COLUMN, RESPONSES_COLUMN,
};
use crate::session::{FormCopier, SpreadsheetSession, Worksheet};

// ---------------------------------------------------------------------------
// Row outcome
// ---------------------------------------------------------------------------

/// Outcome of reconciling a single roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RowOutcome {
    /// Resources were provisioned and the row was written back.
    Updated {
        city: CityName,
        form: FormUrl,
        responses_url: String,
        /// Whether a new responses sheet was created (cases 1 and 3).
        created_sheet: bool,
    },
    /// Both references were already present; the row was not touched.
    UpToDate { city: CityName },
    /// `--dry-run` mode: the row *would* have been updated.
    WouldUpdate { city: CityName, create_sheet: bool },
    /// The row failed; later rows still ran.
    Failed { city: CityName, reason: String },
}

/// Summary of one reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub rows: Vec<RowOutcome>,
}

impl RunReport {
    pub fn updated(&self) -> usize {
        self.count(|row| matches!(row, RowOutcome::Updated { .. }))
    }

    pub fn up_to_date(&self) -> usize {
        self.count(|row| matches!(row, RowOutcome::UpToDate { .. }))
    }

    pub fn would_update(&self) -> usize {
        self.count(|row| matches!(row, RowOutcome::WouldUpdate { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|row| matches!(row, RowOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&RowOutcome) -> bool) -> usize {
        self.rows.iter().filter(|row| pred(row)).count()
    }
}

// ---------------------------------------------------------------------------
// Title
// ---------------------------------------------------------------------------

/// Title given to a city's responses spreadsheet.
pub fn responses_sheet_title(city: &CityName) -> String {
    format!("{} Tour To-Do Responses", city.0)
}

// ---------------------------------------------------------------------------
// reconcile
// ---------------------------------------------------------------------------

/// Reconcile every roster row against the spreadsheet store and the form
/// executor.
///
/// Re-reads the worksheet rather than trusting an earlier [`crate::read`]
/// snapshot. Only failing to open the roster aborts the run; per-row failures
/// are recorded as [`RowOutcome::Failed`] and reconciliation continues.
///
/// With `dry_run` set, rows are classified but nothing is created, copied, or
/// written.
pub fn reconcile<S, C>(
    session: &S,
    copier: &C,
    config: &SyncConfig,
    dry_run: bool,
) -> Result<RunReport, RosterError>
where
    S: SpreadsheetSession,
    C: FormCopier,
{
    let started_at = Utc::now();
    let mut sheet = session.open_worksheet(&config.roster_id, CITIES_WORKSHEET_INDEX)?;

    let mut rows = Vec::new();
    for row in FIRST_DATA_ROW..=sheet.num_rows() {
        let record = CityRecord::from_cells(
            sheet.cell(row, CITY_COLUMN),
            sheet.cell(row, FORM_COLUMN),
            sheet.cell(row, RESPONSES_COLUMN),
        );
        if record.city.0.is_empty() {
            tracing::warn!("roster row {row} has no city name; skipped");
            continue;
        }

        let city = record.city.clone();
        match reconcile_row(session, copier, &mut sheet, row, record, dry_run) {
            Ok(outcome) => rows.push(outcome),
            Err(err) => {
                tracing::warn!("row {row} ({city}) failed: {err}");
                rows.push(RowOutcome::Failed {
                    city,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(RunReport { started_at, rows })
}

fn reconcile_row<S, C>(
    session: &S,
    copier: &C,
    sheet: &mut S::Sheet,
    row: u32,
    record: CityRecord,
    dry_run: bool,
) -> Result<RowOutcome, RosterError>
where
    S: SpreadsheetSession,
    C: FormCopier,
{
    if record.is_complete() {
        tracing::debug!("{}: up to date", record.city);
        return Ok(RowOutcome::UpToDate { city: record.city });
    }

    let city = record.city;
    let needs_sheet = record.responses.is_none();
    if dry_run {
        tracing::info!("[dry-run] would update row {row} ({city})");
        return Ok(RowOutcome::WouldUpdate {
            city,
            create_sheet: needs_sheet,
        });
    }

    // The sheet must exist before the form copy; the copy takes its key.
    let (responses_key, created_sheet) = match record.responses {
        Some(key) => (key, false),
        None => {
            let title = responses_sheet_title(&city);
            let key = session.create_spreadsheet(&title)?;
            tracing::info!("created responses sheet '{title}' ({key})");
            (key, true)
        }
    };
    let form = copier.copy_form(&city, &responses_key)?;

    let responses_url = responses_key.to_url();
    sheet.set_cell(row, FORM_COLUMN, &form.0);
    sheet.set_cell(row, RESPONSES_COLUMN, &responses_url);
    sheet.save()?;
    tracing::info!("updated row {row} ({city}): form {form}");

    Ok(RowOutcome::Updated {
        city,
        form,
        responses_url,
        created_sheet,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
