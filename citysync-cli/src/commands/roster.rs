//! `citysync roster` — roster visibility.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use citysync_clients::SheetsSession;
use citysync_core::CityRecord;
use citysync_roster::reader;

/// Arguments for `citysync roster`.
#[derive(Args, Debug)]
pub struct RosterArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RosterRowJson {
    city: String,
    form: Option<String>,
    responses: Option<String>,
    complete: bool,
}

#[derive(Tabled)]
struct RosterTableRow {
    #[tabled(rename = "city")]
    city: String,
    #[tabled(rename = "form")]
    form: String,
    #[tabled(rename = "responses")]
    responses: String,
    #[tabled(rename = "state")]
    state: String,
}

impl RosterArgs {
    pub fn run(self) -> Result<()> {
        let config = super::load_config()?;
        let session = SheetsSession::new(&config.credentials);
        let roster =
            reader::read(&session, &config.roster_id).context("failed to read the roster")?;

        if self.json {
            let rows: Vec<RosterRowJson> = roster.values().map(json_row).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize roster")?
            );
            return Ok(());
        }

        if roster.is_empty() {
            println!("No cities in the roster.");
            return Ok(());
        }

        let complete = roster.values().filter(|record| record.is_complete()).count();
        let missing = roster.len() - complete;
        println!(
            "{} cities | {} complete | {} missing resources",
            roster.len(),
            complete.to_string().green(),
            if missing > 0 {
                missing.to_string().yellow()
            } else {
                missing.to_string().green()
            },
        );

        let rows: Vec<RosterTableRow> = roster.values().map(table_row).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn json_row(record: &CityRecord) -> RosterRowJson {
    RosterRowJson {
        city: record.city.0.clone(),
        form: record.form.as_ref().map(|form| form.0.clone()),
        responses: record.responses.as_ref().map(|key| key.0.clone()),
        complete: record.is_complete(),
    }
}

fn table_row(record: &CityRecord) -> RosterTableRow {
    RosterTableRow {
        city: record.city.0.clone(),
        form: record
            .form
            .as_ref()
            .map(|form| form.0.clone())
            .unwrap_or_else(|| "-".to_string()),
        responses: record
            .responses
            .as_ref()
            .map(|key| key.0.clone())
            .unwrap_or_else(|| "-".to_string()),
        state: if record.is_complete() {
            "complete".to_string()
        } else {
            "missing".to_string()
        },
    }
}
