//! `citysync sync` — provision per-city resources from the roster.

use anyhow::{bail, Context, Result};
use clap::Args;

use citysync_clients::{ScriptFormCopier, SheetsSession};
use citysync_roster::{reconciler, RowOutcome, RunReport};

/// Arguments for `citysync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Classify every row without creating, copying, or writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run report as machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let config = super::load_config()?;
        let session = SheetsSession::new(&config.credentials);
        let copier = ScriptFormCopier::new(&config.credentials);

        let report = reconciler::reconcile(&session, &copier, &config, self.dry_run)
            .context("sync failed")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize run report")?
            );
        } else {
            print_report(&report, self.dry_run);
        }

        if report.failed() > 0 {
            bail!("{} row(s) failed; see output above", report.failed());
        }
        Ok(())
    }
}

fn print_report(report: &RunReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if report.rows.is_empty() {
        println!("{prefix}✓ roster has no city rows; nothing to do");
        return;
    }

    println!(
        "{prefix}✓ roster reconciled ({} updated, {} up to date, {} failed)",
        report.updated() + report.would_update(),
        report.up_to_date(),
        report.failed(),
    );

    for row in &report.rows {
        match row {
            RowOutcome::Updated {
                city,
                form,
                responses_url,
                created_sheet,
            } => {
                let note = if *created_sheet { " (new sheet)" } else { "" };
                println!("  ✎  {city}{note}");
                println!("      form:      {form}");
                println!("      responses: {responses_url}");
            }
            RowOutcome::WouldUpdate { city, create_sheet } => {
                let note = if *create_sheet { " (would create sheet)" } else { "" };
                println!("  ~  {city}{note}");
            }
            RowOutcome::UpToDate { city } => println!("  ·  {city}"),
            RowOutcome::Failed { city, reason } => println!("  ✗  {city}: {reason}"),
        }
    }
}
