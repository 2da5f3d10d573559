//! Citysync — per-city event resource and group reconciliation CLI.
//!
//! # Usage
//!
//! ```text
//! citysync sync [--dry-run] [--json]
//! citysync roster [--json]
//! citysync groups create [CITY ...]
//! citysync groups create --from-roster
//! citysync groups list [--json]
//! citysync groups set-topics <FILE>
//! ```
//!
//! Configuration comes from the environment (a `.env` file is honored):
//! `CITYSYNC_ROSTER_ID`, `CITYSYNC_GOOGLE_TOKEN`, `CITYSYNC_COPY_SCRIPT_ID`,
//! `CITYSYNC_SLACK_TOKEN`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{groups::GroupsCommand, roster::RosterArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "citysync",
    version,
    about = "Synchronize per-city event resources and group chats",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Provision missing per-city response sheets and to-do forms.
    Sync(SyncArgs),

    /// Show the roster with per-city provisioning state.
    Roster(RosterArgs),

    /// Manage per-city messaging groups.
    Groups {
        #[command(subcommand)]
        command: GroupsCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(err) if err.not_found() => {}
        Err(err) => eprintln!("warning: could not load .env: {err}"),
    }
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Roster(args) => args.run(),
        Commands::Groups { command } => commands::groups::run(command),
    }
}
