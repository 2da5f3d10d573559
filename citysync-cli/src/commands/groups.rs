//! `citysync groups` — create groups, list them, reconcile topics.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use citysync_chat::{inspect, provision, topics, GroupOutcome, TopicOutcome};
use citysync_clients::{SheetsSession, SlackClient};
use citysync_core::{CityName, GroupId, GroupName, TopicAssignment};
use citysync_roster::reader;

#[derive(Subcommand, Debug)]
pub enum GroupsCommand {
    /// Create one private group per city (names are normalized).
    Create(CreateArgs),

    /// List existing groups with their ids.
    List(ListArgs),

    /// Apply topics from a JSON file mapping group id to topic text.
    SetTopics(SetTopicsArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// City names to create groups for.
    pub cities: Vec<String>,

    /// Derive the city list from the roster instead.
    #[arg(long, conflicts_with = "cities")]
    pub from_roster: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SetTopicsArgs {
    /// JSON object of group id to desired topic.
    pub file: PathBuf,
}

pub fn run(command: GroupsCommand) -> Result<()> {
    match command {
        GroupsCommand::Create(args) => create(args),
        GroupsCommand::List(args) => list(args),
        GroupsCommand::SetTopics(args) => set_topics(args),
    }
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

fn create(args: CreateArgs) -> Result<()> {
    if !args.from_roster && args.cities.is_empty() {
        bail!("provide city names or use --from-roster");
    }

    let config = super::load_config()?;
    let names: Vec<GroupName> = if args.from_roster {
        let session = SheetsSession::new(&config.credentials);
        let roster =
            reader::read(&session, &config.roster_id).context("failed to read the roster")?;
        roster.keys().map(GroupName::for_city).collect()
    } else {
        args.cities
            .iter()
            .map(|city| GroupName::for_city(&CityName::from(city.as_str())))
            .collect()
    };

    let client = SlackClient::new(&config.credentials);
    let outcomes = provision::create_groups(&client, &names);

    let mut failed = 0;
    for outcome in &outcomes {
        match outcome {
            GroupOutcome::Created { name, id } => println!("  ✎  {name} ({id})"),
            GroupOutcome::Failed { name, reason } => {
                failed += 1;
                println!("  ✗  {name}: {reason}");
            }
        }
    }
    if failed > 0 {
        bail!("{failed} group(s) could not be created");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct GroupTableRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "id")]
    id: String,
}

fn list(args: ListArgs) -> Result<()> {
    let config = super::load_config()?;
    let client = SlackClient::new(&config.credentials);
    let groups = inspect::list_groups(&client).context("failed to list groups")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&groups).context("failed to serialize group list")?
        );
        return Ok(());
    }

    if groups.is_empty() {
        println!("No groups.");
        return Ok(());
    }

    let rows: Vec<GroupTableRow> = groups
        .iter()
        .map(|group| GroupTableRow {
            name: group.name.clone(),
            id: group.id.0.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

// ---------------------------------------------------------------------------
// set-topics
// ---------------------------------------------------------------------------

fn set_topics(args: SetTopicsArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read topics file '{}'", args.file.display()))?;
    let desired: BTreeMap<String, String> = serde_json::from_str(&contents).with_context(|| {
        format!(
            "topics file '{}' is not a JSON object of id to topic",
            args.file.display()
        )
    })?;
    let assignments: Vec<TopicAssignment> = desired
        .into_iter()
        .map(|(group, topic)| TopicAssignment {
            group: GroupId::from(group),
            topic,
        })
        .collect();

    let config = super::load_config()?;
    let client = SlackClient::new(&config.credentials);
    let outcomes = topics::set_topics(&client, &assignments);

    let mut failed = 0;
    for outcome in &outcomes {
        match outcome {
            TopicOutcome::Set { group, topic } => println!("  ✎  {group}: {topic}"),
            TopicOutcome::Unchanged { group } => println!("  ·  {group}"),
            TopicOutcome::Failed { group, reason } => {
                failed += 1;
                println!("  ✗  {group}: {reason}");
            }
        }
    }
    if failed > 0 {
        bail!("{failed} topic(s) could not be applied");
    }
    Ok(())
}
