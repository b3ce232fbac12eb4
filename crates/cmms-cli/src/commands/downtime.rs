//! Downtime commands

use clap::{Args, Subcommand};
use cmms_core::model::NewDowntime;
use cmms_core::time;
use cmms_store::{Accessor, DowntimeAccessor};

use super::open_store;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct DowntimeArgs {
    #[command(subcommand)]
    pub command: DowntimeCommand,
}

#[derive(Debug, Subcommand)]
pub enum DowntimeCommand {
    /// Record that a piece of equipment stopped
    Start(StartArgs),
    /// Mark a downtime as resolved now
    Resolve(ResolveArgs),
}

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Equipment key
    #[arg(long)]
    pub equipment: String,

    #[arg(long)]
    pub reason: String,

    /// Start time (YYYY-MM-DDTHH:MM:SS, UTC), now if omitted
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Downtime key
    pub id: String,
}

pub fn execute(args: DowntimeArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        DowntimeCommand::Start(start_args) => execute_start(start_args, config),
        DowntimeCommand::Resolve(resolve_args) => execute_resolve(resolve_args, config),
    }
}

fn execute_start(args: StartArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start = match args.at.as_deref() {
        Some(raw) => time::parse_timestamp("at", raw)?,
        None => time::now(),
    };
    let input = NewDowntime {
        equipment_id: args.equipment,
        reason: args.reason,
        start,
    };

    let ctx = open_store(config)?;
    let id = DowntimeAccessor::new().add(&ctx, input)?;
    println!("{}", id);
    Ok(())
}

fn execute_resolve(
    args: ResolveArgs,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_store(config)?;
    let mut downtimes = DowntimeAccessor::new();
    downtimes.resolve(&ctx, &args.id)?;

    if let Some(resolved) = downtimes.records().iter().find(|d| d.id == args.id) {
        println!(
            "{} -> {} ({})",
            resolved.id,
            resolved.status,
            time::format_duration(resolved.duration(time::now()))
        );
    }
    Ok(())
}
