//! Ticket commands

use clap::{Args, Subcommand};
use cmms_core::model::{NewTicket, Priority, TicketStatus};
use cmms_store::TicketAccessor;

use super::open_store;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct TicketArgs {
    #[command(subcommand)]
    pub command: TicketCommand,
}

#[derive(Debug, Subcommand)]
pub enum TicketCommand {
    /// Open a new ticket against a piece of equipment
    Open(OpenArgs),
    /// Change a ticket's status
    Status(StatusArgs),
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    #[arg(long)]
    pub subject: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Equipment key
    #[arg(long)]
    pub equipment: String,

    /// Priority label or code
    #[arg(long, default_value = "medium")]
    pub priority: String,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Ticket key
    pub id: String,

    /// Status label or code (open, in-progress, resolved)
    pub status: String,
}

pub fn execute(args: TicketArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        TicketCommand::Open(open_args) => execute_open(open_args, config),
        TicketCommand::Status(status_args) => execute_status(status_args, config),
    }
}

fn execute_open(args: OpenArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let input = NewTicket {
        subject: args.subject,
        description: args.description,
        equipment_id: args.equipment,
        priority: args.priority.parse::<Priority>()?,
    };

    let ctx = open_store(config)?;
    let mut tickets = TicketAccessor::new();
    let id = tickets.add(&ctx, input)?;
    let number = tickets
        .get(&id)
        .map(|t| t.number.as_str())
        .unwrap_or_default();
    println!("{} {}", id, number);
    Ok(())
}

fn execute_status(args: StatusArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let status = args.status.parse::<TicketStatus>()?;
    let ctx = open_store(config)?;
    TicketAccessor::new().set_status(&ctx, &args.id, status)?;
    println!("{} -> {}", args.id, status);
    Ok(())
}
