//! Equipment commands

use clap::{Args, Subcommand};
use cmms_core::model::{EquipmentStatus, NewEquipment};
use cmms_core::time;
use cmms_store::EquipmentAccessor;

use super::open_store;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct EquipmentArgs {
    #[command(subcommand)]
    pub command: EquipmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum EquipmentCommand {
    /// Register a piece of equipment
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub model: String,

    #[arg(long)]
    pub serial: String,

    /// Commissioning date (YYYY-MM-DD), today if omitted
    #[arg(long)]
    pub commissioned: Option<String>,

    /// Status label or code
    #[arg(long, default_value = "operational")]
    pub status: String,
}

pub fn execute(args: EquipmentArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        EquipmentCommand::Add(add_args) => execute_add(add_args, config),
    }
}

fn execute_add(args: AddArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let commissioning_date = match args.commissioned.as_deref() {
        Some(raw) => time::parse_date("commissioned", raw)?,
        None => time::today(),
    };
    let input = NewEquipment {
        name: args.name,
        model: args.model,
        serial_number: args.serial,
        commissioning_date,
        status: args.status.parse::<EquipmentStatus>()?,
    };

    let ctx = open_store(config)?;
    let id = EquipmentAccessor::new().add(&ctx, input)?;
    println!("{}", id);
    Ok(())
}
