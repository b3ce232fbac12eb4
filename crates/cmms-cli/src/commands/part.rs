//! Spare part commands

use clap::{Args, Subcommand};
use cmms_core::model::spare_part::parse_quantity;
use cmms_core::model::NewSparePart;
use cmms_core::time;
use cmms_store::{Accessor, SparePartAccessor};

use super::open_store;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct PartArgs {
    #[command(subcommand)]
    pub command: PartCommand,
}

#[derive(Debug, Subcommand)]
pub enum PartCommand {
    /// Add a spare part to the inventory
    Add(AddArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub part_number: String,

    /// Quantity in stock; anything below 1 or non-numeric is stored as 1
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub quantity: String,

    #[arg(long)]
    pub location: String,

    /// Acquisition date (YYYY-MM-DD)
    #[arg(long)]
    pub acquired: Option<String>,

    /// Installation date (YYYY-MM-DD)
    #[arg(long)]
    pub installed: Option<String>,
}

pub fn execute(args: PartArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        PartCommand::Add(add_args) => execute_add(add_args, config),
    }
}

fn execute_add(args: AddArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let input = NewSparePart {
        name: args.name,
        part_number: args.part_number,
        quantity: i64::from(parse_quantity(&args.quantity)),
        location: args.location,
        acquisition_date: time::parse_optional_date(
            "acquired",
            args.acquired.as_deref().unwrap_or(""),
        )?,
        installation_date: time::parse_optional_date(
            "installed",
            args.installed.as_deref().unwrap_or(""),
        )?,
    };

    let ctx = open_store(config)?;
    let mut parts = SparePartAccessor::new();
    let id = parts.add(&ctx, input)?;
    let quantity = parts
        .records()
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.quantity)
        .unwrap_or_default();
    println!("{} x{}", id, quantity);
    Ok(())
}
