//! CMMS CLI
//!
//! Command-line front end for the maintenance store

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cmms_core::logging_facility::{self, Profile};

mod commands;
mod config;

use config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "cmms")]
#[command(about = "CMMS - Equipment maintenance tracking", long_about = None)]
struct Cli {
    /// Directory holding the persisted database image
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to ./cmms.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the store, creating and seeding it on first run
    Init(commands::init::InitArgs),
    /// List the records of one entity
    List(commands::list::ListArgs),
    /// Fleet overview
    Dashboard(commands::dashboard::DashboardArgs),
    /// Export the database image or a CSV table
    Export(commands::export::ExportArgs),
    /// Equipment operations
    Equipment(commands::equipment::EquipmentArgs),
    /// Ticket operations
    Ticket(commands::ticket::TicketArgs),
    /// Downtime operations
    Downtime(commands::downtime::DowntimeArgs),
    /// Spare part operations
    Part(commands::part::PartArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = AppConfig::load(cli.config.as_deref(), cli.data_dir)
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })
        .and_then(|config| {
            let profile = config.logging.profile.parse::<Profile>()?;
            logging_facility::init(profile);
            run(cli.command, &config)
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Init(args) => commands::init::execute(args, config),
        Commands::List(args) => commands::list::execute(args, config),
        Commands::Dashboard(args) => commands::dashboard::execute(args, config),
        Commands::Export(args) => commands::export::execute(args, config),
        Commands::Equipment(args) => commands::equipment::execute(args, config),
        Commands::Ticket(args) => commands::ticket::execute(args, config),
        Commands::Downtime(args) => commands::downtime::execute(args, config),
        Commands::Part(args) => commands::part::execute(args, config),
    }
}
