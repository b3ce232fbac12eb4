//! Export commands (database image, CSV tables)

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use cmms_core::csv::{to_csv, CsvRecord};
use cmms_core::model::Entity;
use cmms_core::time;
use cmms_store::{
    Accessor, DowntimeAccessor, EquipmentAccessor, MaintenanceAccessor, PersistenceContext,
    SparePartAccessor, TechnicianAccessor, TicketAccessor, WorkOrderAccessor,
};

use super::open_store;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub command: ExportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Write the SQLite image as cmms-backup-<date>.sqlite
    Snapshot(SnapshotArgs),
    /// Write one entity as a CSV table
    Csv(CsvArgs),
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Output directory
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

#[derive(Debug, Args)]
pub struct CsvArgs {
    pub entity: String,

    /// Output directory
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub fn execute(args: ExportArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ExportCommand::Snapshot(snapshot_args) => execute_snapshot(snapshot_args, config),
        ExportCommand::Csv(csv_args) => execute_csv(csv_args, config),
    }
}

fn execute_snapshot(
    args: SnapshotArgs,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_store(config)?;
    let export = ctx.export_snapshot(time::today())?;

    fs::create_dir_all(&args.out)?;
    let path = args.out.join(&export.file_name);
    fs::write(&path, &export.bytes)?;

    println!("Snapshot written: {}", path.display());
    println!("  bytes: {}", export.bytes.len());
    println!("  sha256: {}", export.digest);
    Ok(())
}

fn execute_csv(args: CsvArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let entity: Entity = args.entity.parse()?;
    let ctx = open_store(config)?;

    let path = match entity {
        Entity::Equipments => write_table(EquipmentAccessor::new(), &ctx, &args.out)?,
        Entity::Tickets => write_table(TicketAccessor::new(), &ctx, &args.out)?,
        Entity::Downtimes => write_table(DowntimeAccessor::new(), &ctx, &args.out)?,
        Entity::MaintenanceTasks => write_table(MaintenanceAccessor::new(), &ctx, &args.out)?,
        Entity::WorkOrders => write_table(WorkOrderAccessor::new(), &ctx, &args.out)?,
        Entity::SpareParts => write_table(SparePartAccessor::new(), &ctx, &args.out)?,
        Entity::Technicians => write_table(TechnicianAccessor::new(), &ctx, &args.out)?,
    };

    println!("CSV written: {}", path.display());
    Ok(())
}

fn write_table<A>(
    mut accessor: A,
    ctx: &PersistenceContext,
    out: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>>
where
    A: Accessor,
    A::Record: CsvRecord,
{
    accessor.refresh(ctx)?;
    fs::create_dir_all(out)?;
    let path = out.join(<A::Record as CsvRecord>::FILE_NAME);
    fs::write(&path, to_csv(accessor.records()))?;
    Ok(path)
}
