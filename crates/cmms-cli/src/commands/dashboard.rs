//! Dashboard command

use clap::Args;
use cmms_core::dashboard::DashboardSummary;
use cmms_core::time;
use cmms_store::{
    Accessor, DowntimeAccessor, EquipmentAccessor, MaintenanceAccessor, TicketAccessor,
};

use super::open_store;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: DashboardArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = open_store(config)?;
    let mut equipments = EquipmentAccessor::new();
    let mut tickets = TicketAccessor::new();
    let mut tasks = MaintenanceAccessor::new();
    let mut downtimes = DowntimeAccessor::new();
    equipments.refresh(&ctx)?;
    tickets.refresh(&ctx)?;
    tasks.refresh(&ctx)?;
    downtimes.refresh(&ctx)?;

    let summary = DashboardSummary::compute(
        equipments.records(),
        tickets.records(),
        tasks.records(),
        downtimes.records(),
        time::now(),
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Équipements:        {}", summary.total_equipments);
    println!("  en panne:         {}", summary.down_equipments);
    println!("Tickets ouverts:    {}", summary.open_tickets);
    println!("  priorité haute:   {}", summary.high_priority_open_tickets);
    println!(
        "Maintenance:        {} planifiées, {} en retard",
        summary.planned_maintenance, summary.overdue_maintenance
    );
    println!("Temps d'arrêt:      {}", summary.total_downtime);

    println!();
    println!("Maintenances à venir:");
    for task in &summary.upcoming_maintenance {
        println!(
            "  {}  {}  {}  {}",
            task.due_date,
            task.task,
            equipments.name_of(&task.equipment_id),
            task.status
        );
    }

    println!();
    println!("Tickets récents:");
    for ticket in &summary.recent_tickets {
        println!(
            "  {}  {}  {}  [{}]",
            ticket.number,
            ticket.subject,
            equipments.name_of(&ticket.equipment_id),
            ticket.priority
        );
    }
    Ok(())
}
