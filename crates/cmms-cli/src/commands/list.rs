//! Record listing command

use clap::Args;
use cmms_core::model::Entity;
use cmms_store::{
    Accessor, DowntimeAccessor, EquipmentAccessor, MaintenanceAccessor, PersistenceContext,
    SparePartAccessor, TechnicianAccessor, TicketAccessor, WorkOrderAccessor,
};
use serde::Serialize;

use super::open_store;
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// equipments, tickets, downtimes, maintenance, work-orders, spare-parts or technicians
    pub entity: String,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ListArgs, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let entity: Entity = args.entity.parse()?;
    let ctx = open_store(config)?;

    let mut equipments = EquipmentAccessor::new();
    equipments.refresh(&ctx)?;

    match entity {
        Entity::Equipments => print_records(equipments.records(), args.json, |e| {
            format!(
                "{}  {}  {}  {}  {}  {}",
                e.id, e.name, e.model, e.serial_number, e.commissioning_date, e.status
            )
        }),
        Entity::Tickets => {
            let tickets = load(TicketAccessor::new(), &ctx)?;
            print_records(tickets.records(), args.json, |t| {
                format!(
                    "{}  {}  {}  [{}]  {}  {}",
                    t.number,
                    t.subject,
                    equipments.name_of(&t.equipment_id),
                    t.priority,
                    t.status,
                    t.opened_date
                )
            })
        }
        Entity::Downtimes => {
            let downtimes = load(DowntimeAccessor::new(), &ctx)?;
            print_records(downtimes.records(), args.json, |d| {
                let end = d
                    .end
                    .map(cmms_core::time::format_timestamp)
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "{}  {}  {}  {} -> {}  {}",
                    d.id,
                    equipments.name_of(&d.equipment_id),
                    d.reason,
                    cmms_core::time::format_timestamp(d.start),
                    end,
                    d.status
                )
            })
        }
        Entity::MaintenanceTasks => {
            let tasks = load(MaintenanceAccessor::new(), &ctx)?;
            print_records(tasks.records(), args.json, |t| {
                format!(
                    "{}  {}  {}  due {}  {}",
                    t.id,
                    t.task,
                    equipments.name_of(&t.equipment_id),
                    t.due_date,
                    t.status
                )
            })
        }
        Entity::WorkOrders => {
            let technicians = load(TechnicianAccessor::new(), &ctx)?;
            let work_orders = load(WorkOrderAccessor::new(), &ctx)?;
            print_records(work_orders.records(), args.json, |w| {
                let assignee = w
                    .technician_id
                    .as_deref()
                    .map(|id| {
                        technicians
                            .records()
                            .iter()
                            .find(|t| t.id == id)
                            .map(|t| t.name.as_str())
                            .unwrap_or("Inconnu")
                    })
                    .unwrap_or("-");
                format!(
                    "{}  {}  {}  {}  [{}]  {}",
                    w.id,
                    equipments.name_of(&w.equipment_id),
                    w.description,
                    assignee,
                    w.priority,
                    w.status
                )
            })
        }
        Entity::SpareParts => {
            let parts = load(SparePartAccessor::new(), &ctx)?;
            print_records(parts.records(), args.json, |p| {
                format!(
                    "{}  {}  {}  x{}  {}",
                    p.id, p.name, p.part_number, p.quantity, p.location
                )
            })
        }
        Entity::Technicians => {
            let technicians = load(TechnicianAccessor::new(), &ctx)?;
            print_records(technicians.records(), args.json, |t| {
                format!(
                    "{}  {}  {}  {}  {}",
                    t.id, t.name, t.email, t.phone, t.specialization
                )
            })
        }
    }
}

fn load<A: Accessor>(mut accessor: A, ctx: &PersistenceContext) -> cmms_store::Result<A> {
    accessor.refresh(ctx)?;
    Ok(accessor)
}

fn print_records<T, F>(records: &[T], json: bool, line: F) -> Result<(), Box<dyn std::error::Error>>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    for record in records {
        println!("{}", line(record));
    }
    Ok(())
}
