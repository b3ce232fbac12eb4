//! Entity names accepted at input boundaries

use std::fmt;
use std::str::FromStr;

use crate::errors::CmmsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Equipments,
    Tickets,
    Downtimes,
    MaintenanceTasks,
    WorkOrders,
    SpareParts,
    Technicians,
}

impl Entity {
    pub const ALL: [Entity; 7] = [
        Entity::Equipments,
        Entity::Tickets,
        Entity::Downtimes,
        Entity::MaintenanceTasks,
        Entity::WorkOrders,
        Entity::SpareParts,
        Entity::Technicians,
    ];

    /// Canonical name, as typed on the command line
    pub fn name(self) -> &'static str {
        match self {
            Entity::Equipments => "equipments",
            Entity::Tickets => "tickets",
            Entity::Downtimes => "downtimes",
            Entity::MaintenanceTasks => "maintenance",
            Entity::WorkOrders => "work-orders",
            Entity::SpareParts => "spare-parts",
            Entity::Technicians => "technicians",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the canonical name, the singular, and `_` in place of `-`
impl FromStr for Entity {
    type Err = CmmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let entity = match normalized.as_str() {
            "equipments" | "equipment" => Entity::Equipments,
            "tickets" | "ticket" => Entity::Tickets,
            "downtimes" | "downtime" => Entity::Downtimes,
            "maintenance" | "maintenance-tasks" | "maintenance-task" => Entity::MaintenanceTasks,
            "work-orders" | "work-order" => Entity::WorkOrders,
            "spare-parts" | "spare-part" | "parts" => Entity::SpareParts,
            "technicians" | "technician" => Entity::Technicians,
            _ => {
                return Err(CmmsError::UnknownEntity {
                    name: s.to_string(),
                })
            }
        };
        Ok(entity)
    }
}
