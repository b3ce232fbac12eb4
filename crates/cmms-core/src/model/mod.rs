pub mod downtime;
pub mod entity;
pub mod equipment;
pub mod maintenance;
pub mod spare_part;
pub mod status;
pub mod technician;
pub mod ticket;
pub mod work_order;

pub use downtime::{Downtime, NewDowntime};
pub use entity::Entity;
pub use equipment::{Equipment, EquipmentPatch, NewEquipment};
pub use maintenance::{MaintenanceTask, MaintenanceTaskPatch, NewMaintenanceTask};
pub use spare_part::{NewSparePart, SparePart, SparePartPatch};
pub use status::{
    DowntimeStatus, EquipmentStatus, MaintenanceStatus, Priority, TicketStatus, WorkOrderStatus,
};
pub use technician::{NewTechnician, Technician, TechnicianPatch};
pub use ticket::{NewTicket, Ticket, TicketPatch};
pub use work_order::{NewWorkOrder, WorkOrder, WorkOrderPatch};
