//! Fleet overview computed from accessor snapshots

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::{
    Downtime, Equipment, EquipmentStatus, MaintenanceStatus, MaintenanceTask, Priority, Ticket,
    TicketStatus,
};
use crate::time::format_duration;

/// How many entries the upcoming/recent lists keep
pub const DASHBOARD_LIST_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_equipments: usize,
    pub down_equipments: usize,
    pub open_tickets: usize,
    pub high_priority_open_tickets: usize,
    pub planned_maintenance: usize,
    pub overdue_maintenance: usize,
    pub total_downtime_minutes: i64,
    /// `total_downtime_minutes` as `"<h>h <m>m"`
    pub total_downtime: String,
    /// Not-completed tasks, nearest due date first
    pub upcoming_maintenance: Vec<MaintenanceTask>,
    /// Unresolved tickets, most recently opened first
    pub recent_tickets: Vec<Ticket>,
}

impl DashboardSummary {
    pub fn compute(
        equipments: &[Equipment],
        tickets: &[Ticket],
        tasks: &[MaintenanceTask],
        downtimes: &[Downtime],
        now: NaiveDateTime,
    ) -> Self {
        let unresolved = |t: &&Ticket| t.status != TicketStatus::Resolved;

        let total_downtime = downtimes
            .iter()
            .fold(chrono::Duration::zero(), |acc, dt| acc + dt.duration(now));

        let mut upcoming: Vec<MaintenanceTask> = tasks
            .iter()
            .filter(|t| t.status != MaintenanceStatus::Completed)
            .cloned()
            .collect();
        upcoming.sort_by_key(|t| t.due_date);
        upcoming.truncate(DASHBOARD_LIST_LEN);

        let mut recent: Vec<Ticket> = tickets.iter().filter(unresolved).cloned().collect();
        // stable sort keeps the accessor's creation-time order within a day
        recent.sort_by(|a, b| b.opened_date.cmp(&a.opened_date));
        recent.truncate(DASHBOARD_LIST_LEN);

        Self {
            total_equipments: equipments.len(),
            down_equipments: equipments
                .iter()
                .filter(|e| e.status == EquipmentStatus::Down)
                .count(),
            open_tickets: tickets.iter().filter(unresolved).count(),
            high_priority_open_tickets: tickets
                .iter()
                .filter(unresolved)
                .filter(|t| t.priority == Priority::High)
                .count(),
            planned_maintenance: tasks
                .iter()
                .filter(|t| t.status == MaintenanceStatus::Planned)
                .count(),
            overdue_maintenance: tasks
                .iter()
                .filter(|t| t.status == MaintenanceStatus::Overdue)
                .count(),
            total_downtime_minutes: total_downtime.num_minutes(),
            total_downtime: format_duration(total_downtime),
            upcoming_maintenance: upcoming,
            recent_tickets: recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DowntimeStatus;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn ticket(id: &str, opened: u32, priority: Priority, status: TicketStatus) -> Ticket {
        Ticket {
            id: id.to_string(),
            number: format!("TKT-2024-{}", id),
            subject: "s".to_string(),
            description: "d".to_string(),
            equipment_id: "eq-1".to_string(),
            priority,
            status,
            opened_date: day(opened),
            resolved_date: None,
        }
    }

    fn task(id: &str, due: u32, status: MaintenanceStatus) -> MaintenanceTask {
        MaintenanceTask {
            id: id.to_string(),
            task: "t".to_string(),
            equipment_id: "eq-1".to_string(),
            due_date: day(due),
            status,
            completed_date: None,
        }
    }

    #[test]
    fn test_counts_and_lists() {
        let equipments = vec![
            Equipment {
                id: "eq-1".to_string(),
                name: "A".to_string(),
                model: "m".to_string(),
                serial_number: "s".to_string(),
                commissioning_date: day(1),
                status: EquipmentStatus::Down,
            },
            Equipment {
                id: "eq-2".to_string(),
                name: "B".to_string(),
                model: "m".to_string(),
                serial_number: "s".to_string(),
                commissioning_date: day(1),
                status: EquipmentStatus::Operational,
            },
        ];
        let tickets = vec![
            ticket("1", 20, Priority::High, TicketStatus::Open),
            ticket("2", 19, Priority::High, TicketStatus::Resolved),
            ticket("3", 21, Priority::Low, TicketStatus::InProgress),
        ];
        let tasks = vec![
            task("a", 25, MaintenanceStatus::Planned),
            task("b", 10, MaintenanceStatus::Completed),
            task("c", 15, MaintenanceStatus::Overdue),
        ];
        let start = day(18).and_hms_opt(10, 0, 0).unwrap();
        let downtimes = vec![Downtime {
            id: "dt-1".to_string(),
            equipment_id: "eq-1".to_string(),
            reason: "r".to_string(),
            start,
            end: None,
            status: DowntimeStatus::Ongoing,
        }];
        let now = start + chrono::Duration::minutes(90);

        let summary = DashboardSummary::compute(&equipments, &tickets, &tasks, &downtimes, now);

        assert_eq!(summary.total_equipments, 2);
        assert_eq!(summary.down_equipments, 1);
        assert_eq!(summary.open_tickets, 2);
        assert_eq!(summary.high_priority_open_tickets, 1);
        assert_eq!(summary.planned_maintenance, 1);
        assert_eq!(summary.overdue_maintenance, 1);
        assert_eq!(summary.total_downtime, "1h 30m");

        let upcoming: Vec<&str> = summary
            .upcoming_maintenance
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(upcoming, vec!["c", "a"]);

        let recent: Vec<&str> = summary.recent_tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(recent, vec!["3", "1"]);
    }

    #[test]
    fn test_lists_are_capped() {
        let tasks: Vec<MaintenanceTask> = (1..=8)
            .map(|d| task(&d.to_string(), d, MaintenanceStatus::Planned))
            .collect();
        let now = day(1).and_hms_opt(0, 0, 0).unwrap();
        let summary = DashboardSummary::compute(&[], &[], &tasks, &[], now);
        assert_eq!(summary.upcoming_maintenance.len(), DASHBOARD_LIST_LEN);
        assert_eq!(summary.total_downtime, "0h 0m");
    }
}
