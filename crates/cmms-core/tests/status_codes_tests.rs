use cmms_core::model::{
    DowntimeStatus, EquipmentStatus, MaintenanceStatus, Priority, TicketStatus, WorkOrderStatus,
};

macro_rules! assert_domain_laws {
    ($ty:ty, [$($code:literal),+]) => {{
        for value in <$ty>::ALL {
            assert_eq!(<$ty>::from_code(value.code()), *value);
            assert_eq!(<$ty>::from_label(value.label()), Some(*value));
            assert_eq!(value.to_string().parse::<$ty>().unwrap(), *value);
        }
        let codes: Vec<&str> = <$ty>::ALL.iter().map(|v| v.code()).collect();
        assert_eq!(codes, vec![$($code),+], "storage codes must match the CHECK constraint");
    }};
}

#[test]
fn test_every_domain_round_trips_through_storage_and_label() {
    assert_domain_laws!(EquipmentStatus, ["operational", "maintenance", "down"]);
    assert_domain_laws!(Priority, ["high", "medium", "low"]);
    assert_domain_laws!(TicketStatus, ["open", "in-progress", "resolved"]);
    assert_domain_laws!(DowntimeStatus, ["ongoing", "resolved"]);
    assert_domain_laws!(MaintenanceStatus, ["planned", "completed", "overdue"]);
    assert_domain_laws!(WorkOrderStatus, ["open", "in-progress", "closed"]);
}

#[test]
fn test_labels_are_unique_within_each_domain() {
    fn unique(labels: Vec<&str>) -> bool {
        let mut sorted = labels.clone();
        sorted.sort();
        sorted.dedup();
        sorted.len() == labels.len()
    }
    assert!(unique(EquipmentStatus::ALL.iter().map(|v| v.label()).collect()));
    assert!(unique(TicketStatus::ALL.iter().map(|v| v.label()).collect()));
    assert!(unique(WorkOrderStatus::ALL.iter().map(|v| v.label()).collect()));
    assert!(unique(MaintenanceStatus::ALL.iter().map(|v| v.label()).collect()));
}
