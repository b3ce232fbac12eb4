//! Record key generation
//!
//! Keys are `<prefix>-<uuid v4>`. The prefix keeps keys readable in dumps and
//! matches the shape of the seeded rows (`eq-001`, `tkt-001`, ...).

use uuid::Uuid;

pub const EQUIPMENT_PREFIX: &str = "eq";
pub const TICKET_PREFIX: &str = "tkt";
pub const DOWNTIME_PREFIX: &str = "dt";
pub const MAINTENANCE_PREFIX: &str = "mt";
pub const WORK_ORDER_PREFIX: &str = "wo";
pub const SPARE_PART_PREFIX: &str = "sp";
pub const TECHNICIAN_PREFIX: &str = "tech";

/// Generate a fresh random key with the given prefix
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_has_prefix() {
        let id = new_id(EQUIPMENT_PREFIX);
        assert!(id.starts_with("eq-"));
        assert_eq!(id.len(), "eq-".len() + 36);
    }

    #[test]
    fn test_rapid_ids_do_not_collide() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id(TICKET_PREFIX)).collect();
        assert_eq!(ids.len(), 1000);
    }
}
