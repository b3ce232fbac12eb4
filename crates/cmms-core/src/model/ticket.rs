use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::{Priority, TicketStatus};
use crate::errors::{require_patch_text, require_text, Result};

pub const TICKET_NUMBER_PREFIX: &str = "TKT";

/// An incident reported against a piece of equipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    /// Display number, `TKT-<year>-<NNN>`
    pub number: String,
    pub subject: String,
    pub description: String,
    pub equipment_id: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub opened_date: NaiveDate,
    pub resolved_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub equipment_id: String,
    pub priority: Priority,
}

impl NewTicket {
    pub fn validate(&self) -> Result<()> {
        require_text("ticket", "subject", &self.subject)?;
        require_text("ticket", "equipment_id", &self.equipment_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketPatch {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub equipment_id: Option<String>,
    pub priority: Option<Priority>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.description.is_none()
            && self.equipment_id.is_none()
            && self.priority.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        require_patch_text("ticket", "subject", self.subject.as_deref())?;
        require_patch_text("ticket", "equipment_id", self.equipment_id.as_deref())
    }
}

/// Prefix shared by every ticket number of a year, e.g. `TKT-2024-`
pub fn ticket_number_prefix(year: i32) -> String {
    format!("{}-{}-", TICKET_NUMBER_PREFIX, year)
}

pub fn format_ticket_number(year: i32, sequence: u64) -> String {
    format!("{}{:03}", ticket_number_prefix(year), sequence)
}

/// Sequence part of a ticket number, if it belongs to `year`
pub fn ticket_sequence(number: &str, year: i32) -> Option<u64> {
    number
        .strip_prefix(&ticket_number_prefix(year))
        .and_then(|seq| seq.parse().ok())
}

/// Next display number for `year` given the numbers already issued
///
/// Numbers are derived from the highest sequence already used in that year,
/// so they keep increasing after deletions and restart at 001 each year.
pub fn next_ticket_number<'a, I>(existing: I, year: i32) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let highest = existing
        .into_iter()
        .filter_map(|n| ticket_sequence(n, year))
        .max()
        .unwrap_or(0);
    format_ticket_number(year, highest.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_largest_sequence_does_not_overflow() {
        let existing = ["TKT-2026-4294967295"];
        assert_eq!(next_ticket_number(existing, 2026), "TKT-2026-4294967296");

        let existing = ["TKT-2026-18446744073709551615"];
        assert_eq!(
            next_ticket_number(existing, 2026),
            "TKT-2026-18446744073709551615"
        );
    }

    #[test]
    fn test_first_number_of_year() {
        assert_eq!(next_ticket_number(Vec::<&str>::new(), 2024), "TKT-2024-001");
    }

    #[test]
    fn test_previous_years_do_not_count() {
        let existing = ["TKT-2024-001", "TKT-2024-002", "TKT-2024-003"];
        assert_eq!(next_ticket_number(existing, 2025), "TKT-2025-001");
    }

    #[test]
    fn test_gaps_from_deletions_do_not_reuse_numbers() {
        let existing = ["TKT-2024-001", "TKT-2024-007"];
        assert_eq!(next_ticket_number(existing, 2024), "TKT-2024-008");
    }

    #[test]
    fn test_sequence_beyond_three_digits() {
        assert_eq!(format_ticket_number(2024, 1000), "TKT-2024-1000");
        assert_eq!(ticket_sequence("TKT-2024-1000", 2024), Some(1000));
        assert_eq!(ticket_sequence("TKT-2024-abc", 2024), None);
    }
}
