use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::status::DowntimeStatus;
use crate::errors::{require_text, Result};

/// A period during which equipment was unavailable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Downtime {
    pub id: String,
    pub equipment_id: String,
    pub reason: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub status: DowntimeStatus,
}

impl Downtime {
    /// Elapsed time; ongoing downtimes are measured up to `now`
    pub fn duration(&self, now: NaiveDateTime) -> chrono::Duration {
        let end = self.end.unwrap_or(now);
        (end - self.start).max(chrono::Duration::zero())
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == DowntimeStatus::Ongoing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDowntime {
    pub equipment_id: String,
    pub reason: String,
    pub start: NaiveDateTime,
}

impl NewDowntime {
    pub fn validate(&self) -> Result<()> {
        require_text("downtime", "equipment_id", &self.equipment_id)?;
        require_text("downtime", "reason", &self.reason)
    }
}

/// End stamp for a resolution at `now`, never earlier than the start
pub fn resolution_end(start: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
    now.max(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 18)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_duration_of_resolved_downtime() {
        let dt = Downtime {
            id: "dt-1".to_string(),
            equipment_id: "eq-1".to_string(),
            reason: "Refroidissement".to_string(),
            start: at(10, 0),
            end: Some(at(12, 30)),
            status: DowntimeStatus::Resolved,
        };
        assert_eq!(dt.duration(at(23, 0)), chrono::Duration::minutes(150));
    }

    #[test]
    fn test_duration_of_ongoing_downtime_uses_now() {
        let dt = Downtime {
            id: "dt-1".to_string(),
            equipment_id: "eq-1".to_string(),
            reason: "Refroidissement".to_string(),
            start: at(10, 0),
            end: None,
            status: DowntimeStatus::Ongoing,
        };
        assert!(dt.is_ongoing());
        assert_eq!(dt.duration(at(11, 15)), chrono::Duration::minutes(75));
    }

    #[test]
    fn test_resolution_end_never_precedes_start() {
        assert_eq!(resolution_end(at(12, 0), at(9, 0)), at(12, 0));
        assert_eq!(resolution_end(at(9, 0), at(12, 0)), at(12, 0));
    }
}
