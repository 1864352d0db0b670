use crate::vector::EmployeeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-generated time entry identifier.
pub type EntryId = u64;

/// One shift. `clock_out == None` means the shift is still open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: EntryId,
    pub employee_id: EmployeeId,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
}

impl TimeEntry {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

/// Current shift state of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockStatus {
    pub is_clocked_in: bool,
    pub clock_in_time: Option<DateTime<Utc>>,
}

impl ClockStatus {
    pub fn clocked_out() -> Self {
        ClockStatus {
            is_clocked_in: false,
            clock_in_time: None,
        }
    }
}

impl From<Option<&TimeEntry>> for ClockStatus {
    fn from(open_entry: Option<&TimeEntry>) -> Self {
        match open_entry {
            Some(entry) => ClockStatus {
                is_clocked_in: true,
                clock_in_time: Some(entry.clock_in),
            },
            None => ClockStatus::clocked_out(),
        }
    }
}
