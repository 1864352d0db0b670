use super::TimeEntryStore;
use crate::error::{CoreError, CoreResult};
use crate::timesheet::{EntryId, TimeEntry};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug)]
struct EntryTable {
    entries: Vec<TimeEntry>,
    next_id: EntryId,
}

/// Time-entry store held in memory.
///
/// The open-entry check and the insert happen under one write lock, which is
/// what makes "one open entry per employee" hold under concurrent clock-ins.
#[derive(Debug)]
pub struct InMemoryTimeEntryStore {
    table: RwLock<EntryTable>,
}

impl Default for InMemoryTimeEntryStore {
    fn default() -> Self {
        InMemoryTimeEntryStore {
            table: RwLock::new(EntryTable {
                entries: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryTimeEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from previously saved entries. Ids continue after the
    /// highest saved id.
    ///
    /// Duplicate ids or two open entries for one employee yield `StoreFailure`.
    pub fn from_entries(entries: Vec<TimeEntry>) -> CoreResult<Self> {
        {
            let mut ids = HashSet::with_capacity(entries.len());
            let mut open_for = HashSet::new();
            for entry in &entries {
                if !ids.insert(entry.id) {
                    return Err(CoreError::StoreFailure(format!(
                        "Duplicate time entry id {} in saved entries",
                        entry.id
                    )));
                }
                if entry.is_open() && !open_for.insert(entry.employee_id.as_str()) {
                    return Err(CoreError::StoreFailure(format!(
                        "Employee '{}' has more than one open time entry in saved entries",
                        entry.employee_id
                    )));
                }
            }
        }
        let next_id = entries.iter().map(|e| e.id).max().map_or(1, |max| max + 1);
        Ok(InMemoryTimeEntryStore {
            table: RwLock::new(EntryTable { entries, next_id }),
        })
    }

    /// Copy of every entry in creation order.
    pub fn snapshot(&self) -> Vec<TimeEntry> {
        self.table.read().entries.clone()
    }
}

impl TimeEntryStore for InMemoryTimeEntryStore {
    fn get_open_entry(&self, employee_id: &str) -> CoreResult<Option<TimeEntry>> {
        Ok(self
            .table
            .read()
            .entries
            .iter()
            .find(|e| e.employee_id == employee_id && e.is_open())
            .cloned())
    }

    fn create_entry(&self, employee_id: &str) -> CoreResult<TimeEntry> {
        let mut table = self.table.write();
        if table.entries.iter().any(|e| e.employee_id == employee_id && e.is_open()) {
            return Err(CoreError::AlreadyClockedIn(employee_id.to_string()));
        }
        let entry = TimeEntry {
            id: table.next_id,
            employee_id: employee_id.to_string(),
            clock_in: Utc::now(),
            clock_out: None,
        };
        table.next_id += 1;
        table.entries.push(entry.clone());
        debug!(employee_id, entry_id = entry.id, clock_in = %entry.clock_in, "Time entry created");
        Ok(entry)
    }

    fn close_entry(&self, entry: &TimeEntry) -> CoreResult<TimeEntry> {
        let mut table = self.table.write();
        let stored = table
            .entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| CoreError::NotFound(format!("time entry {}", entry.id)))?;
        if !stored.is_open() {
            return Err(CoreError::NotClockedIn(stored.employee_id.clone()));
        }
        // Never earlier than clock_in, even if the wall clock stepped back.
        stored.clock_out = Some(Utc::now().max(stored.clock_in));
        debug!(employee_id = %stored.employee_id, entry_id = stored.id, "Time entry closed");
        Ok(stored.clone())
    }

    fn entries_for(&self, employee_id: &str) -> CoreResult<Vec<TimeEntry>> {
        Ok(self
            .table
            .read()
            .entries
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .cloned()
            .collect())
    }
}
