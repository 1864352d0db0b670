//! Clock-in / clock-out state machine.
//!
//! An employee is either clocked out (no open entry) or clocked in (exactly
//! one open entry). Timestamps always come from the server clock.

use crate::error::{CoreError, CoreResult};
use crate::storage::TimeEntryStore;
use crate::timesheet::{ClockStatus, TimeEntry};
use tracing::{info, warn};

/// Opens a shift. `AlreadyClockedIn` if one is already open.
pub fn clock_in(store: &dyn TimeEntryStore, employee_id: &str) -> CoreResult<TimeEntry> {
    if let Some(open) = store.get_open_entry(employee_id)? {
        warn!(employee_id, entry_id = open.id, "Clock-in rejected: shift already open");
        return Err(CoreError::AlreadyClockedIn(employee_id.to_string()));
    }
    // The store re-checks under its own lock; a racing clock-in fails there.
    let entry = store.create_entry(employee_id)?;
    info!(employee_id, entry_id = entry.id, clock_in = %entry.clock_in, "Clocked in");
    Ok(entry)
}

/// Closes the open shift. `NotClockedIn` if there is none.
pub fn clock_out(store: &dyn TimeEntryStore, employee_id: &str) -> CoreResult<TimeEntry> {
    let open = match store.get_open_entry(employee_id)? {
        Some(open) => open,
        None => {
            warn!(employee_id, "Clock-out rejected: no open shift");
            return Err(CoreError::NotClockedIn(employee_id.to_string()));
        }
    };
    let closed = store.close_entry(&open)?;
    info!(employee_id, entry_id = closed.id, clock_out = ?closed.clock_out, "Clocked out");
    Ok(closed)
}

/// Current state. Unknown employees simply report as clocked out.
pub fn clock_status(store: &dyn TimeEntryStore, employee_id: &str) -> CoreResult<ClockStatus> {
    let open = store.get_open_entry(employee_id)?;
    Ok(ClockStatus::from(open.as_ref()))
}

/// Every shift of the employee, oldest first.
pub fn shift_history(store: &dyn TimeEntryStore, employee_id: &str) -> CoreResult<Vec<TimeEntry>> {
    store.entries_for(employee_id)
}
