//! Store contracts the workflows depend on, plus in-memory implementations.
//!
//! The traits are synchronous: every call either completes or returns a
//! `CoreError`, with I/O problems reported as `CoreError::StoreFailure`.

use crate::employee::{Employee, EmployeeRecord, EmployeeUpdate};
use crate::error::CoreResult;
use crate::timesheet::TimeEntry;

pub mod memory_directory;
pub mod memory_time_entries;

pub use memory_directory::InMemoryDirectory;
pub use memory_time_entries::InMemoryTimeEntryStore;

/// Persistent set of employee records keyed by `employee_id`.
pub trait EmployeeDirectory: Send + Sync + std::fmt::Debug {
    /// Inserts a new record. A taken `employee_id` is `AlreadyExists` and
    /// leaves the existing record untouched.
    fn create(&self, record: EmployeeRecord) -> CoreResult<Employee>;

    /// Fetches one record, `NotFound` if absent.
    fn get_by_id(&self, employee_id: &str) -> CoreResult<Employee>;

    /// All records in a stable order (insertion order for the in-memory store).
    fn get_all(&self) -> CoreResult<Vec<Employee>>;

    /// Records whose name or id starts with `prefix`, ignoring case.
    fn search_by_prefix(&self, prefix: &str) -> CoreResult<Vec<Employee>>;

    /// Replaces the fields present in `update`. `NotFound` if absent.
    fn update(&self, employee_id: &str, update: EmployeeUpdate) -> CoreResult<Employee>;

    /// Removes a record. `NotFound` if absent.
    fn delete(&self, employee_id: &str) -> CoreResult<()>;
}

/// Persistent set of time entries.
///
/// Implementations must enforce "at most one open entry per employee" in
/// `create_entry` itself, so concurrent clock-ins cannot both succeed.
pub trait TimeEntryStore: Send + Sync + std::fmt::Debug {
    /// The employee's open entry, if any.
    fn get_open_entry(&self, employee_id: &str) -> CoreResult<Option<TimeEntry>>;

    /// Opens a new entry stamped with the current server time.
    fn create_entry(&self, employee_id: &str) -> CoreResult<TimeEntry>;

    /// Stamps `clock_out` on an open entry and returns the updated entry.
    fn close_entry(&self, entry: &TimeEntry) -> CoreResult<TimeEntry>;

    /// Every entry of the employee, oldest first.
    fn entries_for(&self, employee_id: &str) -> CoreResult<Vec<TimeEntry>>;
}
