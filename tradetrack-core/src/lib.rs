pub mod clock;
pub mod config;
pub mod employee;
pub mod error;
pub mod lookup;
pub mod matcher;
pub mod registration;
pub mod similarity;
pub mod storage;
pub mod timesheet;
pub mod vector;
pub mod verification;


// Re-export key types for the server crate
pub use config::MatchConfig;
pub use employee::{Employee, EmployeeUpdate, EmployeeView, MatchResult, NewEmployee, Role};
pub use error::{CoreError, CoreResult};
pub use storage::{EmployeeDirectory, InMemoryDirectory, InMemoryTimeEntryStore, TimeEntryStore};
pub use timesheet::{ClockStatus, EntryId, TimeEntry};
pub use vector::{Embedding, EmployeeId};
