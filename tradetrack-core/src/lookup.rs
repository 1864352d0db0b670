//! Read-only employee queries. Results never carry embeddings.

use crate::employee::EmployeeView;
use crate::error::CoreResult;
use crate::storage::EmployeeDirectory;
use tracing::debug;

pub fn get_employee(directory: &dyn EmployeeDirectory, employee_id: &str) -> CoreResult<EmployeeView> {
    directory.get_by_id(employee_id).map(|e| e.view())
}

pub fn list_employees(directory: &dyn EmployeeDirectory) -> CoreResult<Vec<EmployeeView>> {
    Ok(directory.get_all()?.iter().map(|e| e.view()).collect())
}

/// Employees whose name or id starts with `prefix`, ignoring case.
pub fn search_employees(directory: &dyn EmployeeDirectory, prefix: &str) -> CoreResult<Vec<EmployeeView>> {
    let found: Vec<EmployeeView> = directory.search_by_prefix(prefix)?.iter().map(|e| e.view()).collect();
    debug!(prefix, hits = found.len(), "Employee search");
    Ok(found)
}
