//! Registration and maintenance of employee records.

use crate::config::MatchConfig;
use crate::employee::{EmployeeRecord, EmployeeUpdate, EmployeeView, NewEmployee};
use crate::error::{CoreError, CoreResult};
use crate::matcher::prepare_input;
use crate::storage::EmployeeDirectory;
use crate::vector::Embedding;
use tracing::{info, warn};

fn normalized(raw: &Embedding, config: &MatchConfig) -> CoreResult<Embedding> {
    prepare_input(raw.view(), config).map(Embedding::from)
}

/// Registers a new employee.
///
/// The embedding is length-checked and L2-normalized before storage, and the
/// role defaults to [`crate::employee::Role::Employee`]. Registering an id
/// that is already taken fails with `AlreadyExists` and leaves the existing
/// record as it was.
pub fn register_employee(
    directory: &dyn EmployeeDirectory,
    input: NewEmployee,
    config: &MatchConfig,
) -> CoreResult<EmployeeView> {
    config.validate()?;
    info!(employee_id = %input.employee_id, "Registering employee");

    let embedding = normalized(&input.embedding, config).map_err(|e| {
        warn!(employee_id = %input.employee_id, error = %e, "Registration rejected: bad embedding");
        e
    })?;
    let record = EmployeeRecord {
        employee_id: input.employee_id,
        name: input.name,
        embedding,
        role: input.role.unwrap_or_default(),
    };

    match directory.create(record) {
        Ok(employee) => {
            info!(employee_id = %employee.employee_id, role = %employee.role, "Employee registered");
            Ok(employee.view())
        }
        Err(CoreError::AlreadyExists(employee_id)) => {
            warn!(employee_id = %employee_id, "Registration rejected: employee already exists");
            Err(CoreError::AlreadyExists(employee_id))
        }
        Err(e) => Err(e),
    }
}

/// Applies a partial update. A replacement embedding goes through the same
/// checks and normalization as at registration.
pub fn update_employee(
    directory: &dyn EmployeeDirectory,
    employee_id: &str,
    update: EmployeeUpdate,
    config: &MatchConfig,
) -> CoreResult<EmployeeView> {
    config.validate()?;
    info!(employee_id, "Updating employee");

    let embedding = match update.embedding {
        Some(raw) => Some(normalized(&raw, config)?),
        None => None,
    };
    let update = EmployeeUpdate { embedding, ..update };

    let employee = directory.update(employee_id, update)?;
    Ok(employee.view())
}

/// Deletes an employee record. Time entries are left in place.
pub fn remove_employee(directory: &dyn EmployeeDirectory, employee_id: &str) -> CoreResult<()> {
    directory.delete(employee_id)?;
    info!(employee_id, "Employee removed");
    Ok(())
}
