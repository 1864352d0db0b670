use super::EmployeeDirectory;
use crate::employee::{Employee, EmployeeRecord, EmployeeUpdate};
use crate::error::{CoreError, CoreResult};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::debug;

/// Employee directory held in memory.
///
/// Records are kept in insertion order, which is the order `get_all` and
/// `search_by_prefix` return them in.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    employees: RwLock<Vec<Employee>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a directory from previously saved records.
    ///
    /// Duplicate ids mean the snapshot is corrupt and yield `StoreFailure`.
    pub fn from_employees(employees: Vec<Employee>) -> CoreResult<Self> {
        {
            let mut seen = HashSet::with_capacity(employees.len());
            for employee in &employees {
                if !seen.insert(employee.employee_id.as_str()) {
                    return Err(CoreError::StoreFailure(format!(
                        "Duplicate employee_id '{}' in saved directory",
                        employee.employee_id
                    )));
                }
            }
        }
        Ok(InMemoryDirectory {
            employees: RwLock::new(employees),
        })
    }

    /// Copy of every record, in directory order.
    pub fn snapshot(&self) -> Vec<Employee> {
        self.employees.read().clone()
    }

    pub fn len(&self) -> usize {
        self.employees.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.read().is_empty()
    }
}

fn starts_with_ignore_case(value: &str, prefix_lower: &str) -> bool {
    value.to_lowercase().starts_with(prefix_lower)
}

impl EmployeeDirectory for InMemoryDirectory {
    fn create(&self, record: EmployeeRecord) -> CoreResult<Employee> {
        let mut employees = self.employees.write();
        if employees.iter().any(|e| e.employee_id == record.employee_id) {
            return Err(CoreError::AlreadyExists(record.employee_id));
        }
        let now = Utc::now();
        let employee = Employee {
            employee_id: record.employee_id,
            name: record.name,
            embedding: record.embedding,
            role: record.role,
            created_at: now,
            updated_at: now,
        };
        employees.push(employee.clone());
        debug!(employee_id = %employee.employee_id, total = employees.len(), "Employee inserted");
        Ok(employee)
    }

    fn get_by_id(&self, employee_id: &str) -> CoreResult<Employee> {
        self.employees
            .read()
            .iter()
            .find(|e| e.employee_id == employee_id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(employee_id.to_string()))
    }

    fn get_all(&self) -> CoreResult<Vec<Employee>> {
        Ok(self.snapshot())
    }

    fn search_by_prefix(&self, prefix: &str) -> CoreResult<Vec<Employee>> {
        let prefix_lower = prefix.to_lowercase();
        Ok(self
            .employees
            .read()
            .iter()
            .filter(|e| {
                starts_with_ignore_case(&e.name, &prefix_lower)
                    || starts_with_ignore_case(&e.employee_id, &prefix_lower)
            })
            .cloned()
            .collect())
    }

    fn update(&self, employee_id: &str, update: EmployeeUpdate) -> CoreResult<Employee> {
        let mut employees = self.employees.write();
        let employee = employees
            .iter_mut()
            .find(|e| e.employee_id == employee_id)
            .ok_or_else(|| CoreError::NotFound(employee_id.to_string()))?;

        if let Some(name) = update.name {
            employee.name = name;
        }
        if let Some(role) = update.role {
            employee.role = role;
        }
        if let Some(embedding) = update.embedding {
            employee.embedding = embedding;
        }
        employee.updated_at = Utc::now();
        debug!(employee_id, "Employee updated");
        Ok(employee.clone())
    }

    fn delete(&self, employee_id: &str) -> CoreResult<()> {
        let mut employees = self.employees.write();
        let position = employees
            .iter()
            .position(|e| e.employee_id == employee_id)
            .ok_or_else(|| CoreError::NotFound(employee_id.to_string()))?;
        // Remaining records keep their relative order.
        employees.remove(position);
        debug!(employee_id, remaining = employees.len(), "Employee deleted");
        Ok(())
    }
}
