//! Employee lookup at the start of a payslip session.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeProfile;

/// Supplies employee profiles to the editor.
pub trait EmployeeDirectory {
    /// Looks up an employee by identifier.
    fn find(&self, id: &str) -> EngineResult<EmployeeProfile>;
}

/// An employee directory held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: HashMap<String, EmployeeProfile>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn insert(&mut self, employee: EmployeeProfile) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Number of employees held.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true when the directory holds no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl FromIterator<EmployeeProfile> for InMemoryEmployeeDirectory {
    fn from_iter<I: IntoIterator<Item = EmployeeProfile>>(iter: I) -> Self {
        let mut directory = Self::new();
        for employee in iter {
            directory.insert(employee);
        }
        directory
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn find(&self, id: &str) -> EngineResult<EmployeeProfile> {
        self.employees
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }
}
