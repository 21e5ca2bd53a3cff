use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric employee selector sent as `employee_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entry of the selectable roster shown above the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub label: &'static str,
}

/// Fixed roster used to pick whose attendance a scan records.
pub static ROSTER: [Employee; 3] = [
    Employee {
        id: EmployeeId(2),
        label: "Budi (morning)",
    },
    Employee {
        id: EmployeeId(3),
        label: "Siti (afternoon)",
    },
    Employee {
        id: EmployeeId(4),
        label: "Maulana (night)",
    },
];

/// Employee selected when the widget mounts.
pub const DEFAULT_EMPLOYEE: EmployeeId = EmployeeId(2);

/// Looks up a roster entry by its numeric id.
pub fn find_employee(id: EmployeeId) -> Option<&'static Employee> {
    ROSTER.iter().find(|employee| employee.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_employee_is_on_the_roster() {
        assert!(find_employee(DEFAULT_EMPLOYEE).is_some());
    }

    #[test]
    fn unknown_employee_is_not_found() {
        assert!(find_employee(EmployeeId(99)).is_none());
    }
}
