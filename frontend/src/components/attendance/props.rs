//! Properties for the `AttendanceScanner` component.

use common::model::employee::{EmployeeId, DEFAULT_EMPLOYEE};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AttendanceScannerProps {
    /// Employee preselected in the roster dropdown when the scanner mounts.
    ///
    /// Changing the selection later only affects scans decoded after the
    /// change.
    #[prop_or(DEFAULT_EMPLOYEE)]
    pub initial_employee: EmployeeId,
}
