use common::model::device::DeviceFingerprint;
use common::model::employee::EmployeeId;

use crate::session::location::LocationState;
use crate::workflow::status::WorkflowStatus;

#[derive(Clone)]
pub enum Msg {
    IdentityResolved(Option<DeviceFingerprint>),
    LocationChanged(LocationState),
    StatusChanged(WorkflowStatus),
    RefreshLocation,
    SelectEmployee(EmployeeId),
    ScannerStarted(bool),
}
