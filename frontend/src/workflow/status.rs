use std::fmt;

/// Where the scan cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    AwaitingReadiness,
    Scanning,
    Submitting,
    Succeeded,
    ExpiredRetrying,
    Failed,
    TornDown,
}

/// Status line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowStatus {
    Idle,
    Processing,
    Succeeded(String),
    ExpiredRetrying,
    /// A code was read before the first position fix.
    LocationRequired,
    Failed(String),
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStatus::Idle => f.write_str("Ready to scan"),
            WorkflowStatus::Processing => f.write_str("Processing..."),
            WorkflowStatus::Succeeded(message) => write!(f, "Done! {}", message),
            WorkflowStatus::ExpiredRetrying => {
                f.write_str("QR code expired, scan the new code")
            }
            WorkflowStatus::LocationRequired => {
                f.write_str("GPS is not active yet! Make sure location permission is granted.")
            }
            WorkflowStatus::Failed(detail) => write!(f, "Failed! {}", detail),
        }
    }
}
