use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque text decoded from a rotating QR code.
///
/// Validity is enforced by the attendance server only. A token is consumed by
/// at most one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanToken(String);

impl ScanToken {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl From<String> for ScanToken {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for ScanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
