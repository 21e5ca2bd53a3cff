//! Interpretation of the attendance endpoint's responses.
//!
//! The server signals an expired QR token only through the text of the
//! `message` field, so expiry detection is an exact comparison against
//! [`EXPIRED_TOKEN_MESSAGE`]. Every other non-2xx answer is a failure whose
//! body is kept verbatim for diagnosis.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Message the server returns when the scanned token has already rotated.
pub const EXPIRED_TOKEN_MESSAGE: &str = "QR Expired, please rescan.";

/// Shown when a 2xx response carries no `message` field.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Attendance recorded.";

/// `{ "message": ... }` body used by the server for both success and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    pub message: String,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceOutcome {
    Success(String),
    Expired,
    Failure(FailureDetail),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailureDetail {
    /// The server answered with an error; `payload` is its body, pretty-printed
    /// when it was JSON.
    Server { status: u16, payload: String },
    /// No response was received at all.
    Connection(String),
    /// The request never left the client because it could not be built.
    Request(String),
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureDetail::Server { status, payload } => {
                write!(f, "Server response (HTTP {}):\n{}", status, payload)
            }
            FailureDetail::Connection(reason) => {
                write!(f, "Could not reach the attendance server: {}", reason)
            }
            FailureDetail::Request(reason) => {
                write!(f, "Request could not be built: {}", reason)
            }
        }
    }
}

impl AttendanceOutcome {
    /// Outcome for a request that never produced a response.
    pub fn connection_failure(reason: impl Into<String>) -> Self {
        AttendanceOutcome::Failure(FailureDetail::Connection(reason.into()))
    }
}

/// Maps an HTTP status and raw body to an [`AttendanceOutcome`].
pub fn classify_response(status: u16, body: &str) -> AttendanceOutcome {
    let message = serde_json::from_str::<ServerMessage>(body)
        .ok()
        .map(|parsed| parsed.message);

    if (200..300).contains(&status) {
        let text = message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
        return AttendanceOutcome::Success(text);
    }

    if message.as_deref() == Some(EXPIRED_TOKEN_MESSAGE) {
        return AttendanceOutcome::Expired;
    }

    let payload = match serde_json::from_str::<Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    };
    AttendanceOutcome::Failure(FailureDetail::Server { status, payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_uses_server_message() {
        let outcome = classify_response(200, r#"{"message":"Checked in"}"#);
        assert_eq!(outcome, AttendanceOutcome::Success("Checked in".into()));
    }

    #[test]
    fn success_without_message_gets_default_text() {
        let outcome = classify_response(201, "");
        assert_eq!(
            outcome,
            AttendanceOutcome::Success(DEFAULT_SUCCESS_MESSAGE.into())
        );
    }

    #[test]
    fn exact_expiry_message_is_expired() {
        let body = format!(r#"{{"message":"{}"}}"#, EXPIRED_TOKEN_MESSAGE);
        assert_eq!(classify_response(400, &body), AttendanceOutcome::Expired);
        assert_eq!(classify_response(422, &body), AttendanceOutcome::Expired);
    }

    #[test]
    fn near_miss_expiry_text_is_a_server_failure() {
        let outcome = classify_response(400, r#"{"message":"QR expired, please rescan"}"#);
        assert!(matches!(
            outcome,
            AttendanceOutcome::Failure(FailureDetail::Server { status: 400, .. })
        ));
    }

    #[test]
    fn validation_error_keeps_full_payload() {
        let body = r#"{"message":"The given data was invalid.","errors":{"lat":["required"]}}"#;
        match classify_response(422, body) {
            AttendanceOutcome::Failure(FailureDetail::Server { status, payload }) => {
                assert_eq!(status, 422);
                assert!(payload.contains("The given data was invalid."));
                assert!(payload.contains("\"lat\""));
                assert!(payload.contains("required"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn non_json_error_body_is_kept_raw() {
        match classify_response(502, "Bad Gateway") {
            AttendanceOutcome::Failure(FailureDetail::Server { payload, .. }) => {
                assert_eq!(payload, "Bad Gateway");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn connection_failure_display_has_no_payload() {
        let detail = FailureDetail::Connection("NetworkError".into());
        let text = detail.to_string();
        assert!(text.starts_with("Could not reach the attendance server"));
        assert!(!text.contains("HTTP"));
    }

    #[test]
    fn request_failure_names_the_build_step() {
        let detail = FailureDetail::Request("key must be a string".into());
        assert_eq!(
            detail.to_string(),
            "Request could not be built: key must be a string"
        );
    }

    #[test]
    fn message_field_of_wrong_type_is_not_a_message() {
        let outcome = classify_response(200, r#"{"message":42}"#);
        assert_eq!(
            outcome,
            AttendanceOutcome::Success(DEFAULT_SUCCESS_MESSAGE.into())
        );
    }
}
