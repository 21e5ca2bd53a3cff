use async_trait::async_trait;
use common::outcome::{classify_response, AttendanceOutcome, FailureDetail};
use common::requests::AttendanceRequest;
use gloo_net::http::Request;
use log::{debug, error, warn};
use thiserror::Error;

use crate::workflow::submitter::AttendanceSubmitter;

/// The request could not be turned into an HTTP call; nothing was sent.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("payload could not be serialized: {0}")]
    Encode(String),
}

impl From<RequestError> for AttendanceOutcome {
    fn from(err: RequestError) -> Self {
        AttendanceOutcome::Failure(FailureDetail::Request(err.to_string()))
    }
}

/// Posts attendance requests to the configured endpoint with `gloo-net`.
pub struct HttpSubmitter {
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl AttendanceSubmitter for HttpSubmitter {
    async fn submit(&self, request: &AttendanceRequest) -> AttendanceOutcome {
        let builder = match Request::post(&self.endpoint)
            .header("Accept", "application/json")
            .json(request)
        {
            Ok(builder) => builder,
            Err(err) => {
                let err = RequestError::Encode(err.to_string());
                error!("attendance request not sent: {}", err);
                return err.into();
            }
        };

        match builder.send().await {
            Ok(response) => {
                let status = response.status();
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(err) => {
                        warn!("could not read response body (HTTP {}): {}", status, err);
                        String::new()
                    }
                };
                debug!("attendance endpoint answered {}: {}", status, body);
                classify_response(status, &body)
            }
            Err(err) => {
                error!("attendance endpoint unreachable: {}", err);
                AttendanceOutcome::connection_failure(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_error_is_a_request_failure_not_a_connection_failure() {
        let err = RequestError::Encode("key must be a string".into());
        let outcome = AttendanceOutcome::from(err);
        match outcome {
            AttendanceOutcome::Failure(FailureDetail::Request(reason)) => {
                assert!(reason.contains("key must be a string"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn request_failure_text_names_the_build_step() {
        let outcome: AttendanceOutcome = RequestError::Encode("bad float".into()).into();
        let AttendanceOutcome::Failure(detail) = outcome else {
            panic!("expected a failure");
        };
        let text = detail.to_string();
        assert!(text.starts_with("Request could not be built"));
        assert!(!text.contains("Could not reach"));
    }
}
