use async_trait::async_trait;
use common::outcome::AttendanceOutcome;
use common::requests::AttendanceRequest;

/// Sends one attendance request and interprets the answer.
///
/// Implementations make exactly one network call per invocation and never
/// retry; transport errors come back as `AttendanceOutcome::Failure`.
#[async_trait(?Send)]
pub trait AttendanceSubmitter {
    async fn submit(&self, request: &AttendanceRequest) -> AttendanceOutcome;
}
