use std::rc::Rc;

use async_trait::async_trait;
use common::model::token::ScanToken;
use thiserror::Error;

/// Callback invoked with every recognised code.
///
/// The workflow creates one value of this type and hands the same `Rc` to
/// every `start`/`restart`, so a decoder can tell a restart from a new
/// registration.
pub type DecodeCallback = Rc<dyn Fn(ScanToken)>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderError {
    #[error("scanner could not start: {0}")]
    Start(String),
    #[error("scanner could not stop: {0}")]
    Stop(String),
}

/// Continuous camera decoder bound to one render target.
#[async_trait(?Send)]
pub trait ScanDecoder {
    /// Begins capture. `on_decode` fires for each recognised code until stopped.
    async fn start(&self, on_decode: DecodeCallback) -> Result<(), DecoderError>;

    /// Halts capture. Stopping a stopped decoder succeeds.
    async fn stop(&self) -> Result<(), DecoderError>;

    /// `stop` followed by `start` with the same callback.
    async fn restart(&self, on_decode: DecodeCallback) -> Result<(), DecoderError> {
        self.stop().await?;
        self.start(on_decode).await
    }
}
