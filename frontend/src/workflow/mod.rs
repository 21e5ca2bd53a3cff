//! Scan-to-submission workflow.
//!
//! The workflow owns the decoder and the submitter and drives one scan cycle:
//!
//! ```text
//! AwaitingReadiness -> Scanning -> Submitting -> Succeeded
//!                        ^             |------> Failed
//!                        |             v
//!                        +------ ExpiredRetrying
//! ```
//!
//! Responsibilities
//! - Start the decoder only once the device identity has resolved and the
//!   render target exists.
//! - On a decoded token, close the stop boundary synchronously, stop the
//!   decoder, then submit. Decodes after the boundary are ignored, which keeps
//!   at most one request in flight without any lock.
//! - Restart the decoder automatically only when the server reports the token
//!   as expired, or when a code was read before the first location fix.
//! - Leave the decoder stopped after success or failure.
//!
//! Everything here is single-threaded: state lives in `Cell`/`RefCell` behind
//! an `Rc`, and background work goes through the injected [`Spawner`].

pub mod decoder;
pub mod status;
pub mod submitter;


use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use common::model::employee::EmployeeId;
use common::model::token::ScanToken;
use common::outcome::AttendanceOutcome;
use common::requests::AttendanceRequest;
use futures::future::LocalBoxFuture;
use log::{debug, error, info, warn};

use crate::session::SessionContext;
use decoder::{DecodeCallback, DecoderError, ScanDecoder};
use status::{ScanPhase, WorkflowStatus};
use submitter::AttendanceSubmitter;

/// Runs a future to completion on the hosting event loop.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Notified after every status change.
pub type StatusObserver = Rc<dyn Fn(&WorkflowStatus)>;

/// Handle to the workflow; clones share the same state.
#[derive(Clone)]
pub struct ScanWorkflow {
    inner: Rc<Inner>,
}

struct Inner {
    session: Rc<SessionContext>,
    decoder: Rc<dyn ScanDecoder>,
    submitter: Rc<dyn AttendanceSubmitter>,
    spawn: Spawner,
    on_decode: DecodeCallback,
    employee: Cell<EmployeeId>,
    phase: Cell<ScanPhase>,
    status: RefCell<WorkflowStatus>,
    stop_requested: Cell<bool>,
    target_ready: Cell<bool>,
    observer: RefCell<Option<StatusObserver>>,
}

impl ScanWorkflow {
    pub fn new(
        session: Rc<SessionContext>,
        decoder: Rc<dyn ScanDecoder>,
        submitter: Rc<dyn AttendanceSubmitter>,
        spawn: Spawner,
        employee: EmployeeId,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let weak = weak.clone();
            let on_decode: DecodeCallback = Rc::new(move |token: ScanToken| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_decode(token);
                }
            });

            Inner {
                session,
                decoder,
                submitter,
                spawn,
                on_decode,
                employee: Cell::new(employee),
                phase: Cell::new(ScanPhase::AwaitingReadiness),
                status: RefCell::new(WorkflowStatus::Idle),
                stop_requested: Cell::new(false),
                target_ready: Cell::new(false),
                observer: RefCell::new(None),
            }
        });

        Self { inner }
    }

    pub fn set_status_observer(&self, observer: StatusObserver) {
        *self.inner.observer.borrow_mut() = Some(observer);
    }

    pub fn session(&self) -> &Rc<SessionContext> {
        &self.inner.session
    }

    pub fn phase(&self) -> ScanPhase {
        self.inner.phase.get()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.inner.status.borrow().clone()
    }

    /// Changes whose attendance the next decoded token records.
    pub fn select_employee(&self, employee: EmployeeId) {
        debug!("employee selected: {}", employee);
        self.inner.employee.set(employee);
    }

    pub fn selected_employee(&self) -> EmployeeId {
        self.inner.employee.get()
    }

    /// Records that the scanning surface is mounted.
    pub fn mark_target_ready(&self) {
        self.inner.target_ready.set(true);
    }

    /// Starts the decoder if the identity and render target are ready.
    ///
    /// Returns `true` only for the call that actually started scanning; the
    /// workflow never initializes a second decoder against the same target.
    pub async fn start_when_ready(&self) -> bool {
        let inner = &self.inner;
        if inner.phase.get() != ScanPhase::AwaitingReadiness {
            return false;
        }
        if !inner.target_ready.get() {
            debug!("render target not mounted yet");
            return false;
        }
        if !inner.session.identity().is_ready() {
            debug!("device identity not ready yet");
            return false;
        }

        inner.phase.set(ScanPhase::Scanning);
        inner.stop_requested.set(false);
        let started = inner.decoder.start(inner.on_decode.clone()).await;

        if inner.phase.get() == ScanPhase::TornDown {
            if let Err(err) = inner.decoder.stop().await {
                warn!("releasing scanner after teardown: {}", err);
            }
            return false;
        }

        match started {
            Ok(()) => {
                info!("scanner started");
                inner.set_status(WorkflowStatus::Idle);
                true
            }
            Err(err) => {
                inner.fail_scanner(err);
                false
            }
        }
    }

    /// Releases the decoder. Decodes arriving afterwards are ignored.
    pub async fn teardown(&self) {
        let inner = &self.inner;
        inner.phase.set(ScanPhase::TornDown);
        inner.stop_requested.set(true);
        if let Err(err) = inner.decoder.stop().await {
            warn!("scanner teardown failed: {}", err);
        }
    }
}

impl Inner {
    fn set_status(&self, status: WorkflowStatus) {
        *self.status.borrow_mut() = status.clone();
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&status);
        }
    }

    fn fail_scanner(&self, err: DecoderError) {
        error!("{}", err);
        self.phase.set(ScanPhase::Failed);
        self.set_status(WorkflowStatus::Failed(err.to_string()));
    }

    /// Synchronous half of decode handling: everything up to here must happen
    /// before the callback returns so a second decode sees the boundary.
    fn handle_decode(self: Rc<Self>, token: ScanToken) {
        if self.phase.get() != ScanPhase::Scanning || self.stop_requested.get() {
            debug!("ignoring decode after stop: {}", token);
            return;
        }

        self.stop_requested.set(true);
        self.phase.set(ScanPhase::Submitting);
        let employee = self.employee.get();
        info!("decoded token for employee {}", employee);

        let spawn = self.spawn.clone();
        spawn(Box::pin(async move {
            self.process_decode(token, employee).await;
        }));
    }

    async fn process_decode(self: Rc<Self>, token: ScanToken, employee: EmployeeId) {
        if let Err(err) = self.decoder.stop().await {
            self.fail_scanner(err);
            return;
        }
        if self.phase.get() == ScanPhase::TornDown {
            return;
        }

        let Some(coordinates) = self.session.coordinates() else {
            warn!("decode without a location fix, not submitting");
            self.set_status(WorkflowStatus::LocationRequired);
            self.resume_scanning().await;
            return;
        };
        let Some(device) = self.session.fingerprint() else {
            self.phase.set(ScanPhase::Failed);
            self.set_status(WorkflowStatus::Failed(
                "device identity is not ready".to_string(),
            ));
            return;
        };

        let request = AttendanceRequest::new(employee, token, device, coordinates);
        self.set_status(WorkflowStatus::Processing);

        let outcome = self.submitter.submit(&request).await;

        if self.phase.get() == ScanPhase::TornDown {
            debug!("outcome arrived after teardown: {:?}", outcome);
            return;
        }

        match outcome {
            AttendanceOutcome::Success(message) => {
                info!("attendance recorded: {}", message);
                self.phase.set(ScanPhase::Succeeded);
                self.set_status(WorkflowStatus::Succeeded(message));
            }
            AttendanceOutcome::Expired => {
                info!("token expired, scanning again");
                self.phase.set(ScanPhase::ExpiredRetrying);
                self.set_status(WorkflowStatus::ExpiredRetrying);
                self.resume_scanning().await;
            }
            AttendanceOutcome::Failure(detail) => {
                error!("attendance failed: {}", detail);
                self.phase.set(ScanPhase::Failed);
                self.set_status(WorkflowStatus::Failed(detail.to_string()));
            }
        }
    }

    /// Restarts the decoder with the original callback and reopens the
    /// boundary once capture is running again.
    async fn resume_scanning(&self) {
        match self.decoder.restart(self.on_decode.clone()).await {
            Ok(()) => {
                if self.phase.get() == ScanPhase::TornDown {
                    if let Err(err) = self.decoder.stop().await {
                        warn!("releasing scanner after teardown: {}", err);
                    }
                    return;
                }
                self.phase.set(ScanPhase::Scanning);
                self.stop_requested.set(false);
            }
            Err(err) => self.fail_scanner(err),
        }
    }
}
