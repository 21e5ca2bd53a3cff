//! Component state for the attendance scanner.
//!
//! The component keeps a mirror of what the session and workflow report
//! (status, fingerprint, location) purely for rendering; the workflow remains
//! the only writer of the scan status.

use std::rc::Rc;

use common::model::device::DeviceFingerprint;
use futures::future::LocalBoxFuture;
use yew::prelude::*;

use crate::config::{scan_endpoint, READER_ELEMENT_ID};
use crate::platform::fingerprint::BrowserFingerprint;
use crate::platform::geolocation::BrowserGeolocation;
use crate::platform::html5_qrcode::Html5QrcodeDecoder;
use crate::platform::http::HttpSubmitter;
use crate::session::identity::IdentityError;
use crate::session::location::LocationState;
use crate::session::SessionContext;
use crate::workflow::status::WorkflowStatus;
use crate::workflow::{ScanWorkflow, Spawner};

use super::messages::Msg;

pub struct AttendanceScanner {
    /// Workflow driving the scan cycle; owns the session, decoder and submitter.
    pub workflow: ScanWorkflow,

    /// Last status pushed by the workflow.
    pub status: WorkflowStatus,

    /// Fingerprint once resolved, `None` while loading.
    pub device_id: Option<DeviceFingerprint>,

    /// Why the fingerprint could not be computed, if it failed.
    pub identity_error: Option<IdentityError>,

    pub location: LocationState,

    /// Reference to the scanner render target.
    pub reader_ref: NodeRef,

    /// Guard to run first-render initialization once.
    pub loaded: bool,
}

impl AttendanceScanner {
    /// Wires the browser adapters into a fresh session and workflow and
    /// routes their notifications back into the component as messages.
    pub fn new(ctx: &Context<Self>) -> Self {
        let session = Rc::new(SessionContext::new(
            Rc::new(BrowserFingerprint),
            Rc::new(BrowserGeolocation),
        ));
        let spawn: Spawner = Rc::new(|future: LocalBoxFuture<'static, ()>| {
            wasm_bindgen_futures::spawn_local(future)
        });
        let workflow = ScanWorkflow::new(
            session.clone(),
            Rc::new(Html5QrcodeDecoder::new(READER_ELEMENT_ID)),
            Rc::new(HttpSubmitter::new(scan_endpoint())),
            spawn,
            ctx.props().initial_employee,
        );

        let on_status = ctx.link().callback(Msg::StatusChanged);
        workflow.set_status_observer(Rc::new(move |status: &WorkflowStatus| {
            on_status.emit(status.clone())
        }));
        let on_location = ctx.link().callback(Msg::LocationChanged);
        session
            .location()
            .set_observer(Rc::new(move |state: &LocationState| {
                on_location.emit(state.clone())
            }));

        Self {
            status: workflow.status(),
            workflow,
            device_id: None,
            identity_error: None,
            location: session.location().snapshot(),
            reader_ref: NodeRef::default(),
            loaded: false,
        }
    }

    pub fn session(&self) -> Rc<SessionContext> {
        self.workflow.session().clone()
    }
}
