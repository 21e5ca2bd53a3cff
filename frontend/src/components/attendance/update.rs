//! Update function for the attendance scanner component.
//!
//! Elm-style: mutate the component mirror for the incoming `Msg` and return
//! whether the view should re-render. Anything asynchronous (starting the
//! scanner, refreshing the location) is spawned and reports back through a
//! message.

use common::model::employee::find_employee;
use log::{info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::show_toast;
use super::messages::Msg;
use super::state::AttendanceScanner;
use crate::workflow::status::WorkflowStatus;

pub fn update(
    component: &mut AttendanceScanner,
    ctx: &Context<AttendanceScanner>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::IdentityResolved(fingerprint) => {
            component.identity_error = component.session().identity().last_error();
            component.device_id = fingerprint;
            if component.device_id.is_some() {
                let workflow = component.workflow.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let started = workflow.start_when_ready().await;
                    link.send_message(Msg::ScannerStarted(started));
                });
            }
            true
        }
        Msg::LocationChanged(state) => {
            component.location = state;
            true
        }
        Msg::StatusChanged(status) => {
            match &status {
                WorkflowStatus::Succeeded(message) => show_toast(message),
                WorkflowStatus::LocationRequired => show_toast(&status.to_string()),
                WorkflowStatus::Failed(detail) => show_toast(detail),
                _ => {}
            }
            component.status = status;
            true
        }
        Msg::RefreshLocation => {
            let session = component.session();
            spawn_local(async move {
                session.location().refresh().await;
            });
            false
        }
        Msg::SelectEmployee(id) => {
            let Some(employee) = find_employee(id) else {
                warn!("ignoring selection of unknown employee {}", id);
                return false;
            };
            info!("scanning for {}", employee.label);
            component.workflow.select_employee(employee.id);
            true
        }
        Msg::ScannerStarted(started) => {
            if started {
                info!("scanner is live");
            } else {
                warn!("scanner did not start in phase {:?}", component.workflow.phase());
            }
            false
        }
    }
}
