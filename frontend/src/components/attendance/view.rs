//! View rendering for the attendance scanner.
//!
//! Layout: a heading, the employee dropdown, the `#reader` element the QR
//! library renders into, and a status card with the device id and the
//! current location (or the location error with a retry button).

use common::model::device::DeviceFingerprint;
use common::model::employee::{EmployeeId, ROSTER};
use web_sys::HtmlSelectElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::AttendanceScanner;
use crate::config::READER_ELEMENT_ID;
use crate::session::identity::IdentityError;
use crate::workflow::status::WorkflowStatus;

pub fn view(component: &AttendanceScanner, ctx: &Context<AttendanceScanner>) -> Html {
    let link = ctx.link();

    html! {
        <div style="text-align: center; padding: 20px; max-width: 500px; margin: auto;">
            <h2>{ "Dynamic QR Attendance" }</h2>
            { build_employee_picker(component, link) }
            <div id={READER_ELEMENT_ID} ref={component.reader_ref.clone()}></div>
            { build_status_card(component, link) }
        </div>
    }
}

fn build_employee_picker(component: &AttendanceScanner, link: &Scope<AttendanceScanner>) -> Html {
    let selected = component.workflow.selected_employee();
    let onchange = link.batch_callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select
            .value()
            .parse::<u32>()
            .ok()
            .map(|id| Msg::SelectEmployee(EmployeeId(id)))
    });

    html! {
        <div style="margin-bottom: 20px; padding: 10px; background: #f8f9fa; border-radius: 8px;">
            <label style="display: block; margin-bottom: 5px; font-weight: bold;">
                { "Select employee:" }
            </label>
            <select {onchange} style="width: 100%; padding: 8px; border-radius: 5px;">
                { for ROSTER.iter().map(|employee| html! {
                    <option
                        value={employee.id.to_string()}
                        selected={employee.id == selected}
                    >
                        { employee.label }
                    </option>
                }) }
            </select>
        </div>
    }
}

const STATUS_CARD_STYLE: &str =
    "margin-top: 20px; padding: 15px; border-radius: 12px; border: 1px solid #d0e3ff;";

const FAILURE_DETAIL_STYLE: &str = "text-align: left; white-space: pre-wrap; color: #b00020;";

fn device_label(device_id: Option<&DeviceFingerprint>, error: Option<&IdentityError>) -> String {
    match (device_id, error) {
        (Some(device_id), _) => device_id.to_string(),
        (None, Some(error)) => error.to_string(),
        (None, None) => "Loading...".to_string(),
    }
}

fn build_status_card(component: &AttendanceScanner, link: &Scope<AttendanceScanner>) -> Html {
    let device_label = device_label(
        component.device_id.as_ref(),
        component.identity_error.as_ref(),
    );
    let location_label = component
        .location
        .coordinates
        .map(|coordinates| coordinates.to_string())
        .unwrap_or_else(|| "Searching for GPS...".to_string());

    html! {
        <div style={STATUS_CARD_STYLE}>
            { build_status_line(&component.status) }
            <div style="text-align: left; font-size: 0.8em; color: #666;">
                <p><strong>{ "Device ID: " }</strong>{ device_label }</p>
                <p><strong>{ "Location: " }</strong>{ location_label }</p>
                {
                    if let Some(error) = &component.location.error {
                        html! {
                            <p style="color: red;">
                                { format!("⚠️ {}", error) }
                                <button
                                    style="margin-left: 8px;"
                                    onclick={link.callback(|_| Msg::RefreshLocation)}
                                >
                                    { "Retry location" }
                                </button>
                            </p>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

/// Failures carry multi-line payloads, so they render in a `<pre>` block.
fn build_status_line(status: &WorkflowStatus) -> Html {
    match status {
        WorkflowStatus::Failed(detail) => html! {
            <>
                <p>{ "Status: " }<strong>{ "Failed!" }</strong></p>
                <pre style={FAILURE_DETAIL_STYLE}>{ detail.clone() }</pre>
            </>
        },
        other => html! {
            <p>{ "Status: " }<strong>{ other.to_string() }</strong></p>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_identity_shows_the_reason() {
        let error = IdentityError::Unavailable("no screen".into());
        let label = device_label(None, Some(&error));
        assert_eq!(label, error.to_string());
        assert!(label.contains("no screen"));
    }

    #[test]
    fn fingerprint_wins_over_a_stale_error() {
        let device = DeviceFingerprint::new("abc123");
        let error = IdentityError::Unavailable("no screen".into());
        assert_eq!(device_label(Some(&device), Some(&error)), "abc123");
        assert_eq!(device_label(None, None), "Loading...");
    }
}
