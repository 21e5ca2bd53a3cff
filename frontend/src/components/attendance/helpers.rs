//! DOM helpers for the attendance scanner.

use gloo_timers::callback::Timeout;
use log::warn;

const TOAST_MILLIS: u32 = 4000;

const TOAST_STYLE: &str = "position: fixed; bottom: 20px; left: 50%; \
    transform: translateX(-50%); max-width: 90vw; white-space: pre-wrap; \
    background: rgba(0, 0, 0, 0.8); color: #fff; padding: 10px 20px; \
    border-radius: 4px; z-index: 10000; font-family: Arial, sans-serif;";

/// Shows `message` in a toast that removes itself after a few seconds.
///
/// Server payloads end up here, so the text is set as text content and
/// never parsed as markup.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Ok(toast) = document.create_element("div") else {
        warn!("toast element could not be created");
        return;
    };

    toast.set_text_content(Some(message));
    if toast.set_attribute("style", TOAST_STYLE).is_err() || body.append_child(&toast).is_err() {
        warn!("toast could not be shown: {}", message);
        return;
    }

    Timeout::new(TOAST_MILLIS, move || toast.remove()).forget();
}
