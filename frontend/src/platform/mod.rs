//! Browser implementations of the session and workflow seams.
//!
//! - `geolocation`: `navigator.geolocation` as a `PositionSource`.
//! - `fingerprint`: navigator/screen signals hashed into a `DeviceFingerprint`.
//! - `html5_qrcode`: the `Html5QrcodeScanner` JS library as a `ScanDecoder`.
//! - `http`: `gloo-net` POST as an `AttendanceSubmitter`.
//! - `console_logger`: routes the `log` macros to the browser console.

pub mod console_logger;
pub mod fingerprint;
pub mod geolocation;
pub mod html5_qrcode;
pub mod http;

use wasm_bindgen::JsValue;

/// Best-effort text for a thrown JS value (`Error.message` or its string form).
pub(crate) fn describe_js_error(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
