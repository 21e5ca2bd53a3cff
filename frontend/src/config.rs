//! Build-time configuration. Override the endpoint host by exporting
//! `ATTENDANCE_API_URL` when building the widget.

use log::LevelFilter;

pub const API_BASE_URL: &str = match option_env!("ATTENDANCE_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

pub const SCAN_PATH: &str = "/api/attendance/scan";

/// DOM id of the element the QR scanner renders into.
pub const READER_ELEMENT_ID: &str = "reader";

pub const SCANNER_FPS: u32 = 10;
pub const SCANNER_QRBOX: u32 = 250;
pub const SCANNER_ASPECT_RATIO: f64 = 1.0;

pub const LOG_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};

pub fn scan_endpoint() -> String {
    join_endpoint(API_BASE_URL, SCAN_PATH)
}

fn join_endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_double_slash() {
        assert_eq!(
            join_endpoint("https://absen.example/", SCAN_PATH),
            "https://absen.example/api/attendance/scan"
        );
        assert_eq!(
            join_endpoint("https://absen.example", SCAN_PATH),
            "https://absen.example/api/attendance/scan"
        );
    }
}
