use async_trait::async_trait;
use common::model::device::DeviceFingerprint;

use crate::session::identity::{FingerprintSource, IdentityError};

/// Fingerprint derived from stable browser characteristics.
///
/// Not a security boundary: two identical browsers on identical hardware
/// produce the same value.
pub struct BrowserFingerprint;

#[async_trait(?Send)]
impl FingerprintSource for BrowserFingerprint {
    async fn compute(&self) -> Result<DeviceFingerprint, IdentityError> {
        let window = web_sys::window()
            .ok_or_else(|| IdentityError::Unavailable("no window".to_string()))?;
        let navigator = window.navigator();

        let mut signals = vec![
            navigator.user_agent().unwrap_or_default(),
            navigator.language().unwrap_or_default(),
            navigator.platform().unwrap_or_default(),
            navigator.hardware_concurrency().to_string(),
            js_sys::Date::new_0().get_timezone_offset().to_string(),
        ];
        if let Ok(screen) = window.screen() {
            signals.push(format!(
                "{}x{}x{}",
                screen.width().unwrap_or_default(),
                screen.height().unwrap_or_default(),
                screen.color_depth().unwrap_or_default()
            ));
        }

        if signals.iter().all(|signal| signal.is_empty()) {
            return Err(IdentityError::Unavailable(
                "browser exposes no identifying signals".to_string(),
            ));
        }
        Ok(fingerprint_from_signals(&signals))
    }
}

/// Hashes the collected signals into a 32-character hex id.
pub fn fingerprint_from_signals(signals: &[String]) -> DeviceFingerprint {
    DeviceFingerprint::new(format!("{:x}", md5::compute(signals.join("|"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(user_agent: &str) -> Vec<String> {
        vec![user_agent.to_string(), "id-ID".to_string(), "-420".to_string()]
    }

    #[test]
    fn same_signals_give_same_fingerprint() {
        let a = fingerprint_from_signals(&signals("Mozilla/5.0"));
        let b = fingerprint_from_signals(&signals("Mozilla/5.0"));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn different_signals_give_different_fingerprint() {
        let a = fingerprint_from_signals(&signals("Mozilla/5.0 (Android)"));
        let b = fingerprint_from_signals(&signals("Mozilla/5.0 (iPhone)"));
        assert_ne!(a, b);
    }
}
