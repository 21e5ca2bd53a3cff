//! Runtime settings for the host, read from the environment.
//!
//! | variable               | default     |
//! |------------------------|-------------|
//! | `SCANNER_HOST`         | `127.0.0.1` |
//! | `SCANNER_PORT`         | `8080`      |
//! | `SCANNER_OPEN_BROWSER` | `true`      |

use log::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            open_browser: true,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparsable values fall back to
    /// the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("SCANNER_HOST")
            .filter(|host| !host.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("SCANNER_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("ignoring invalid SCANNER_PORT {:?}", raw);
                defaults.port
            }),
            None => defaults.port,
        };

        let open_browser = match lookup("SCANNER_OPEN_BROWSER").as_deref().map(str::trim) {
            Some("0") | Some("false") | Some("no") => false,
            Some(_) | None => defaults.open_browser,
        };

        Self {
            host,
            port,
            open_browser,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
