use serde::{Deserialize, Serialize};
use std::fmt;

/// A single position fix reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Renders as `lat, lng` with five decimals, the precision shown to users.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_to_five_decimals() {
        let coords = Coordinates::new(-6.2087634, 106.845599);
        assert_eq!(coords.to_string(), "-6.20876, 106.84560");
    }
}
