use serde::{Deserialize, Serialize};

use crate::model::coordinates::Coordinates;
use crate::model::device::DeviceFingerprint;
use crate::model::employee::EmployeeId;
use crate::model::token::ScanToken;

/// Body of `POST /api/attendance/scan`.
///
/// Built fresh for every decoded token and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRequest {
    pub employee_id: EmployeeId,
    pub qr_token: ScanToken,
    pub device_id: DeviceFingerprint,
    pub lat: f64,
    pub lng: f64,
}

impl AttendanceRequest {
    pub fn new(
        employee_id: EmployeeId,
        qr_token: ScanToken,
        device_id: DeviceFingerprint,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            employee_id,
            qr_token,
            device_id,
            lat: coordinates.lat,
            lng: coordinates.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_flat_wire_shape() {
        let request = AttendanceRequest::new(
            EmployeeId(3),
            ScanToken::new("tok-123"),
            DeviceFingerprint::new("abc"),
            Coordinates::new(-6.2, 106.8),
        );

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "employee_id": 3,
                "qr_token": "tok-123",
                "device_id": "abc",
                "lat": -6.2,
                "lng": 106.8,
            })
        );
    }
}
