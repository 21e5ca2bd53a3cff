//! Per-mount session context: the device identity and the location provider.
//!
//! Both are created once when the scanner mounts and handed to the workflow
//! through a single owned [`SessionContext`], so nothing about the session
//! lives in globals. The fingerprint is written once and read many times, and
//! coordinates only change on an explicit `refresh()`.

pub mod identity;
pub mod location;

use std::rc::Rc;

use common::model::coordinates::Coordinates;
use common::model::device::DeviceFingerprint;

use identity::{DeviceIdentity, FingerprintSource};
use location::{LocationProvider, PositionSource};

pub struct SessionContext {
    identity: DeviceIdentity,
    location: LocationProvider,
}

impl SessionContext {
    pub fn new(fingerprints: Rc<dyn FingerprintSource>, positions: Rc<dyn PositionSource>) -> Self {
        Self {
            identity: DeviceIdentity::new(fingerprints),
            location: LocationProvider::new(positions),
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn location(&self) -> &LocationProvider {
        &self.location
    }

    /// Cached fingerprint, `None` until the identity has resolved.
    pub fn fingerprint(&self) -> Option<DeviceFingerprint> {
        self.identity.get()
    }

    /// Last successful position fix.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.coordinates()
    }
}
