use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use common::model::device::DeviceFingerprint;
use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Device fingerprint unavailable: {0}")]
    Unavailable(String),
}

/// Computes a fingerprint for the current device.
#[async_trait(?Send)]
pub trait FingerprintSource {
    async fn compute(&self) -> Result<DeviceFingerprint, IdentityError>;
}

#[derive(Debug, Clone)]
enum IdentityState {
    Pending,
    Resolving,
    Ready(DeviceFingerprint),
    Failed(IdentityError),
}

/// Session-scoped device identity, computed at most once and then cached.
///
/// Until a fingerprint is available the identity is simply "not ready";
/// consumers wait instead of treating that as an error.
pub struct DeviceIdentity {
    source: Rc<dyn FingerprintSource>,
    state: RefCell<IdentityState>,
}

impl DeviceIdentity {
    pub fn new(source: Rc<dyn FingerprintSource>) -> Self {
        Self {
            source,
            state: RefCell::new(IdentityState::Pending),
        }
    }

    pub fn get(&self) -> Option<DeviceFingerprint> {
        match &*self.state.borrow() {
            IdentityState::Ready(fingerprint) => Some(fingerprint.clone()),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.borrow(), IdentityState::Ready(_))
    }

    pub fn last_error(&self) -> Option<IdentityError> {
        match &*self.state.borrow() {
            IdentityState::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }

    /// Returns the cached fingerprint, computing it on first use.
    ///
    /// Yields `None` while another resolution is still running or when the
    /// source failed; a later call retries a failed resolution.
    pub async fn resolve(&self) -> Option<DeviceFingerprint> {
        {
            let state = self.state.borrow();
            match &*state {
                IdentityState::Ready(fingerprint) => return Some(fingerprint.clone()),
                IdentityState::Resolving => return None,
                IdentityState::Pending | IdentityState::Failed(_) => {}
            }
        }

        *self.state.borrow_mut() = IdentityState::Resolving;
        match self.source.compute().await {
            Ok(fingerprint) => {
                info!("device identity ready: {}", fingerprint);
                *self.state.borrow_mut() = IdentityState::Ready(fingerprint.clone());
                Some(fingerprint)
            }
            Err(err) => {
                warn!("device identity failed: {}", err);
                *self.state.borrow_mut() = IdentityState::Failed(err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<usize>,
        fail_first: Cell<bool>,
    }

    #[async_trait(?Send)]
    impl FingerprintSource for CountingSource {
        async fn compute(&self) -> Result<DeviceFingerprint, IdentityError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_first.replace(false) {
                return Err(IdentityError::Unavailable("no navigator".into()));
            }
            Ok(DeviceFingerprint::new(format!("fp-{}", self.calls.get())))
        }
    }

    fn source(fail_first: bool) -> Rc<CountingSource> {
        Rc::new(CountingSource {
            calls: Cell::new(0),
            fail_first: Cell::new(fail_first),
        })
    }

    #[test]
    fn resolves_once_and_caches() {
        let source = source(false);
        let identity = DeviceIdentity::new(source.clone());
        assert!(!identity.is_ready());

        let first = block_on(identity.resolve());
        let second = block_on(identity.resolve());

        assert_eq!(first, Some(DeviceFingerprint::new("fp-1")));
        assert_eq!(second, first);
        assert_eq!(identity.get(), first);
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn failure_leaves_identity_not_ready_until_retried() {
        let source = source(true);
        let identity = DeviceIdentity::new(source.clone());

        assert_eq!(block_on(identity.resolve()), None);
        assert!(!identity.is_ready());
        assert!(identity.last_error().is_some());

        assert!(block_on(identity.resolve()).is_some());
        assert!(identity.is_ready());
        assert!(identity.last_error().is_none());
    }

    struct GatedSource {
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl FingerprintSource for GatedSource {
        async fn compute(&self) -> Result<DeviceFingerprint, IdentityError> {
            self.calls.set(self.calls.get() + 1);
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(DeviceFingerprint::new("slow"))
        }
    }

    #[test]
    fn concurrent_resolve_does_not_recompute() {
        let (release, gate) = oneshot::channel();
        let source = Rc::new(GatedSource {
            gate: RefCell::new(Some(gate)),
            calls: Cell::new(0),
        });
        let identity = Rc::new(DeviceIdentity::new(source.clone()));
        let mut pool = LocalPool::new();

        let background = identity.clone();
        pool.spawner()
            .spawn_local(async move {
                background.resolve().await;
            })
            .unwrap();
        pool.run_until_stalled();

        assert_eq!(pool.run_until(identity.resolve()), None);
        release.send(()).unwrap();
        pool.run_until_stalled();

        assert_eq!(identity.get(), Some(DeviceFingerprint::new("slow")));
        assert_eq!(source.calls.get(), 1);
    }
}
