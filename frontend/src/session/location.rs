use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use common::model::coordinates::Coordinates;
use log::{info, warn};
use thiserror::Error;

/// Why no position is available. The `Display` text is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Geolocation is not supported by this browser")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// One-shot access to the platform's position API.
#[async_trait(?Send)]
pub trait PositionSource {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Snapshot of what the provider currently knows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationState {
    pub coordinates: Option<Coordinates>,
    pub error: Option<LocationError>,
}

pub type LocationObserver = Rc<dyn Fn(&LocationState)>;

/// Holds the last known coordinates and refreshes them only when asked.
pub struct LocationProvider {
    source: Rc<dyn PositionSource>,
    state: RefCell<LocationState>,
    observer: RefCell<Option<LocationObserver>>,
}

impl LocationProvider {
    pub fn new(source: Rc<dyn PositionSource>) -> Self {
        Self {
            source,
            state: RefCell::new(LocationState::default()),
            observer: RefCell::new(None),
        }
    }

    /// Registers the single observer notified after every refresh.
    pub fn set_observer(&self, observer: LocationObserver) {
        *self.observer.borrow_mut() = Some(observer);
    }

    pub fn snapshot(&self) -> LocationState {
        self.state.borrow().clone()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.state.borrow().coordinates
    }

    /// Performs one platform lookup.
    ///
    /// A fix replaces the coordinates and clears the error. A failure records
    /// the error and leaves any earlier coordinates in place.
    pub async fn refresh(&self) -> LocationState {
        let result = self.source.current_position().await;

        let snapshot = {
            let mut state = self.state.borrow_mut();
            match result {
                Ok(coordinates) => {
                    info!("location fix {}", coordinates);
                    state.coordinates = Some(coordinates);
                    state.error = None;
                }
                Err(err) => {
                    warn!("location lookup failed: {}", err);
                    state.error = Some(err);
                }
            }
            state.clone()
        };

        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&snapshot);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    struct ScriptedPositions {
        answers: RefCell<Vec<Result<Coordinates, LocationError>>>,
        calls: Cell<usize>,
    }

    impl ScriptedPositions {
        fn new(mut answers: Vec<Result<Coordinates, LocationError>>) -> Rc<Self> {
            answers.reverse();
            Rc::new(Self {
                answers: RefCell::new(answers),
                calls: Cell::new(0),
            })
        }
    }

    #[async_trait(?Send)]
    impl PositionSource for ScriptedPositions {
        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            self.calls.set(self.calls.get() + 1);
            self.answers
                .borrow_mut()
                .pop()
                .unwrap_or(Err(LocationError::Unsupported))
        }
    }

    #[test]
    fn starts_empty_and_does_not_poll() {
        let source = ScriptedPositions::new(vec![]);
        let provider = LocationProvider::new(source.clone());

        assert_eq!(provider.snapshot(), LocationState::default());
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn fix_stores_coordinates_and_clears_error() {
        let source = ScriptedPositions::new(vec![
            Err(LocationError::PermissionDenied),
            Ok(Coordinates::new(1.5, 2.5)),
        ]);
        let provider = LocationProvider::new(source);

        block_on(provider.refresh());
        let state = provider.snapshot();
        assert_eq!(state.error, Some(LocationError::PermissionDenied));
        assert!(state.coordinates.is_none());

        block_on(provider.refresh());
        let state = provider.snapshot();
        assert_eq!(state.coordinates, Some(Coordinates::new(1.5, 2.5)));
        assert!(state.error.is_none());
    }

    #[test]
    fn failure_after_fix_keeps_previous_coordinates() {
        let source = ScriptedPositions::new(vec![
            Ok(Coordinates::new(1.0, 2.0)),
            Err(LocationError::Unavailable("timeout".into())),
        ]);
        let provider = LocationProvider::new(source);

        block_on(provider.refresh());
        let state = block_on(provider.refresh());

        assert_eq!(state.coordinates, Some(Coordinates::new(1.0, 2.0)));
        assert_eq!(
            state.error,
            Some(LocationError::Unavailable("timeout".into()))
        );
    }

    #[test]
    fn observer_sees_every_refresh() {
        let source = ScriptedPositions::new(vec![Ok(Coordinates::new(3.0, 4.0))]);
        let provider = LocationProvider::new(source);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        provider.set_observer(Rc::new(move |state: &LocationState| {
            sink.borrow_mut().push(state.clone())
        }));

        block_on(provider.refresh());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].coordinates, Some(Coordinates::new(3.0, 4.0)));
    }
}
