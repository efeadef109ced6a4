//! Global application state.
//!
//! Holds the beer repository the handlers work against.

/// Global application state.
#[derive(Clone, Debug)]
pub struct AppState<R> {
    beers: R,
}

impl<R> AppState<R> {
    /// Constructs a new [`AppState`].
    pub fn new(beers: R) -> Self {
        Self { beers }
    }

    /// Returns the beer repository.
    pub fn beers(&self) -> &R {
        &self.beers
    }
}
