//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Budget, Error};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The accounts and transactions shared by all request handlers.
    pub budget: Arc<Mutex<Budget>>,
}

impl AppState {
    /// Create a new [AppState] with an empty budget.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(local_timezone: &str) -> Self {
        Self::with_budget(local_timezone, Budget::new())
    }

    /// Create a new [AppState] that serves an existing `budget`.
    pub fn with_budget(local_timezone: &str, budget: Budget) -> Self {
        Self {
            local_timezone: local_timezone.to_owned(),
            budget: Arc::new(Mutex::new(budget)),
        }
    }
}

/// Acquire the lock on `budget`.
///
/// # Errors
///
/// Returns [Error::StateLockError] if the lock is poisoned.
pub(crate) fn lock_budget(budget: &Mutex<Budget>) -> Result<MutexGuard<'_, Budget>, Error> {
    budget.lock().map_err(|error| {
        tracing::error!("Could not acquire budget lock: {error}");
        Error::StateLockError
    })
}
