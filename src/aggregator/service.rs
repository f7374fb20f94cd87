//! Request-cycle orchestration around the shared window

use super::snapshot::WindowSnapshot;
use crate::error::{UpstreamError, ValidationError};
use crate::upstream::{NumberFetcher, SourceRegistry, UpstreamSource};
use crate::window::{average_of, WindowStore, WindowValue};
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Owns the window and drives fetch → merge → average for each request.
///
/// Shared across request handlers behind an `Arc`. The window lives inside a
/// mutex; the upstream call happens without holding it.
pub struct AverageService {
    window: Mutex<WindowStore>,
    registry: SourceRegistry,
    fetcher: Arc<dyn NumberFetcher>,
    fetch_timeout: Duration,
}

impl AverageService {
    pub fn new(
        capacity: NonZeroUsize,
        registry: SourceRegistry,
        fetcher: Arc<dyn NumberFetcher>,
        fetch_timeout: Duration,
    ) -> Self {
        log::info!(
            "📊 Window capacity {} | sources {:?} | fetcher {} | timeout {}ms",
            capacity,
            registry.labels(),
            fetcher.backend_type(),
            fetch_timeout.as_millis()
        );

        Self {
            window: Mutex::new(WindowStore::new(capacity)),
            registry,
            fetcher,
            fetch_timeout,
        }
    }

    /// Run one request cycle for `source_id`.
    ///
    /// # Returns
    /// * `Ok(WindowSnapshot)` - Always, for a known identifier, even when the
    ///   upstream call failed (the fetch then counts as empty)
    /// * `Err(ValidationError)` - Unknown identifier; nothing was fetched and
    ///   the window is untouched
    pub async fn handle(&self, source_id: &str) -> Result<WindowSnapshot, ValidationError> {
        let source = self.registry.resolve(source_id)?;

        let numbers = self.fetch_numbers(source).await;

        let (window_prev_state, window_curr_state, added) = {
            let mut window = self.lock_window();
            let prev = window.snapshot();
            let added = window.merge(&numbers);
            (prev, window.snapshot(), added)
        };

        let avg = average_of(&window_curr_state);

        log::debug!(
            "source={} fetched={} added={:?} window={:?} avg={:.2}",
            source.label,
            numbers.len(),
            added,
            window_curr_state,
            avg
        );

        Ok(WindowSnapshot {
            window_prev_state,
            window_curr_state,
            numbers,
            avg,
        })
    }

    /// Single upstream attempt; every failure degrades to an empty fetch.
    async fn fetch_numbers(&self, source: &UpstreamSource) -> Vec<Value> {
        let result = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(source))
            .await
            .unwrap_or(Err(UpstreamError::Timeout));

        match result {
            Ok(numbers) => numbers,
            Err(UpstreamError::Timeout) => {
                log::warn!("⏳ Request to {} timed out", source.url);
                Vec::new()
            }
            Err(UpstreamError::Status(status)) => {
                log::warn!("Error from {} (Status: {})", source.url, status);
                Vec::new()
            }
            Err(e) => {
                log::warn!("Fetch from {} failed: {}", source.url, e);
                Vec::new()
            }
        }
    }

    // The window is consistent between operations, so a panic elsewhere
    // while holding the lock leaves nothing to repair.
    fn lock_window(&self) -> MutexGuard<'_, WindowStore> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the live window
    pub fn window(&self) -> Vec<WindowValue> {
        self.lock_window().snapshot()
    }

    pub fn window_len(&self) -> usize {
        self.lock_window().len()
    }

    pub fn capacity(&self) -> usize {
        self.lock_window().capacity()
    }

    pub fn source_labels(&self) -> Vec<&str> {
        self.registry.labels()
    }
}
