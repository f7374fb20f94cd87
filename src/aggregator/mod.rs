//! Average aggregator
//!
//! One request cycle: resolve source → fetch (outside the lock) → merge under
//! the lock with before/after snapshots → average the captured snapshot.

pub mod service;
pub mod snapshot;

pub use service::AverageService;
pub use snapshot::WindowSnapshot;
