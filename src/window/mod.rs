//! Bounded number window
//!
//! Holds the fixed-capacity, deduplicated, insertion-ordered window of
//! numbers that every request merges into.
//!
//! ```text
//! candidates → window_value filter → membership check → push_back
//!                                                          ↓
//!                                      trim front once (oldest first)
//! ```

pub mod store;
pub mod value;

pub use store::{average_of, WindowStore};
pub use value::{window_value, WindowValue};
