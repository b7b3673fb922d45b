//! Results engine.
//!
//! Applies a final score to a scheduled match. A recorded result can never be
//! amended; corrections go through clearing and regenerating the fixtures.

pub mod engine;

pub use engine::{playable_matches, record_result};
