//! Seams shared across the cruise workspace.
//!
//! The control components themselves are pure; the only environmental
//! dependency is time, used when a tick script is replayed at the real
//! control rate.

pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};
