//! Playback module - timed, cancellable Morse playback
//!
//! This module provides:
//! - The timing model (symbol classification and fixed durations)
//! - The scheduler that drives tone/silence events on a worker thread

mod scheduler;
mod timing;

// Re-export public types
pub use scheduler::Scheduler;
pub use timing::sequence_duration;
