//! Audio module - cpal tone output
//!
//! This module provides the tone player that emits amplitude-enveloped
//! sine bursts. Device and stream failures stay inside it: they are
//! logged and degraded to silence, never surfaced.

mod tone;

// Re-export public types
pub use tone::TonePlayer;
