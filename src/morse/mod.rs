//! Morse module - text to symbol encoding
//!
//! This module provides:
//! - The fixed character-to-code table
//! - The `encode` function that turns text into a symbol sequence

mod code;

// Re-export public items
pub use code::{encode, MORSE_TABLE};
