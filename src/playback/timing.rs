//! Morse timing model
//!
//! All durations derive from the dot (one unit): a dash is three units,
//! the gap between symbols of one letter is one unit, the gap between
//! letters is three units, and the gap between words is seven units.
//! These values are fixed; so is the 600 Hz tone.

use std::time::Duration;

/// Base unit: duration of a dot tone.
pub const DOT: Duration = Duration::from_millis(100);

/// Dash tone, 3x dot.
pub const DASH: Duration = Duration::from_millis(300);

/// Silence after each dot or dash within a letter, 1x dot.
pub const SYMBOL_GAP: Duration = Duration::from_millis(100);

/// Silence for the ' ' marker between letters, 3x dot.
pub const LETTER_GAP: Duration = Duration::from_millis(300);

/// Silence for the '/' marker between words, 7x dot.
pub const WORD_GAP: Duration = Duration::from_millis(700);

/// Tone pitch for dots and dashes.
pub const TONE_FREQUENCY_HZ: f32 = 600.0;

/// A classified symbol from an encoded sequence.
///
/// Each symbol is one step of playback: an optional tone followed by a
/// rest. Characters outside the `{'.', '-', ' ', '/'}` alphabet have no
/// classification and are skipped by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    Dot,
    Dash,
    LetterGap,
    WordGap,
}

impl Symbol {
    /// Classify a sequence character.
    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            ' ' => Some(Symbol::LetterGap),
            '/' => Some(Symbol::WordGap),
            _ => None,
        }
    }

    /// Tone duration for this symbol, or `None` for pure silence.
    pub fn tone_duration(&self) -> Option<Duration> {
        match self {
            Symbol::Dot => Some(DOT),
            Symbol::Dash => Some(DASH),
            Symbol::LetterGap | Symbol::WordGap => None,
        }
    }

    /// Silence that follows the tone (or stands alone for gap symbols).
    pub fn rest_duration(&self) -> Duration {
        match self {
            Symbol::Dot | Symbol::Dash => SYMBOL_GAP,
            Symbol::LetterGap => LETTER_GAP,
            Symbol::WordGap => WORD_GAP,
        }
    }

    /// Total wall-clock length of this playback step.
    pub fn step_duration(&self) -> Duration {
        self.tone_duration().unwrap_or(Duration::ZERO) + self.rest_duration()
    }
}

/// Total wall-clock length of an encoded sequence.
///
/// Used by the UI to show how long playback will take. Characters outside
/// the symbol alphabet contribute nothing, matching the scheduler.
pub fn sequence_duration(sequence: &str) -> Duration {
    sequence
        .chars()
        .filter_map(Symbol::from_char)
        .map(|s| s.step_duration())
        .sum()
}
