//! Playback scheduler - walks an encoded sequence on a worker thread
//!
//! One worker thread per playback run, at most one run at a time. The
//! only state shared across threads is three atomics:
//!
//! - `live`: the cancellation flag, polled before every symbol
//! - `muted`: read by the tone player before every tone
//! - `position`: the index of the symbol currently sounding, published
//!   before its tone/silence begins so the UI highlight never lags the
//!   audio ([`NO_POSITION`] means idle)
//!
//! `stop()` is lock-free: it clears `live` and the worker winds down at
//! the next symbol boundary, so cancellation latency is bounded by one
//! in-flight step (at most a word gap, 0.7 s).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::audio::TonePlayer;

use super::timing::{Symbol, TONE_FREQUENCY_HZ};

/// Sentinel for "no symbol sounding"
const NO_POSITION: usize = usize::MAX;

/// Drives timed, cancellable playback of an encoded sequence
///
/// Owns all playback state as instance state; the UI holds the scheduler
/// and reads position/liveness through it each frame.
pub struct Scheduler {
    /// True while a playback run is in flight; doubles as the
    /// cancellation flag
    live: Arc<AtomicBool>,

    /// Shared mute flag, handed to the tone player
    muted: Arc<AtomicBool>,

    /// Index of the symbol currently sounding, or NO_POSITION
    position: Arc<AtomicUsize>,

    /// Handle of the most recent worker, joined before the next start
    worker: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(false)),
            muted: Arc::new(AtomicBool::new(false)),
            position: Arc::new(AtomicUsize::new(NO_POSITION)),
            worker: None,
        }
    }

    /// Whether a playback run is currently in flight.
    pub fn is_playing(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Index of the symbol currently sounding, if any.
    pub fn position(&self) -> Option<usize> {
        let index = self.position.load(Ordering::Acquire);
        (index != NO_POSITION).then_some(index)
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Flip the mute flag. Takes effect on the next tone, not the one
    /// already sounding.
    pub fn toggle_mute(&self) {
        let muted = !self.muted.fetch_xor(true, Ordering::Relaxed);
        log::info!("Mute {}", if muted { "on" } else { "off" });
    }

    /// Start playing `sequence` from the beginning.
    ///
    /// No-op when the sequence is empty or a run is already in flight;
    /// at most one playback run exists at a time.
    pub fn start(&mut self, sequence: &str) {
        if sequence.is_empty() {
            return;
        }
        if self.is_playing() {
            log::debug!("Start ignored: already playing");
            return;
        }

        // A previous worker may still be finishing its last step after a
        // stop; join it so its exit path cannot clear the new run's flag.
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        self.position.store(NO_POSITION, Ordering::Release);
        self.live.store(true, Ordering::Release);

        let symbols: Vec<char> = sequence.chars().collect();
        log::info!("Playback started: {} symbols", symbols.len());

        let live = Arc::clone(&self.live);
        let muted = Arc::clone(&self.muted);
        let position = Arc::clone(&self.position);
        self.worker = Some(thread::spawn(move || {
            run_sequence(&symbols, &live, &muted, &position);
        }));
    }

    /// Request cancellation. No-op when idle.
    ///
    /// Clears the position immediately so the highlight disappears at
    /// once; the worker stops emitting at the next symbol boundary.
    pub fn stop(&mut self) {
        if self.is_playing() {
            log::info!("Playback stopped");
        }
        self.live.store(false, Ordering::Release);
        self.position.store(NO_POSITION, Ordering::Release);
    }

    /// Start if idle, stop if playing.
    pub fn toggle(&mut self, sequence: &str) {
        if self.is_playing() {
            self.stop();
        } else {
            self.start(sequence);
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.live.store(false, Ordering::Release);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

/// Worker body: one pass over the sequence, strictly left to right.
fn run_sequence(
    symbols: &[char],
    live: &AtomicBool,
    muted: &Arc<AtomicBool>,
    position: &AtomicUsize,
) {
    let player = TonePlayer::new(Arc::clone(muted));

    for (index, &c) in symbols.iter().enumerate() {
        // Cancellation check at every symbol boundary
        if !live.load(Ordering::Acquire) {
            log::debug!("Playback cancelled at symbol {}", index);
            break;
        }

        // Publish the index before the tone/silence begins
        position.store(index, Ordering::Release);

        if let Some(symbol) = Symbol::from_char(c) {
            if let Some(tone) = symbol.tone_duration() {
                player.play(TONE_FREQUENCY_HZ, tone);
            }
            thread::sleep(symbol.rest_duration());
        }
        // Characters outside the alphabet are zero-duration no-ops
    }

    position.store(NO_POSITION, Ordering::Release);
    live.store(false, Ordering::Release);
    log::debug!("Playback worker finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_until_idle(scheduler: &Scheduler, limit: Duration) {
        let deadline = Instant::now() + limit;
        while scheduler.is_playing() {
            assert!(Instant::now() < deadline, "playback did not finish in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_starts_idle() {
        let scheduler = Scheduler::new();
        assert!(!scheduler.is_playing());
        assert_eq!(scheduler.position(), None);
    }

    #[test]
    fn test_start_on_empty_sequence_is_noop() {
        let mut scheduler = Scheduler::new();
        scheduler.start("");
        assert!(!scheduler.is_playing());
        assert_eq!(scheduler.position(), None);
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let mut scheduler = Scheduler::new();
        scheduler.stop();
        assert!(!scheduler.is_playing());
        assert_eq!(scheduler.position(), None);
    }

    #[test]
    fn test_completion_returns_to_idle_and_clears_position() {
        let mut scheduler = Scheduler::new();
        scheduler.toggle_mute(); // keep the test silent
        scheduler.start(".");
        assert!(scheduler.is_playing());

        wait_until_idle(&scheduler, Duration::from_secs(5));
        assert_eq!(scheduler.position(), None);
    }

    #[test]
    fn test_stop_cancels_and_clears_position() {
        let mut scheduler = Scheduler::new();
        scheduler.toggle_mute();
        scheduler.start("... --- ...");
        assert!(scheduler.is_playing());

        scheduler.stop();
        assert!(!scheduler.is_playing());
        assert_eq!(scheduler.position(), None);
    }

    /// Poll the position every few ms until the run ends, returning every
    /// observed index in order.
    fn observe_positions(scheduler: &Scheduler, limit: Duration) -> Vec<usize> {
        let deadline = Instant::now() + limit;
        let mut seen = Vec::new();
        while scheduler.is_playing() {
            assert!(Instant::now() < deadline, "playback did not finish in time");
            if let Some(index) = scheduler.position() {
                if seen.last() != Some(&index) {
                    seen.push(index);
                }
            }
            thread::sleep(Duration::from_millis(5));
        }
        seen
    }

    #[test]
    fn test_position_advances_during_playback() {
        let mut scheduler = Scheduler::new();
        scheduler.toggle_mute();
        // three dot steps of 200 ms each
        scheduler.start("...");

        let seen = observe_positions(&scheduler, Duration::from_secs(5));
        assert!(!seen.is_empty());
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert!(*seen.last().unwrap() <= 2);
        assert_eq!(scheduler.position(), None);
    }

    #[test]
    fn test_start_while_playing_is_ignored() {
        let mut scheduler = Scheduler::new();
        scheduler.toggle_mute();
        scheduler.start("- - -");
        assert!(scheduler.is_playing());

        // A second start must not reset the run to the beginning: one
        // strictly increasing position progression is observed.
        scheduler.start("- - -");
        let seen = observe_positions(&scheduler, Duration::from_secs(5));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert!(!scheduler.is_playing());
    }

    #[test]
    fn test_muted_playback_keeps_full_timing() {
        let mut scheduler = Scheduler::new();
        scheduler.toggle_mute();
        assert!(scheduler.is_muted());

        // dot step (200 ms) + dash step (400 ms) = 600 ms minimum
        let started = Instant::now();
        scheduler.start(".-");
        wait_until_idle(&scheduler, Duration::from_secs(5));
        assert!(started.elapsed() >= Duration::from_millis(600));
    }

    #[test]
    fn test_restart_after_stop() {
        let mut scheduler = Scheduler::new();
        scheduler.toggle_mute();
        scheduler.start("---");
        scheduler.stop();

        scheduler.start(".");
        assert!(scheduler.is_playing());
        wait_until_idle(&scheduler, Duration::from_secs(5));
    }

    #[test]
    fn test_unknown_symbols_are_skipped() {
        let mut scheduler = Scheduler::new();
        scheduler.toggle_mute();

        // the x's publish their index but take zero time
        scheduler.start("x.x");
        let seen = observe_positions(&scheduler, Duration::from_secs(5));
        assert!(seen.iter().all(|&index| index <= 2));
        assert_eq!(scheduler.position(), None);
    }
}
