//! Playback state machine.
//!
//! [`PlaybackEngine`] is a plain state container. It owns the word list, the
//! read position, play/pause, speed and the presentation flag, and is only
//! ever mutated through its methods. Invalid requests clamp or do nothing.

mod events;
mod playback;

#[cfg(test)]
mod tests;

pub use events::ReaderEvent;
pub use playback::{PlaybackEngine, PlaybackState};

pub const MIN_WPM: u32 = 50;
pub const MAX_WPM: u32 = 1000;
pub const WPM_STEP: u32 = 50;
pub const DEFAULT_WPM: u32 = 350;

/// Words skipped by a single rewind or forward.
pub const SKIP_AMOUNT: usize = 10;

/// Tick period used if speed is ever zero.
pub const FALLBACK_TICK_SECS: f64 = 0.17;
