use std::time::Duration;

use tracing::debug;

use super::events::{Listeners, ReaderEvent};
use super::{FALLBACK_TICK_SECS, MAX_WPM, MIN_WPM, SKIP_AMOUNT, WPM_STEP};
use crate::text::{self, Word};

/// Playback phase derived from the word list, position and play flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    ReadyPaused,
    Playing,
    FinishedPaused,
}

#[derive(Debug)]
pub struct PlaybackEngine {
    raw_text: String,
    words: Vec<Word>,
    position: usize,
    playing: bool,
    speed: u32,
    presented: bool,
    listeners: Listeners,
}

#[derive(Clone, Copy)]
struct Snapshot {
    position: usize,
    playing: bool,
    speed: u32,
    presented: bool,
}

impl PlaybackEngine {
    /// Starts with no text. `initial_speed` is clamped into the allowed range.
    pub fn new(initial_speed: u32) -> Self {
        Self {
            raw_text: String::new(),
            words: Vec::new(),
            position: 0,
            playing: false,
            speed: initial_speed.clamp(MIN_WPM, MAX_WPM),
            presented: false,
            listeners: Listeners::default(),
        }
    }

    /// Registers a callback that runs after each mutation that changes
    /// observable state.
    pub fn subscribe(&mut self, listener: impl FnMut(&ReaderEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn is_presented(&self) -> bool {
        self.presented
    }

    pub fn state(&self) -> PlaybackState {
        if !self.can_play() {
            PlaybackState::Idle
        } else if self.playing {
            PlaybackState::Playing
        } else if self.is_at_end() {
            PlaybackState::FinishedPaused
        } else {
            PlaybackState::ReadyPaused
        }
    }

    /// Empty when there is nothing to show.
    pub fn current_word(&self) -> &str {
        self.words.get(self.position).map_or("", Word::as_str)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Fraction read, counting the current word. 0 for an empty document.
    pub fn progress(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        (self.position + 1) as f64 / self.words.len() as f64
    }

    /// Seconds between ticks at the current speed.
    pub fn tick_interval_secs(&self) -> f64 {
        if self.speed == 0 {
            return FALLBACK_TICK_SECS;
        }
        60.0 / f64::from(self.speed)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.tick_interval_secs())
    }

    /// Seconds left after the current word at the current speed.
    pub fn time_remaining_secs(&self) -> f64 {
        if self.words.is_empty() || self.speed == 0 {
            return 0.0;
        }
        let remaining = self.words.len().saturating_sub(self.position + 1);
        remaining as f64 * 60.0 / f64::from(self.speed)
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.words.len()
    }

    pub fn can_play(&self) -> bool {
        !self.words.is_empty()
    }

    /// Replaces the document. Normalization is the caller's choice; see
    /// [`PlaybackEngine::fix_formatting`].
    pub fn load_text(&mut self, text: impl Into<String>) {
        let before = self.snapshot();

        self.raw_text = text.into();
        self.words = text::tokenize(&self.raw_text);
        self.position = 0;
        self.playing = false;
        debug!(words = self.words.len(), "loaded text");

        let loaded = ReaderEvent::TextLoaded { word_count: self.words.len() };
        self.notify(before, Some(loaded));
    }

    /// Reloads the current text with markdown stripped.
    pub fn fix_formatting(&mut self) {
        let stripped = text::strip(&self.raw_text);
        self.load_text(stripped);
    }

    /// Starts playback. Playing from the last word starts over at the top.
    pub fn play(&mut self) {
        self.mutate(Self::start);
    }

    pub fn pause(&mut self) {
        self.mutate(|engine| engine.playing = false);
    }

    pub fn toggle_play_pause(&mut self) {
        self.mutate(|engine| {
            if engine.playing {
                engine.playing = false;
            } else {
                engine.start();
            }
        });
    }

    /// One tick. Stops at the last word instead of wrapping.
    pub fn advance(&mut self) {
        self.mutate(|engine| {
            if engine.is_at_end() {
                engine.playing = false;
            } else {
                engine.position += 1;
            }
        });
    }

    pub fn rewind(&mut self) {
        self.mutate(|engine| engine.position = engine.position.saturating_sub(SKIP_AMOUNT));
    }

    pub fn forward(&mut self) {
        self.mutate(|engine| {
            let last = engine.words.len().saturating_sub(1);
            engine.position = (engine.position + SKIP_AMOUNT).min(last);
        });
    }

    pub fn speed_up(&mut self) {
        self.mutate(|engine| engine.speed = (engine.speed + WPM_STEP).min(MAX_WPM));
    }

    pub fn speed_down(&mut self) {
        self.mutate(|engine| engine.speed = engine.speed.saturating_sub(WPM_STEP).max(MIN_WPM));
    }

    pub fn restart(&mut self) {
        self.mutate(|engine| {
            engine.position = 0;
            engine.playing = false;
        });
    }

    /// Opens the reading view from the first word. Does nothing without words.
    pub fn enter_presentation(&mut self) {
        self.mutate(|engine| {
            if !engine.can_play() {
                return;
            }
            engine.position = 0;
            engine.playing = false;
            engine.presented = true;
        });
    }

    pub fn exit_presentation(&mut self) {
        self.mutate(|engine| {
            engine.playing = false;
            engine.presented = false;
        });
    }

    fn start(&mut self) {
        if !self.can_play() {
            return;
        }
        if self.is_at_end() {
            self.position = 0;
        }
        self.playing = true;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            playing: self.playing,
            speed: self.speed,
            presented: self.presented,
        }
    }

    /// Applies `change` and tells listeners what moved.
    fn mutate(&mut self, change: impl FnOnce(&mut Self)) {
        let before = self.snapshot();
        change(self);
        self.notify(before, None);
    }

    fn notify(&mut self, before: Snapshot, loaded: Option<ReaderEvent>) {
        let after = self.snapshot();
        let mut events = Vec::with_capacity(5);

        events.extend(loaded);
        if after.position != before.position {
            events.push(ReaderEvent::PositionChanged { position: after.position });
        }
        if after.playing != before.playing {
            events.push(ReaderEvent::PlaybackChanged { playing: after.playing });
        }
        if after.speed != before.speed {
            debug!(speed = after.speed, "speed changed");
            events.push(ReaderEvent::SpeedChanged { speed: after.speed });
        }
        if after.presented != before.presented {
            debug!(presented = after.presented, "presentation changed");
            events.push(ReaderEvent::PresentationChanged { presented: after.presented });
        }

        for event in events {
            self.listeners.emit(event);
        }
    }
}
