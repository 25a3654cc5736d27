use crate::config::{AppConfig, Theme};
use crate::ticker::Ticker;
use anyhow::{Context, Result};
use readfast::engine::{PlaybackEngine, ReaderEvent};
use readfast::text;
use rust_embed::RustEmbed;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use textwrap::Options;
use tracing::{debug, info};

#[derive(RustEmbed)]
#[folder = "resources/"]
struct Asset;

/// Upper bound on how long the loop sleeps waiting for input.
const FRAME: Duration = Duration::from_millis(16);

pub struct App {
    pub should_quit: bool,
    pub reader: PlaybackEngine,
    pub theme: Theme,
    pub auto_strip_on_paste: bool,
    pub status: Option<String>,

    pub terminal_width: u16,
    pub terminal_height: u16,
    pub visual_lines: Vec<String>,

    intro_text: String,
    ticker: Ticker,
    events: Receiver<ReaderEvent>,
}

impl App {
    pub fn new(config: &AppConfig, initial_wpm: u32) -> Result<Self> {
        let intro_file = Asset::get("intro.txt").context("Could not find embedded intro text")?;
        let intro_text = std::str::from_utf8(intro_file.data.as_ref())?.to_string();

        let mut reader = PlaybackEngine::new(initial_wpm);
        let (tx, events) = mpsc::channel();
        reader.subscribe(move |event| {
            let _ = tx.send(*event);
        });
        let ticker = Ticker::new(reader.tick_interval());

        info!(wpm = reader.speed(), "session started");

        Ok(Self {
            should_quit: false,
            reader,
            theme: config.theme.clone(),
            auto_strip_on_paste: config.reader.auto_strip_on_paste,
            status: None,
            terminal_width: 80,
            terminal_height: 24,
            visual_lines: Vec::new(),
            intro_text,
            ticker,
            events,
        })
    }

    pub fn quit(&mut self) { self.should_quit = true; }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.recalculate_lines();
    }

    /// Lines are re-wrapped when the resulting `TextLoaded` event is synced.
    pub fn load_text(&mut self, text: String) {
        self.reader.load_text(text);
    }

    /// How long the loop may block on input before the next tick is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.ticker
            .time_until_fire(now)
            .map_or(FRAME, |until| until.min(FRAME))
    }

    /// Keeps the ticker in step with the engine and fires a due tick.
    pub fn update(&mut self, now: Instant) {
        self.sync(now);
        if self.ticker.fire_if_due(now) {
            self.reader.advance();
            self.sync(now);
        }
    }

    fn sync(&mut self, now: Instant) {
        let pending: Vec<ReaderEvent> = self.events.try_iter().collect();
        for event in pending {
            match event {
                ReaderEvent::PlaybackChanged { playing: true } => {
                    self.ticker.reschedule(self.reader.tick_interval(), now);
                    self.ticker.start(now);
                }
                ReaderEvent::PlaybackChanged { playing: false } => self.ticker.stop(),
                ReaderEvent::SpeedChanged { speed } => {
                    self.ticker.reschedule(self.reader.tick_interval(), now);
                    debug!(speed, interval = ?self.ticker.interval(), "rescheduled ticker");
                }
                ReaderEvent::TextLoaded { .. } => self.recalculate_lines(),
                _ => {}
            }
        }
    }

    // editor

    pub fn on_char(&mut self, c: char) {
        let mut text = self.reader.raw_text().to_string();
        text.push(c);
        self.edit(text);
    }

    pub fn on_backspace(&mut self) {
        let mut text = self.reader.raw_text().to_string();
        if text.pop().is_some() {
            self.edit(text);
        }
    }

    pub fn on_paste(&mut self, pasted: &str) {
        let mut text = self.reader.raw_text().to_string();
        if self.auto_strip_on_paste {
            text.push_str(&text::strip(pasted));
        } else {
            text.push_str(pasted);
        }
        self.edit(text);
    }

    pub fn fix_formatting(&mut self) {
        if self.reader.raw_text().is_empty() {
            return;
        }
        self.reader.fix_formatting();
        self.status = Some("formatting fixed".to_string());
    }

    /// Fills an empty editor with the embedded walkthrough text.
    pub fn get_started(&mut self) {
        if self.reader.raw_text().is_empty() {
            self.edit(self.intro_text.clone());
        }
    }

    pub fn start_reading(&mut self) {
        if !self.reader.can_play() {
            self.status = Some("nothing to read yet".to_string());
            return;
        }
        self.status = None;
        self.reader.enter_presentation();
    }

    fn edit(&mut self, text: String) {
        self.status = None;
        self.load_text(text);
    }

    fn recalculate_lines(&mut self) {
        let layout_width = (self.terminal_width as usize * 80) / 100;
        let safe_width = layout_width.saturating_sub(2).max(1);
        let options = Options::new(safe_width);
        let lines = textwrap::wrap(self.reader.raw_text(), options);
        self.visual_lines = lines.into_iter().map(|c| c.into_owned()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readfast::engine::{DEFAULT_WPM, MAX_WPM};

    fn app() -> App {
        App::new(&AppConfig::default(), DEFAULT_WPM).unwrap()
    }

    #[test]
    fn typing_rebuilds_the_word_list() {
        let mut app = app();
        for c in "hi there".chars() {
            app.on_char(c);
        }
        assert_eq!(app.reader.words(), ["hi", "there"]);

        app.on_backspace();
        app.on_backspace();
        assert_eq!(app.reader.raw_text(), "hi the");
        assert_eq!(app.reader.word_count(), 2);
    }

    #[test]
    fn backspace_on_empty_editor_is_harmless() {
        let mut app = app();
        app.on_backspace();
        assert!(app.reader.raw_text().is_empty());
    }

    #[test]
    fn paste_strips_markdown_when_enabled() {
        let mut app = app();
        app.on_paste("**Hello** _world_!");
        assert_eq!(app.reader.raw_text(), "Hello world!");
    }

    #[test]
    fn paste_keeps_markdown_when_disabled() {
        let mut config = AppConfig::default();
        config.reader.auto_strip_on_paste = false;
        let mut app = App::new(&config, DEFAULT_WPM).unwrap();
        app.on_paste("**Hello**");
        assert_eq!(app.reader.raw_text(), "**Hello**");
    }

    #[test]
    fn fix_formatting_strips_typed_markdown() {
        let mut app = app();
        app.load_text("# Title\n\n- item".to_string());
        app.fix_formatting();
        assert_eq!(app.reader.raw_text(), "Title\n\nitem");
        assert!(app.status.is_some());
    }

    #[test]
    fn get_started_only_fills_an_empty_editor() {
        let mut app = app();
        app.get_started();
        assert!(app.reader.raw_text().starts_with("Speed reading"));

        app.load_text("mine".to_string());
        app.get_started();
        assert_eq!(app.reader.raw_text(), "mine");
    }

    #[test]
    fn start_reading_needs_words() {
        let mut app = app();
        app.start_reading();
        assert!(!app.reader.is_presented());
        assert!(app.status.is_some());

        app.on_paste("one two");
        app.start_reading();
        assert!(app.reader.is_presented());
        assert!(app.status.is_none());
    }

    #[test]
    fn ticks_advance_while_playing() {
        let mut app = app();
        app.load_text("one two three".to_string());
        app.start_reading();

        let t0 = Instant::now();
        app.reader.play();
        app.update(t0);
        assert_eq!(app.reader.position(), 0);

        let interval = app.reader.tick_interval();
        app.update(t0 + interval);
        assert_eq!(app.reader.position(), 1);
        app.update(t0 + interval * 2);
        assert_eq!(app.reader.position(), 2);

        app.update(t0 + interval * 3);
        assert!(!app.reader.is_playing());
        assert_eq!(app.reader.position(), 2);
        assert_eq!(app.poll_timeout(t0 + interval * 3), FRAME);
    }

    #[test]
    fn pause_stops_the_ticker() {
        let mut app = app();
        app.load_text("one two three".to_string());
        let t0 = Instant::now();
        app.reader.play();
        app.update(t0);
        app.reader.pause();
        app.update(t0);

        app.update(t0 + Duration::from_secs(5));
        assert_eq!(app.reader.position(), 0);
    }

    #[test]
    fn speed_change_reschedules_the_ticker() {
        let mut app = App::new(&AppConfig::default(), MAX_WPM - 50).unwrap();
        app.load_text("a b c d e f".to_string());
        let t0 = Instant::now();
        app.reader.play();
        app.update(t0);

        let t1 = t0 + Duration::from_millis(10);
        app.reader.speed_up();
        app.update(t1);
        assert_eq!(app.poll_timeout(t1), Duration::from_millis(16));

        app.update(t1 + Duration::from_millis(60));
        assert_eq!(app.reader.position(), 1);
    }

    #[test]
    fn wraps_text_to_the_terminal_width() {
        let mut app = app();
        app.resize(20, 10);
        app.load_text("alpha beta gamma delta\nepsilon".to_string());
        assert!(app.visual_lines.is_empty());

        app.update(Instant::now());
        assert_eq!(app.visual_lines, ["alpha beta", "gamma delta", "epsilon"]);
    }
}
