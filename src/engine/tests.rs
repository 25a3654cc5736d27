use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

fn engine_with(text: &str) -> PlaybackEngine {
    let mut engine = PlaybackEngine::new(DEFAULT_WPM);
    engine.load_text(text);
    engine
}

fn numbered(count: usize) -> String {
    (0..count).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

fn recorder(engine: &mut PlaybackEngine) -> Rc<RefCell<Vec<ReaderEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.subscribe(move |event| sink.borrow_mut().push(*event));
    seen
}

#[test]
fn new_engine_is_idle() {
    let engine = PlaybackEngine::new(DEFAULT_WPM);
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert_eq!(engine.current_word(), "");
    assert_eq!(engine.word_count(), 0);
    assert_eq!(engine.progress(), 0.0);
    assert_eq!(engine.time_remaining_secs(), 0.0);
    assert!(engine.is_at_end());
    assert!(!engine.can_play());
}

#[test]
fn initial_speed_is_clamped() {
    assert_eq!(PlaybackEngine::new(0).speed(), MIN_WPM);
    assert_eq!(PlaybackEngine::new(5000).speed(), MAX_WPM);
    assert_eq!(PlaybackEngine::new(400).speed(), 400);
}

#[test]
fn load_resets_position_and_playback() {
    let mut engine = engine_with(&numbered(30));
    engine.play();
    engine.forward();
    assert!(engine.is_playing());
    assert_eq!(engine.position(), 10);

    engine.load_text("fresh text here");
    assert_eq!(engine.raw_text(), "fresh text here");
    assert_eq!(engine.words(), ["fresh", "text", "here"]);
    assert_eq!(engine.position(), 0);
    assert!(!engine.is_playing());
    assert_eq!(engine.state(), PlaybackState::ReadyPaused);
}

#[test]
fn load_does_not_strip_markdown() {
    let engine = engine_with("**bold** words");
    assert_eq!(engine.current_word(), "**bold**");
}

#[test]
fn fix_formatting_reloads_stripped_text() {
    let mut engine = engine_with("# Title\n\n**bold** words");
    engine.forward();
    engine.fix_formatting();
    assert_eq!(engine.raw_text(), "Title\n\nbold words");
    assert_eq!(engine.words(), ["Title", "bold", "words"]);
    assert_eq!(engine.position(), 0);
}

#[test]
fn loading_empty_text_goes_idle() {
    let mut engine = engine_with("some words");
    engine.load_text("   \n ");
    assert_eq!(engine.state(), PlaybackState::Idle);
    assert_eq!(engine.position(), 0);
}

#[test]
fn play_on_empty_document_is_a_no_op() {
    let mut engine = PlaybackEngine::new(DEFAULT_WPM);
    engine.play();
    assert!(!engine.is_playing());
    engine.toggle_play_pause();
    assert!(!engine.is_playing());
}

#[test]
fn advance_stops_at_the_last_word() {
    let mut engine = engine_with("one two three");
    engine.play();
    engine.advance();
    engine.advance();
    assert_eq!(engine.position(), 2);
    assert!(engine.is_at_end());
    assert!(engine.is_playing());

    engine.advance();
    assert!(!engine.is_playing());
    assert_eq!(engine.position(), 2);
    assert_eq!(engine.state(), PlaybackState::FinishedPaused);
}

#[test]
fn advance_reaches_the_end_in_n_minus_one_ticks() {
    for count in [1, 2, 7, 50] {
        let mut engine = engine_with(&numbered(count));
        engine.play();
        for _ in 0..count - 1 {
            engine.advance();
            assert!(engine.is_playing());
        }
        assert_eq!(engine.position(), count - 1);

        engine.advance();
        assert!(!engine.is_playing());
        assert_eq!(engine.position(), count - 1);
    }
}

#[test]
fn play_at_end_restarts_from_the_top() {
    let mut engine = engine_with("one two three");
    engine.forward();
    assert!(engine.is_at_end());

    engine.play();
    assert_eq!(engine.position(), 0);
    assert!(engine.is_playing());
}

#[test]
fn toggle_switches_between_play_and_pause() {
    let mut engine = engine_with("a b c");
    engine.toggle_play_pause();
    assert_eq!(engine.state(), PlaybackState::Playing);
    engine.toggle_play_pause();
    assert_eq!(engine.state(), PlaybackState::ReadyPaused);
}

#[test]
fn pause_when_paused_changes_nothing() {
    let mut engine = engine_with("a b c");
    let seen = recorder(&mut engine);
    engine.pause();
    assert!(!engine.is_playing());
    assert!(seen.borrow().is_empty());
}

#[test]
fn rewind_and_forward_clamp_to_bounds() {
    let mut engine = engine_with(&numbered(25));
    engine.rewind();
    assert_eq!(engine.position(), 0);

    engine.forward();
    assert_eq!(engine.position(), 10);
    engine.forward();
    assert_eq!(engine.position(), 20);
    engine.forward();
    assert_eq!(engine.position(), 24);

    engine.rewind();
    assert_eq!(engine.position(), 14);
    engine.rewind();
    engine.rewind();
    assert_eq!(engine.position(), 0);
}

#[test]
fn navigation_keeps_play_state() {
    let mut engine = engine_with(&numbered(25));
    engine.play();
    engine.forward();
    engine.rewind();
    assert!(engine.is_playing());
}

#[test]
fn forward_on_empty_document_stays_at_zero() {
    let mut engine = PlaybackEngine::new(DEFAULT_WPM);
    engine.forward();
    engine.advance();
    assert_eq!(engine.position(), 0);
    assert!(!engine.is_playing());
}

#[test]
fn speed_moves_in_steps_within_bounds() {
    let mut engine = PlaybackEngine::new(MIN_WPM);
    engine.speed_down();
    assert_eq!(engine.speed(), MIN_WPM);

    engine.speed_up();
    assert_eq!(engine.speed(), MIN_WPM + WPM_STEP);

    let mut engine = PlaybackEngine::new(MAX_WPM - WPM_STEP);
    engine.speed_up();
    engine.speed_up();
    assert_eq!(engine.speed(), MAX_WPM);
}

#[test]
fn restart_goes_to_the_top_and_pauses() {
    let mut engine = engine_with(&numbered(15));
    engine.play();
    engine.forward();
    engine.restart();
    assert_eq!(engine.position(), 0);
    assert!(!engine.is_playing());
}

#[test]
fn presentation_requires_words() {
    let mut engine = PlaybackEngine::new(DEFAULT_WPM);
    engine.enter_presentation();
    assert!(!engine.is_presented());

    engine.load_text(numbered(20));
    engine.forward();
    engine.play();
    engine.enter_presentation();
    assert!(engine.is_presented());
    assert_eq!(engine.position(), 0);
    assert!(!engine.is_playing());
}

#[test]
fn exit_presentation_pauses_but_keeps_position() {
    let mut engine = engine_with(&numbered(20));
    engine.enter_presentation();
    engine.play();
    engine.advance();
    engine.exit_presentation();
    assert!(!engine.is_presented());
    assert!(!engine.is_playing());
    assert_eq!(engine.position(), 1);
}

#[test]
fn derived_values_follow_position_and_speed() {
    let mut engine = PlaybackEngine::new(300);
    engine.load_text(numbered(10));
    assert_eq!(engine.current_word(), "w0");
    assert!((engine.progress() - 0.1).abs() < 1e-9);
    assert!((engine.tick_interval_secs() - 0.2).abs() < 1e-9);
    assert_eq!(engine.tick_interval(), std::time::Duration::from_millis(200));
    assert!((engine.time_remaining_secs() - 1.8).abs() < 1e-9);

    engine.forward();
    assert_eq!(engine.current_word(), "w9");
    assert_eq!(engine.progress(), 1.0);
    assert_eq!(engine.time_remaining_secs(), 0.0);
}

#[test]
fn listeners_hear_only_real_changes() {
    let mut engine = PlaybackEngine::new(DEFAULT_WPM);
    let seen = recorder(&mut engine);

    engine.load_text("one two three");
    engine.play();
    engine.advance();
    engine.speed_up();
    engine.enter_presentation();
    engine.rewind();

    assert_eq!(
        *seen.borrow(),
        [
            ReaderEvent::TextLoaded { word_count: 3 },
            ReaderEvent::PlaybackChanged { playing: true },
            ReaderEvent::PositionChanged { position: 1 },
            ReaderEvent::SpeedChanged { speed: DEFAULT_WPM + WPM_STEP },
            ReaderEvent::PositionChanged { position: 0 },
            ReaderEvent::PlaybackChanged { playing: false },
            ReaderEvent::PresentationChanged { presented: true },
        ]
    );
}

#[test]
fn auto_stop_is_announced() {
    let mut engine = engine_with("only");
    engine.play();
    let seen = recorder(&mut engine);
    engine.advance();
    assert_eq!(*seen.borrow(), [ReaderEvent::PlaybackChanged { playing: false }]);
}

#[test]
fn random_operation_sequences_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..200 {
        let initial = MIN_WPM + WPM_STEP * rng.random_range(0..=18);
        let mut engine = PlaybackEngine::new(initial);
        let residue = initial % WPM_STEP;

        for _ in 0..300 {
            match rng.random_range(0..14) {
                0 => engine.load_text(numbered(rng.random_range(0..40))),
                1 => engine.play(),
                2 => engine.pause(),
                3 => engine.toggle_play_pause(),
                4 | 5 | 6 => engine.advance(),
                7 => engine.rewind(),
                8 => engine.forward(),
                9 => engine.speed_up(),
                10 => engine.speed_down(),
                11 => engine.restart(),
                12 => engine.enter_presentation(),
                _ => engine.exit_presentation(),
            }

            assert!(
                engine.position() < engine.word_count().max(1),
                "round {round}: position {} of {}",
                engine.position(),
                engine.word_count()
            );
            assert!((MIN_WPM..=MAX_WPM).contains(&engine.speed()));
            assert_eq!(engine.speed() % WPM_STEP, residue);
            if !engine.can_play() {
                assert!(!engine.is_playing());
            }
        }
    }
}
