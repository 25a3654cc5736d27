//! Reading engine for rapid serial visual presentation.
//!
//! Text goes in through [`text::markdown::strip`] (optional) and
//! [`text::tokenizer::tokenize`], and is played back one word at a time by
//! [`engine::PlaybackEngine`]. The engine holds no timers; the host drives
//! [`engine::PlaybackEngine::advance`] at [`engine::PlaybackEngine::tick_interval`].

pub mod engine;
pub mod text;
