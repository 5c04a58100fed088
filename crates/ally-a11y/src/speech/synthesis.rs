//! Text-to-Speech
//!
//! Idle/Speaking/Paused playback over a host speech synthesizer.

use super::SpeechError;

pub const MIN_RATE: f64 = 0.1;
pub const MAX_RATE: f64 = 10.0;
pub const MIN_PITCH: f64 = 0.0;
pub const MAX_PITCH: f64 = 2.0;

/// User-facing message when the engine reports an error mid-utterance
pub const SPEAK_FAILED: &str = "An error occurred while speaking. Please try again.";

/// A voice offered by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: &str, lang: &str) -> Self {
        Self { name: name.to_string(), lang: lang.to_string() }
    }

    /// Option label, e.g. `Samantha (en-US)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.lang)
    }
}

/// Index of the first voice whose language mentions English
pub fn english_voice(voices: &[Voice]) -> Option<usize> {
    voices.iter().position(|v| v.lang.contains("en"))
}

/// Text plus delivery options
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Index into the engine's voice list
    pub voice: Option<usize>,
    pub rate: f64,
    pub pitch: f64,
}

impl Utterance {
    /// Trimmed text; empty text is rejected
    pub fn new(text: &str) -> Result<Self, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }
        Ok(Self { text: text.to_string(), voice: None, rate: 1.0, pitch: 1.0 })
    }

    pub fn with_voice(mut self, voice: Option<usize>) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate.clamp(MIN_RATE, MAX_RATE);
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);
        self
    }
}

/// Host speech synthesis engine
pub trait SpeechSynthesizer {
    fn voices(&self) -> Vec<Voice>;
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn cancel(&mut self);
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthesisState {
    #[default]
    Idle,
    Speaking,
    Paused,
}

/// Which playback buttons are usable, and the pause button's label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackControls {
    pub play: bool,
    pub pause: bool,
    pub stop: bool,
    pub pause_label: &'static str,
}

/// Result of a read-aloud toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAloud {
    Started,
    Stopped,
}

impl ReadAloud {
    /// Button label after the toggle
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Started => "Stop Reading",
            Self::Stopped => "Read Aloud",
        }
    }
}

/// Text-to-speech controller
#[derive(Debug)]
pub struct TextToSpeech<E> {
    engine: E,
    state: SynthesisState,
}

impl<E: SpeechSynthesizer> TextToSpeech<E> {
    pub fn new(engine: E) -> Self {
        Self { engine, state: SynthesisState::Idle }
    }

    pub fn state(&self) -> SynthesisState { self.state }
    pub fn engine(&self) -> &E { &self.engine }
    pub fn engine_mut(&mut self) -> &mut E { &mut self.engine }

    /// Speak an utterance, cancelling anything already in progress
    pub fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        if self.state != SynthesisState::Idle {
            self.engine.cancel();
            self.state = SynthesisState::Idle;
        }

        let voice_count = self.engine.voices().len();
        let mut utterance = utterance.clone();
        if utterance.voice.is_some_and(|i| i >= voice_count) {
            utterance.voice = None;
        }

        self.engine.speak(&utterance)?;
        self.state = SynthesisState::Speaking;
        tracing::debug!(chars = utterance.text.len(), rate = utterance.rate, pitch = utterance.pitch, "speaking");
        Ok(())
    }

    /// Pause while speaking, resume while paused
    pub fn toggle_pause(&mut self) -> SynthesisState {
        self.state = match self.state {
            SynthesisState::Speaking => {
                self.engine.pause();
                SynthesisState::Paused
            }
            SynthesisState::Paused => {
                self.engine.resume();
                SynthesisState::Speaking
            }
            SynthesisState::Idle => SynthesisState::Idle,
        };
        self.state
    }

    pub fn stop(&mut self) {
        if self.state != SynthesisState::Idle {
            self.engine.cancel();
            self.state = SynthesisState::Idle;
        }
    }

    /// Engine finished the utterance
    pub fn on_end(&mut self) {
        self.state = SynthesisState::Idle;
    }

    /// Engine reported an error; returns the message to show
    pub fn on_error(&mut self, error: &str) -> &'static str {
        tracing::error!("speech synthesis error: {}", error);
        self.state = SynthesisState::Idle;
        SPEAK_FAILED
    }

    /// Read text aloud with an English voice, or stop if already speaking
    pub fn toggle_read_aloud(&mut self, text: &str) -> Result<ReadAloud, SpeechError> {
        if self.state != SynthesisState::Idle {
            self.stop();
            return Ok(ReadAloud::Stopped);
        }
        let voice = english_voice(&self.engine.voices());
        self.speak(&Utterance::new(text)?.with_voice(voice))?;
        Ok(ReadAloud::Started)
    }

    pub fn controls(&self) -> PlaybackControls {
        let idle = self.state == SynthesisState::Idle;
        PlaybackControls {
            play: idle,
            pause: !idle,
            stop: !idle,
            pause_label: if self.state == SynthesisState::Paused { "Resume" } else { "Pause" },
        }
    }
}
