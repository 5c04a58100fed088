//! Speech-to-Text
//!
//! Idle/Listening recognition over a host recognizer, with a transcript that
//! keeps final results and the latest interim guess apart.

use super::SpeechError;

pub const DEFAULT_TITLE: &str = "Accessibility Assistant";
pub const RECORDING_TITLE: &str = "🔴 Recording... - Speech to Text";

/// Host speech recognition engine (continuous, with interim results)
pub trait SpeechRecognizer {
    /// Whether the host provides recognition at all
    fn is_available(&self) -> bool { true }
    fn start(&mut self, lang: &str) -> Result<(), SpeechError>;
    fn stop(&mut self);
}

/// Recognition state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecognitionState {
    #[default]
    Idle,
    Listening,
}

/// One recognition result delivered by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub transcript: String,
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn interim(text: &str) -> Self { Self { transcript: text.to_string(), is_final: false } }
    pub fn final_text(text: &str) -> Self { Self { transcript: text.to_string(), is_final: true } }
}

/// Engine error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionErrorKind {
    NoSpeech,
    AudioCapture,
    NotAllowed,
    Network,
    Other(String),
}

impl RecognitionErrorKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => Self::NoSpeech,
            "audio-capture" => Self::AudioCapture,
            "not-allowed" => Self::NotAllowed,
            "network" => Self::Network,
            other => Self::Other(other.to_string()),
        }
    }

    /// Message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoSpeech => "No speech was detected. Please try again.",
            Self::AudioCapture => "No microphone was found. Ensure that a microphone is installed and configured correctly.",
            Self::NotAllowed => "Permission to use microphone was denied. Please allow microphone access and try again.",
            Self::Network => "Network error occurred. Please check your internet connection.",
            Self::Other(_) => "An error occurred with speech recognition.",
        }
    }
}

/// Accumulated transcript
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    final_text: String,
    interim: String,
}

impl Transcript {
    pub fn new() -> Self { Self::default() }

    /// Fold a batch of results in. Final results are appended with a trailing
    /// space; interim results replace the previous interim text.
    pub fn apply(&mut self, results: &[RecognitionResult]) {
        self.interim.clear();
        for result in results {
            if result.is_final {
                self.final_text.push_str(&result.transcript);
                self.final_text.push(' ');
            } else {
                self.interim.push_str(&result.transcript);
            }
        }
    }

    /// Visible text: final followed by interim
    pub fn text(&self) -> String {
        format!("{}{}", self.final_text, self.interim)
    }

    pub fn final_text(&self) -> &str { &self.final_text }
    pub fn interim(&self) -> &str { &self.interim }

    pub fn has_text(&self) -> bool { !self.text().trim().is_empty() }

    pub fn clear(&mut self) {
        self.final_text.clear();
        self.interim.clear();
    }
}

/// Which recognition controls are usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionControls {
    pub start: bool,
    pub stop: bool,
    pub language: bool,
    pub copy: bool,
    pub clear: bool,
    pub recording_indicator: bool,
    pub title: &'static str,
}

/// Speech-to-text controller
#[derive(Debug)]
pub struct SpeechToText<R> {
    engine: R,
    state: RecognitionState,
    lang: String,
    transcript: Transcript,
}

impl<R: SpeechRecognizer> SpeechToText<R> {
    pub fn new(engine: R, lang: &str) -> Self {
        Self { engine, state: RecognitionState::Idle, lang: lang.to_string(), transcript: Transcript::new() }
    }

    pub fn state(&self) -> RecognitionState { self.state }
    pub fn language(&self) -> &str { &self.lang }
    pub fn transcript(&self) -> &Transcript { &self.transcript }
    pub fn engine(&self) -> &R { &self.engine }

    /// Begin listening; a no-op while already listening
    pub fn start(&mut self) -> Result<(), SpeechError> {
        if self.state == RecognitionState::Listening {
            return Ok(());
        }
        if !self.engine.is_available() {
            tracing::warn!("speech recognition is not available");
            return Err(SpeechError::Unsupported);
        }
        self.engine.start(&self.lang).map_err(|e| {
            tracing::error!("recognition start error: {}", e);
            SpeechError::StartFailed
        })?;
        self.state = RecognitionState::Listening;
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.state == RecognitionState::Listening {
            self.engine.stop();
            self.state = RecognitionState::Idle;
        }
    }

    /// Engine ended the session on its own
    pub fn on_end(&mut self) {
        self.state = RecognitionState::Idle;
    }

    /// Engine reported an error; recognition stops
    pub fn on_error(&mut self, code: &str) -> RecognitionErrorKind {
        tracing::error!("recognition error: {}", code);
        self.state = RecognitionState::Idle;
        RecognitionErrorKind::from_code(code)
    }

    pub fn on_results(&mut self, results: &[RecognitionResult]) {
        self.transcript.apply(results);
    }

    /// Switch language, restarting recognition if it is running
    pub fn set_language(&mut self, lang: &str) -> Result<(), SpeechError> {
        self.lang = lang.to_string();
        if self.state == RecognitionState::Listening {
            self.engine.stop();
            self.state = RecognitionState::Idle;
            self.start()?;
        }
        Ok(())
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    pub fn controls(&self) -> RecognitionControls {
        let listening = self.state == RecognitionState::Listening;
        let has_text = self.transcript.has_text();
        RecognitionControls {
            start: !listening,
            stop: listening,
            language: !listening,
            copy: has_text,
            clear: has_text,
            recording_indicator: listening,
            title: if listening { RECORDING_TITLE } else { DEFAULT_TITLE },
        }
    }
}
