//! Speech
//!
//! State machines for text-to-speech and speech-to-text. The engines
//! themselves are capability traits supplied by the host.

pub mod recognition;
pub mod synthesis;

pub use recognition::{
    RecognitionControls, RecognitionErrorKind, RecognitionResult, RecognitionState,
    SpeechRecognizer, SpeechToText, Transcript,
};
pub use synthesis::{
    PlaybackControls, ReadAloud, SpeechSynthesizer, SynthesisState, TextToSpeech, Utterance, Voice,
};

/// Speech error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("Please enter text to speak.")]
    EmptyText,

    #[error("Sorry, your browser doesn't support Speech Recognition. Please try using Chrome, Edge, or Safari.")]
    Unsupported,

    #[error("Speech engine error: {0}")]
    Engine(String),

    #[error("Error starting speech recognition. Please try again.")]
    StartFailed,
}
