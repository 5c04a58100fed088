//! Ally Accessibility
//!
//! Display preferences and the local logic of the Ally accessibility assistant.
//!
//! Features:
//! - Preference record with a key-value store adapter
//! - Idempotent application to a display target
//! - WCAG contrast checking
//! - Light/dark theme resolution
//! - Screen reader announcements
//! - Text-to-speech and speech-to-text state machines
//! - Dyslexia-friendly text formatting

pub mod announcer;
pub mod applicator;
pub mod contrast;
pub mod display;
pub mod dyslexic;
pub mod preferences;
pub mod speech;
pub mod store;
pub mod theme;

// Core exports
pub use announcer::{Announcement, Announcer, Politeness};
pub use applicator::{apply_preferences, initialize, save_and_apply, toggle_dark_mode, Startup};
pub use contrast::{
    check_pair, contrast_ratio, evaluate, is_sufficient, parse_color, relative_luminance,
    Color, ContrastResult, ParseColorError, WcagLevel, SUFFICIENT_RATIO,
};
pub use display::{DisplayTarget, DocumentState};
pub use dyslexic::{format_text, read_text_file, FontFamily, FormatError, FormatStyle, FormattedText};
pub use preferences::{PreferenceRecord, PreferenceUpdate, TextSize};
pub use speech::{SpeechError, SpeechRecognizer, SpeechSynthesizer, SpeechToText, TextToSpeech};
pub use store::{
    FileStore, KeyValueStore, MemoryStore, PreferenceStore, StoreError, PREFERENCES_KEY,
    PREFERENCES_SEEN_KEY,
};
pub use theme::{resolve_theme, toggle_theme, ColorScheme, Theme};

/// Accessibility error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    #[error("Formatting error: {0}")]
    Format(#[from] FormatError),

    #[error("Invalid color: {0}")]
    Color(#[from] ParseColorError),
}
