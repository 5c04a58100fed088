//! Edge case tests for ally-a11y
//!
//! Tampered records, theme toggling without a record, and speech controls.

use ally_a11y::speech::{
    RecognitionResult, RecognitionState, SynthesisState, Utterance, Voice,
};
use ally_a11y::*;

// ============================================================================
// STORED RECORD TAMPERING
// ============================================================================

fn load_raw(raw: &str) -> Option<PreferenceRecord> {
    let mut store = MemoryStore::new();
    store.set(PREFERENCES_KEY, raw).unwrap();
    PreferenceStore::new(store).load()
}

#[test]
fn test_out_of_range_text_size_snaps() {
    let cases = [
        ("130", TextSize::Percent120),
        ("0", TextSize::Percent100),
        ("-40", TextSize::Percent100),
        ("10000", TextSize::Percent200),
        ("199", TextSize::Percent180),
        ("150.5", TextSize::Percent140),
        ("\"150.5\"", TextSize::Percent140),
        ("\" 210.0 \"", TextSize::Percent200),
    ];
    for (raw, expected) in cases {
        let record = load_raw(&format!(r#"{{"screenReader":false,"highContrast":false,"textSize":{raw}}}"#))
            .expect("record still usable");
        assert_eq!(record.text_size, expected, "textSize {raw}");
    }
}

#[test]
fn test_unusable_records() {
    for raw in ["", "null", "42", "\"text\"", "{\"textSize\":\"huge\"}", "{\"highContrast\":\"yes\"}"] {
        assert!(load_raw(raw).is_none(), "{raw:?}");
    }
}

#[test]
fn test_fractional_string_keeps_other_fields() {
    let record = load_raw(r#"{"screenReader":true,"highContrast":true,"darkMode":true,"textSize":"150.5"}"#)
        .expect("record still usable");
    assert!(record.screen_reader && record.high_contrast);
    assert_eq!(record.dark_mode, Some(true));
    assert_eq!(record.text_size, TextSize::Percent140);
}

#[test]
fn test_non_finite_string_is_unusable() {
    assert!(load_raw(r#"{"textSize":"NaN"}"#).is_none());
    assert!(load_raw(r#"{"textSize":"inf"}"#).is_none());
}

#[test]
fn test_null_dark_mode_is_unset() {
    let record = load_raw(r#"{"screenReader":true,"highContrast":false,"darkMode":null,"textSize":120}"#).unwrap();
    assert_eq!(record.dark_mode, None);
}

#[test]
fn test_tampered_record_applies_cleanly() {
    let record = load_raw(r#"{"screenReader":false,"highContrast":true,"textSize":"155"}"#).unwrap();
    let mut doc = DocumentState::new();
    apply_preferences(&record, &mut doc);
    assert_eq!(doc.text_size(), TextSize::Percent140);
}

// ============================================================================
// THEME TOGGLE
// ============================================================================

#[test]
fn test_toggle_without_record_is_not_persisted() {
    let mut prefs = PreferenceStore::default();
    let mut doc = DocumentState::new();
    let theme = toggle_dark_mode(&mut prefs, &mut doc, Theme::Dark).unwrap();
    assert_eq!(theme, Theme::Light);
    assert_eq!(doc.theme(), Some(Theme::Light));
    assert!(prefs.load().is_none());
}

#[test]
fn test_screen_reader_flag_is_one_way() {
    let mut doc = DocumentState::new();
    apply_preferences(&PreferenceRecord::new().with_screen_reader(true), &mut doc);
    apply_preferences(&PreferenceRecord::new().with_screen_reader(false), &mut doc);
    assert!(doc.screen_reader_hints());
}

// ============================================================================
// SPEECH
// ============================================================================

#[derive(Debug, Default)]
struct SilentSynth {
    spoken: usize,
    cancelled: usize,
}

impl SpeechSynthesizer for SilentSynth {
    fn voices(&self) -> Vec<Voice> { Vec::new() }
    fn speak(&mut self, _utterance: &Utterance) -> Result<(), SpeechError> {
        self.spoken += 1;
        Ok(())
    }
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn cancel(&mut self) { self.cancelled += 1; }
}

#[test]
fn test_speak_while_speaking_cancels_first() {
    let mut tts = TextToSpeech::new(SilentSynth::default());
    tts.speak(&Utterance::new("one").unwrap()).unwrap();
    tts.speak(&Utterance::new("two").unwrap()).unwrap();
    assert_eq!(tts.engine().spoken, 2);
    assert_eq!(tts.engine().cancelled, 1);
}

#[test]
fn test_out_of_range_voice_dropped() {
    let mut tts = TextToSpeech::new(SilentSynth::default());
    tts.speak(&Utterance::new("hi").unwrap().with_voice(Some(3))).unwrap();
    assert_eq!(tts.state(), SynthesisState::Speaking);
}

#[test]
fn test_pause_when_idle_is_noop() {
    let mut tts = TextToSpeech::new(SilentSynth::default());
    assert_eq!(tts.toggle_pause(), SynthesisState::Idle);
    let controls = tts.controls();
    assert!(controls.play && !controls.pause && !controls.stop);
}

#[test]
fn test_engine_error_resets() {
    let mut tts = TextToSpeech::new(SilentSynth::default());
    tts.speak(&Utterance::new("hi").unwrap()).unwrap();
    let message = tts.on_error("synthesis-failed");
    assert_eq!(message, "An error occurred while speaking. Please try again.");
    assert_eq!(tts.state(), SynthesisState::Idle);
}

#[derive(Debug, Default)]
struct NullMic;

impl SpeechRecognizer for NullMic {
    fn start(&mut self, _lang: &str) -> Result<(), SpeechError> { Ok(()) }
    fn stop(&mut self) {}
}

#[test]
fn test_recognition_controls_follow_state() {
    let mut stt = SpeechToText::new(NullMic, "en-US");
    assert!(!stt.controls().copy);

    stt.start().unwrap();
    stt.on_results(&[RecognitionResult::interim("  ")]);
    let controls = stt.controls();
    assert!(controls.stop && !controls.start && !controls.language);
    assert!(!controls.copy, "whitespace only");

    stt.on_results(&[RecognitionResult::final_text("done")]);
    stt.on_end();
    assert_eq!(stt.state(), RecognitionState::Idle);
    assert!(stt.controls().clear);

    stt.clear_transcript();
    assert_eq!(stt.transcript().text(), "");
}

// ============================================================================
// FORMATTER
// ============================================================================

#[test]
fn test_single_paragraph_no_newlines() {
    let formatted = format_text("   just one   ", &FormatStyle::default()).unwrap();
    assert_eq!(formatted.paragraphs, ["just one"]);
    assert!(formatted.warning().is_none());
}

#[test]
fn test_shorthand_color_skips_warning() {
    let style = FormatStyle {
        text_color: "#eee".into(),
        background_color: "#fff".into(),
        ..Default::default()
    };
    assert!(format_text("x", &style).unwrap().warning().is_none());
}
