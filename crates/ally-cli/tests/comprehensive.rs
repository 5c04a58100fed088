//! Comprehensive tests for ally-cli
//!
//! Runs whole commands against a preference store in the temp directory.

use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;

use ally_cli::{execute, AllyConfig, Cli};
use clap::Parser;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ally-cli-{}-{}", std::process::id(), name));
    let _ = fs::remove_file(&path);
    path
}

fn config_for(store: &str) -> AllyConfig {
    AllyConfig { store: temp_path(store), ..AllyConfig::default() }
}

fn run(config: &AllyConfig, args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("ally").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    execute(cli.command, config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

// ============================================================================
// CONTRAST
// ============================================================================

#[test]
fn test_contrast_black_on_white() {
    let output = run(&AllyConfig::default(), &["contrast", "#000000", "FFFFFF"]).unwrap();
    assert!(output.contains("Contrast ratio: 21.00:1"));
    assert!(output.contains("WCAG level: AAA"));
    assert!(output.contains("Sufficient: yes"));
}

#[test]
fn test_contrast_grey_large_text() {
    let output = run(&AllyConfig::default(), &["contrast", "#949494", "#ffffff", "--large-text"]).unwrap();
    assert!(output.contains("WCAG level: AA"));
    assert!(output.contains("Sufficient: no"));
}

#[test]
fn test_contrast_bad_color() {
    let err = run(&AllyConfig::default(), &["contrast", "red", "#ffffff"]).unwrap_err();
    assert!(err.to_string().contains("Invalid color"));
}

// ============================================================================
// PREFERENCES
// ============================================================================

#[test]
fn test_set_show_apply() {
    let config = config_for("prefs.json");

    assert_eq!(run(&config, &["prefs", "show"]).unwrap().trim(), "No saved preferences");

    let output = run(
        &config,
        &["prefs", "set", "--high-contrast", "true", "--dark-mode", "true", "--text-size", "160"],
    )
    .unwrap();
    assert!(output.contains(r#"<html data-bs-theme="dark"><body class="high-contrast text-size-160">"#));

    let shown = run(&config, &["prefs", "show"]).unwrap();
    assert_eq!(
        shown.trim(),
        r#"{"screenReader":false,"highContrast":true,"darkMode":true,"textSize":160}"#
    );

    // Saved and seen: startup applies without the dialog
    let applied = run(&config, &["prefs", "apply"]).unwrap();
    assert!(!applied.contains("First visit"));
    assert!(applied.contains("text-size-160"));
    assert!(applied.contains(r#"data-bs-theme="dark""#));

    fs::remove_file(&config.store).unwrap();
}

#[test]
fn test_set_merges_into_existing() {
    let config = config_for("merge.json");
    run(&config, &["prefs", "set", "--text-size", "180"]).unwrap();
    run(&config, &["prefs", "set", "--high-contrast", "on"]).unwrap();

    let shown = run(&config, &["prefs", "show"]).unwrap();
    assert!(shown.contains(r#""highContrast":true"#));
    assert!(shown.contains(r#""textSize":180"#));
    assert!(!shown.contains("darkMode"));

    fs::remove_file(&config.store).unwrap();
}

#[test]
fn test_set_without_options_fails() {
    let config = config_for("empty-set.json");
    assert!(run(&config, &["prefs", "set"]).is_err());
    assert!(!config.store.exists());
}

#[test]
fn test_first_visit_then_clear() {
    let config = config_for("first.json");

    let first = run(&config, &["prefs", "apply", "--system-dark"]).unwrap();
    assert!(first.contains("First visit: preferences dialog shown"));
    assert!(first.contains(r#"data-bs-theme="dark""#));

    let second = run(&config, &["prefs", "apply"]).unwrap();
    assert!(second.contains("No saved preferences"));
    assert!(second.contains(r#"data-bs-theme="light""#));

    run(&config, &["prefs", "set", "--screen-reader", "yes"]).unwrap();
    assert_eq!(run(&config, &["prefs", "clear"]).unwrap().trim(), "Preferences cleared");
    assert_eq!(run(&config, &["prefs", "show"]).unwrap().trim(), "No saved preferences");

    fs::remove_file(&config.store).unwrap();
}

#[test]
fn test_screen_reader_announced_on_apply() {
    let config = config_for("reader.json");
    let output = run(&config, &["prefs", "set", "--screen-reader", "true"]).unwrap();
    assert!(output.contains("keyboard-focus"));
    assert!(output.contains("[polite] Screen reader mode is now active"));

    fs::remove_file(&config.store).unwrap();
}

// ============================================================================
// THEME
// ============================================================================

#[test]
fn test_toggle_persists_into_record() {
    let config = config_for("toggle.json");
    run(&config, &["prefs", "set", "--dark-mode", "false"]).unwrap();

    let output = run(&config, &["theme", "toggle"]).unwrap();
    assert!(output.contains("Theme: dark"));
    assert!(output.contains("Button: Switch to light mode"));
    assert!(!output.contains("Not saved"));

    assert!(run(&config, &["theme", "show"]).unwrap().contains("Theme: dark"));
    assert!(run(&config, &["prefs", "show"]).unwrap().contains(r#""darkMode":true"#));

    fs::remove_file(&config.store).unwrap();
}

#[test]
fn test_toggle_without_record() {
    let config = config_for("toggle-none.json");
    let output = run(&config, &["theme", "toggle", "--system-dark"]).unwrap();
    assert!(output.contains("Theme: light"));
    assert!(output.contains("Not saved: no saved preferences"));
    assert!(run(&config, &["theme", "show"]).unwrap().contains("Theme: light"));
}

// ============================================================================
// FORMAT
// ============================================================================

#[test]
fn test_format_plain_text() {
    let config = config_for("format.json");
    let input = temp_path("story.txt");
    fs::write(&input, "First line.\n\n\n  Second line.  \n").unwrap();

    let output = run(&config, &["format", input.to_str().unwrap()]).unwrap();
    assert_eq!(output, "First line.\n\n  Second line.\n");

    fs::remove_file(&input).unwrap();
}

#[test]
fn test_format_low_contrast_warns() {
    let config = config_for("format-warn.json");
    let input = temp_path("warn.txt");
    fs::write(&input, "Hard to read").unwrap();

    let path = input.to_str().unwrap();
    let output = run(&config, &["format", path, "--color", "#aaaaaa", "--background", "#ffffff"]).unwrap();
    assert!(output.contains("insufficient contrast"));

    let html = run(&config, &["format", path, "--preset", "sepia", "--html"]).unwrap();
    assert!(html.starts_with("<div class=\"text-preview\""));
    assert!(html.contains("<p>Hard to read</p>"));
    assert!(!html.contains("alert-warning"));

    fs::remove_file(&input).unwrap();
}

#[test]
fn test_format_announces_with_screen_reader() {
    let config = config_for("format-sr.json");
    run(&config, &["prefs", "set", "--screen-reader", "true"]).unwrap();

    let input = temp_path("announce.txt");
    fs::write(&input, "Hello").unwrap();

    let output = run(&config, &["format", input.to_str().unwrap()]).unwrap();
    assert!(output.ends_with("[polite] Text formatting applied\n"));

    fs::remove_file(&input).unwrap();
    fs::remove_file(&config.store).unwrap();
}

#[test]
fn test_format_rejects_other_files() {
    let config = config_for("format-bad.json");
    let input = temp_path("page.html");
    fs::write(&input, "<p>hi</p>").unwrap();

    let err = run(&config, &["format", input.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("only text files"));

    fs::remove_file(&input).unwrap();
}

// ============================================================================
// DESCRIBE
// ============================================================================

#[test]
fn test_describe_rejects_non_image() {
    let config = config_for("describe.json");
    let err = run(&config, &["describe", "notes.txt"]).unwrap_err();
    assert_eq!(err.to_string(), "Please upload an image file (jpg, png, etc.)");
}

#[test]
fn test_describe_unreachable_server() {
    let image = temp_path("pixel.png");
    fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let config = AllyConfig {
        endpoint: format!("http://127.0.0.1:{port}"),
        ..config_for("describe-down.json")
    };

    let err = run(&config, &["describe", image.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().starts_with("Error analyzing image: Network error"));

    fs::remove_file(&image).unwrap();
}
