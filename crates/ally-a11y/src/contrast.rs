//! Contrast Checking
//!
//! WCAG relative luminance and contrast ratio between two sRGB colors.

use std::fmt;
use std::str::FromStr;

/// Minimum ratio for normal-size text at WCAG AA.
pub const SUFFICIENT_RATIO: f64 = 4.5;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Relative luminance of this color
    pub fn luminance(&self) -> f64 { relative_luminance(*self) }

    /// Contrast ratio against another color
    pub fn contrast_with(&self, other: Color) -> f64 { contrast_ratio(*self, other) }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color string was not `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a #RRGGBB color: {0}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// Parse `#RRGGBB` or `RRGGBB`, case-insensitive.
///
/// Shorthand (`#fff`), named colors and alpha channels are rejected.
pub fn parse_color(text: &str) -> Option<Color> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color { r: channel(0)?, g: channel(2)?, b: channel(4)? })
}

/// sRGB channel to linear light
fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

/// Relative luminance in [0, 1]
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Contrast ratio between two colors, always >= 1 and symmetric
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (l1, l2) = (relative_luminance(a), relative_luminance(b));
    (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
}

/// Whether a ratio meets WCAG AA for normal text
pub fn is_sufficient(ratio: f64) -> bool {
    ratio >= SUFFICIENT_RATIO
}

/// Outcome of a contrast check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastResult {
    pub ratio: f64,
    pub sufficient: bool,
}

impl ContrastResult {
    /// Highest WCAG level met for the given text size
    pub fn level(&self, large_text: bool) -> WcagLevel {
        WcagLevel::classify(self.ratio, large_text)
    }
}

/// Evaluate a foreground/background pair
pub fn evaluate(foreground: Color, background: Color) -> ContrastResult {
    let ratio = contrast_ratio(foreground, background);
    ContrastResult { ratio, sufficient: is_sufficient(ratio) }
}

/// Evaluate two color strings. `None` means at least one side did not parse
/// and the check should be skipped.
pub fn check_pair(foreground: &str, background: &str) -> Option<ContrastResult> {
    let fg = parse_color(foreground)?;
    let bg = parse_color(background)?;
    Some(evaluate(fg, bg))
}

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WcagLevel {
    Fail,
    AA,
    AAA,
}

impl WcagLevel {
    /// Classify a ratio. Large text uses 3:1 (AA) and 4.5:1 (AAA).
    pub fn classify(ratio: f64, large_text: bool) -> Self {
        let (aa, aaa) = if large_text { (3.0, 4.5) } else { (SUFFICIENT_RATIO, 7.0) };
        if ratio >= aaa {
            Self::AAA
        } else if ratio >= aa {
            Self::AA
        } else {
            Self::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::AA => "AA",
            Self::AAA => "AAA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#1a2B3c"), Some(Color::new(0x1a, 0x2b, 0x3c)));
        assert_eq!(parse_color("FFFFFF"), Some(Color::WHITE));
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("#ff000080"), None);
        assert_eq!(parse_color("##ff0000"), None);
        assert_eq!(parse_color("+f+f+f"), None);
    }

    #[test]
    fn test_contrast_ratio() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!((ratio - 21.0).abs() < 0.01);
        assert_eq!(contrast_ratio(Color::WHITE, Color::WHITE), 1.0);
    }

    #[test]
    fn test_wcag() {
        assert!(is_sufficient(4.5));
        assert!(!is_sufficient(4.4999));
        assert_eq!(WcagLevel::classify(3.0, true), WcagLevel::AA);
        assert_eq!(WcagLevel::classify(3.0, false), WcagLevel::Fail);
        assert_eq!(WcagLevel::classify(7.0, false), WcagLevel::AAA);
    }

    #[test]
    fn test_check_pair_skips_bad_input() {
        assert!(check_pair("#000000", "white").is_none());
        let result = check_pair("#000000", "#ffffff").unwrap();
        assert!(result.sufficient);
        assert_eq!(result.level(false), WcagLevel::AAA);
    }

    #[test]
    fn test_display_roundtrip() {
        let color: Color = "#0A0b0C".parse().unwrap();
        assert_eq!(color.to_string(), "#0a0b0c");
    }
}
