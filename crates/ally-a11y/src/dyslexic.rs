//! Dyslexia-Friendly Formatting
//!
//! Reflows plain text into paragraphs with reader-chosen typography and warns
//! when the chosen colors are hard to read.

use crate::contrast::{self, ContrastResult};

/// Shown when the chosen colors fall below the contrast threshold
pub const CONTRAST_WARNING: &str = "Warning: The current text and background colors may have insufficient contrast for easy reading. Consider choosing colors with higher contrast.";

/// Formatting error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Please enter some text to format")]
    EmptyText,

    #[error("Currently only text files (.txt) are supported.")]
    UnsupportedFile(String),

    #[error("Error reading file")]
    Encoding,
}

/// Font family options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    OpenDyslexic,
    Arial,
    Verdana,
    ComicSans,
    SystemDefault,
}

impl FontFamily {
    pub fn css_value(&self) -> &'static str {
        match self {
            Self::OpenDyslexic => "'OpenDyslexic', 'Comic Sans MS', cursive",
            Self::Arial => "Arial, Helvetica, sans-serif",
            Self::Verdana => "Verdana, Geneva, sans-serif",
            Self::ComicSans => "'Comic Sans MS', cursive",
            Self::SystemDefault => "system-ui, sans-serif",
        }
    }

    /// Parse a user-supplied family name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace([' ', '-', '_'], "").as_str() {
            "opendyslexic" | "dyslexic" => Some(Self::OpenDyslexic),
            "arial" => Some(Self::Arial),
            "verdana" => Some(Self::Verdana),
            "comicsans" | "comicsansms" => Some(Self::ComicSans),
            "system" | "systemdefault" => Some(Self::SystemDefault),
            _ => None,
        }
    }
}

/// Typography and colors for formatted text
#[derive(Debug, Clone, PartialEq)]
pub struct FormatStyle {
    pub font_family: FontFamily,
    pub font_size_px: f64,
    pub letter_spacing_px: f64,
    pub line_height: f64,
    /// Text color as entered; checked for contrast only if it is `#RRGGBB`
    pub text_color: String,
    pub background_color: String,
}

impl Default for FormatStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::OpenDyslexic,
            font_size_px: 18.0,
            letter_spacing_px: 1.0,
            line_height: 1.8,
            text_color: "#333333".to_string(),
            background_color: "#faf8f0".to_string(),
        }
    }
}

impl FormatStyle {
    /// Cream background preset
    pub fn cream() -> Self { Self::default() }

    /// Dark preset
    pub fn dark() -> Self {
        Self {
            text_color: "#e0e0e0".to_string(),
            background_color: "#1a1a1a".to_string(),
            ..Default::default()
        }
    }

    /// Sepia preset
    pub fn sepia() -> Self {
        Self {
            text_color: "#3d2b1f".to_string(),
            background_color: "#f5e6c8".to_string(),
            ..Default::default()
        }
    }

    /// Inline CSS declarations for the preview
    pub fn to_css(&self) -> String {
        format!(
            "font-family: {}; font-size: {}px; letter-spacing: {}px; color: {}; background-color: {}; line-height: {};",
            self.font_family.css_value(),
            self.font_size_px,
            self.letter_spacing_px,
            self.text_color,
            self.background_color,
            self.line_height,
        )
    }
}

/// Formatted output
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedText {
    pub paragraphs: Vec<String>,
    pub css: String,
    /// `None` when a color could not be parsed and the check was skipped
    pub contrast: Option<ContrastResult>,
}

impl FormattedText {
    pub fn warning(&self) -> Option<&'static str> {
        match self.contrast {
            Some(result) if !result.sufficient => Some(CONTRAST_WARNING),
            _ => None,
        }
    }

    /// Paragraph text without formatting, for copying or reading aloud
    pub fn plain_text(&self) -> String {
        self.paragraphs.join("\n\n")
    }

    /// Preview markup
    pub fn to_html(&self) -> String {
        let mut html = format!("<div class=\"text-preview\" style=\"{}\">\n", escape_html(&self.css));
        for paragraph in &self.paragraphs {
            html.push_str(&format!("  <p>{}</p>\n", escape_html(paragraph)));
        }
        if let Some(warning) = self.warning() {
            html.push_str(&format!("  <div class=\"alert alert-warning\">{}</div>\n", warning));
        }
        html.push_str("</div>\n");
        html
    }
}

/// Split text into paragraphs and attach styling
pub fn format_text(text: &str, style: &FormatStyle) -> Result<FormattedText, FormatError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(FormatError::EmptyText);
    }

    let paragraphs: Vec<String> = text
        .split('\n')
        .map(|p| p.trim_end_matches('\r'))
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .collect();

    let contrast = contrast::check_pair(&style.text_color, &style.background_color);
    if contrast.is_none() {
        tracing::debug!(fg = %style.text_color, bg = %style.background_color, "contrast check skipped");
    }

    Ok(FormattedText { paragraphs, css: style.to_css(), contrast })
}

/// Accept an uploaded file as input text. Only `text/plain` is supported.
pub fn read_text_file(mime: &str, contents: &[u8]) -> Result<String, FormatError> {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    if !essence.eq_ignore_ascii_case("text/plain") {
        return Err(FormatError::UnsupportedFile(mime.to_string()));
    }
    String::from_utf8(contents.to_vec()).map_err(|_| FormatError::Encoding)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
