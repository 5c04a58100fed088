//! Display Target
//!
//! The document-facing side of preference application: a trait for anything
//! that can show visual modes, and an in-memory document that implements it.

use crate::announcer::{self, Announcer};
use crate::preferences::TextSize;
use crate::theme::Theme;

pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";
pub const KEYBOARD_FOCUS_CLASS: &str = "keyboard-focus";

/// Something preferences can be applied to
pub trait DisplayTarget {
    /// Turn the high contrast visual mode on or off
    fn set_high_contrast(&mut self, enabled: bool);

    /// Show exactly one text size class, or none for the baseline.
    /// Implementations clear every other size class first.
    fn set_text_size_class(&mut self, size: Option<TextSize>);

    /// Set the light/dark theme attribute
    fn set_theme(&mut self, theme: Theme);

    /// Enable screen reader hints (labels, focus styles, live region)
    fn enable_screen_reader_hints(&mut self) {}
}

/// In-memory document: the body class list and the root theme attribute
#[derive(Debug, Default)]
pub struct DocumentState {
    classes: Vec<String>,
    theme: Option<Theme>,
    announcer: Option<Announcer>,
}

impl DocumentState {
    pub fn new() -> Self { Self::default() }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn classes(&self) -> &[String] { &self.classes }

    /// Theme attribute, `None` until something sets it
    pub fn theme(&self) -> Option<Theme> { self.theme }

    pub fn is_high_contrast(&self) -> bool { self.has_class(HIGH_CONTRAST_CLASS) }

    /// Size class currently shown
    pub fn text_size(&self) -> TextSize {
        TextSize::SCALED
            .into_iter()
            .find(|size| size.class_name().is_some_and(|name| self.has_class(name)))
            .unwrap_or_default()
    }

    pub fn screen_reader_hints(&self) -> bool { self.announcer.is_some() }

    /// Live region, present once screen reader hints are enabled
    pub fn announcer(&self) -> Option<&Announcer> { self.announcer.as_ref() }

    /// Announce through the live region, creating it if needed
    pub fn announce(&mut self, text: &str) {
        self.announcer.get_or_insert_with(Announcer::default).announce(text);
    }

    /// Root and body attributes as markup
    pub fn to_markup(&self) -> String {
        let theme = self.theme.map(|t| format!(" data-bs-theme=\"{}\"", t.as_str())).unwrap_or_default();
        format!("<html{}><body class=\"{}\">", theme, self.classes.join(" "))
    }
}

impl DisplayTarget for DocumentState {
    fn set_high_contrast(&mut self, enabled: bool) {
        if enabled {
            self.add_class(HIGH_CONTRAST_CLASS);
        } else {
            self.remove_class(HIGH_CONTRAST_CLASS);
        }
    }

    fn set_text_size_class(&mut self, size: Option<TextSize>) {
        for scaled in TextSize::SCALED {
            if let Some(name) = scaled.class_name() {
                self.remove_class(name);
            }
        }
        if let Some(name) = size.and_then(|s| s.class_name()) {
            self.add_class(name);
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }

    fn enable_screen_reader_hints(&mut self) {
        self.add_class(KEYBOARD_FOCUS_CLASS);
        if self.announcer.is_none() {
            let mut announcer = Announcer::default();
            announcer.announce(announcer::SCREEN_READER_ACTIVE);
            self.announcer = Some(announcer);
        }
    }
}
