//! Theme Selection
//!
//! Light/dark theme resolution and the dark mode toggle.

use crate::preferences::PreferenceRecord;

/// Page theme, written to the `data-bs-theme` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(&self) -> bool { *self == Self::Dark }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Accessible label for the toggle button while this theme is shown
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }

    /// Icon shown on the toggle button while this theme is shown
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Self::Light => "moon",
            Self::Dark => "sun",
        }
    }
}

/// System `prefers-color-scheme` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    NoPreference,
    Light,
    Dark,
}

impl ColorScheme {
    /// Match a media query against this scheme
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        if !query.contains("prefers-color-scheme") {
            return false;
        }
        if query.contains("dark") {
            return *self == Self::Dark;
        }
        if query.contains("light") {
            return *self == Self::Light;
        }
        false
    }
}

/// Pick the theme to show: an explicit saved choice wins, otherwise the
/// system scheme decides.
pub fn resolve_theme(record: Option<&PreferenceRecord>, system: ColorScheme) -> Theme {
    match record.and_then(PreferenceRecord::theme) {
        Some(theme) => theme,
        None => Theme::from_dark(system == ColorScheme::Dark),
    }
}

pub fn toggle_theme(current: Theme) -> Theme {
    current.toggled()
}
