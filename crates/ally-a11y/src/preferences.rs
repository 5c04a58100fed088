//! Preference Record
//!
//! The persisted accessibility settings: screen reader hints, high contrast,
//! an optional dark mode choice and a text size step.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::theme::Theme;

/// Text size step, as a percentage of the baseline size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TextSize {
    #[default]
    Percent100,
    Percent120,
    Percent140,
    Percent160,
    Percent180,
    Percent200,
}

impl TextSize {
    pub const ALL: [TextSize; 6] = [
        Self::Percent100, Self::Percent120, Self::Percent140,
        Self::Percent160, Self::Percent180, Self::Percent200,
    ];

    /// Sizes that carry a class; 100% is the unstyled baseline
    pub const SCALED: [TextSize; 5] = [
        Self::Percent120, Self::Percent140, Self::Percent160,
        Self::Percent180, Self::Percent200,
    ];

    pub fn percent(&self) -> u16 {
        match self {
            Self::Percent100 => 100,
            Self::Percent120 => 120,
            Self::Percent140 => 140,
            Self::Percent160 => 160,
            Self::Percent180 => 180,
            Self::Percent200 => 200,
        }
    }

    /// Exact lookup, `None` for anything outside the enumerated steps
    pub fn from_percent(percent: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|size| i64::from(size.percent()) == percent)
    }

    /// Snap an arbitrary percentage onto a step: clamp into [100, 200], then
    /// round down to the nearest multiple of 20 above the baseline.
    pub fn snap(percent: i64) -> Self {
        let clamped = percent.clamp(100, 200);
        let step = 100 + ((clamped - 100) / 20) * 20;
        Self::from_percent(step).unwrap_or_default()
    }

    /// Body class applied for this size, `None` at the baseline
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            Self::Percent100 => None,
            Self::Percent120 => Some("text-size-120"),
            Self::Percent140 => Some("text-size-140"),
            Self::Percent160 => Some("text-size-160"),
            Self::Percent180 => Some("text-size-180"),
            Self::Percent200 => Some("text-size-200"),
        }
    }

    /// Scale factor relative to the baseline font size
    pub fn factor(&self) -> f64 {
        f64::from(self.percent()) / 100.0
    }

    pub fn is_baseline(&self) -> bool { *self == Self::Percent100 }
}

impl Serialize for TextSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.percent())
    }
}

impl<'de> Deserialize<'de> for TextSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older pages stored the slider value, which is a string.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Integer(i64),
            Float(f64),
            Text(String),
        }

        fn from_float<E: de::Error>(f: f64) -> Result<i64, E> {
            if f.is_finite() {
                Ok(f.floor() as i64)
            } else {
                Err(E::custom(format!("invalid text size {f}")))
            }
        }

        let percent = match Raw::deserialize(deserializer)? {
            Raw::Integer(n) => n,
            Raw::Float(f) => from_float::<D::Error>(f)?,
            Raw::Text(s) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(n) => n,
                    Err(_) => from_float::<D::Error>(s.parse::<f64>().map_err(<D::Error as de::Error>::custom)?)?,
                }
            }
        };

        match TextSize::from_percent(percent) {
            Some(size) => Ok(size),
            None => {
                let size = TextSize::snap(percent);
                tracing::warn!(percent, snapped = size.percent(), "text size outside known steps");
                Ok(size)
            }
        }
    }
}

/// Saved accessibility preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    #[serde(default)]
    pub screen_reader: bool,
    #[serde(default)]
    pub high_contrast: bool,
    /// `None` means no explicit choice; defer to the system color scheme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(default)]
    pub text_size: TextSize,
}

impl PreferenceRecord {
    pub fn new() -> Self { Self::default() }

    pub fn with_screen_reader(mut self, enabled: bool) -> Self {
        self.screen_reader = enabled;
        self
    }

    pub fn with_high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }

    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        self.dark_mode = Some(dark);
        self
    }

    pub fn with_text_size(mut self, size: TextSize) -> Self {
        self.text_size = size;
        self
    }

    /// Explicit theme choice, if one was saved
    pub fn theme(&self) -> Option<Theme> {
        self.dark_mode.map(Theme::from_dark)
    }

    /// Overlay the fields set in `update` onto this record
    pub fn merge(self, update: PreferenceUpdate) -> Self {
        Self {
            screen_reader: update.screen_reader.unwrap_or(self.screen_reader),
            high_contrast: update.high_contrast.unwrap_or(self.high_contrast),
            dark_mode: update.dark_mode.or(self.dark_mode),
            text_size: update.text_size.unwrap_or(self.text_size),
        }
    }

    /// Serialize to the stored JSON form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the stored JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Partial change to a record, merged in memory before a full save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreferenceUpdate {
    pub screen_reader: Option<bool>,
    pub high_contrast: Option<bool>,
    pub dark_mode: Option<bool>,
    pub text_size: Option<TextSize>,
}

impl PreferenceUpdate {
    pub fn is_empty(&self) -> bool { *self == Self::default() }
}
