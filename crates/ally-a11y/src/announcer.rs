//! Screen Reader Announcer
//!
//! A polite, atomic live region plus a bounded history of what was announced.

use std::collections::VecDeque;

/// Announced once when screen reader hints are first enabled
pub const SCREEN_READER_ACTIVE: &str =
    "Screen reader mode is now active. Navigation and content will be optimized for screen readers.";
pub const FORMATTING_APPLIED: &str = "Text formatting applied";
pub const IMAGE_UPLOADED: &str = "Image uploaded. Analyzing...";
pub const IMAGE_ANALYZED: &str = "Image analysis complete. Description available.";

/// Live region politeness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Politeness {
    Off,
    #[default]
    Polite,
    Assertive,
}

impl Politeness {
    /// `aria-live` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// A single announcement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub text: String,
    pub politeness: Politeness,
    /// Monotonic sequence number, distinguishes repeats of the same text
    pub sequence: u64,
}

/// Live region announcer
#[derive(Debug)]
pub struct Announcer {
    region: String,
    politeness: Politeness,
    history: VecDeque<Announcement>,
    max_history: usize,
    sequence: u64,
}

impl Default for Announcer {
    fn default() -> Self { Self::new(100) }
}

impl Announcer {
    /// Element id used for the live region
    pub const REGION_ID: &'static str = "sr-announcer";

    pub fn new(max_history: usize) -> Self {
        Self {
            region: String::new(),
            politeness: Politeness::Polite,
            history: VecDeque::new(),
            max_history: max_history.max(1),
            sequence: 0,
        }
    }

    /// Announce at a different politeness; `Off` keeps history but leaves the region empty
    pub fn with_politeness(mut self, politeness: Politeness) -> Self {
        self.politeness = politeness;
        self
    }

    pub fn politeness(&self) -> Politeness { self.politeness }

    /// Current live region text
    pub fn region_text(&self) -> &str { &self.region }

    /// Announce a message. The region is emptied before it is refilled so
    /// that repeating a message is still read out.
    pub fn announce(&mut self, text: &str) -> &Announcement {
        self.region.clear();
        if self.politeness != Politeness::Off {
            self.region.push_str(text);
        }
        self.sequence += 1;

        tracing::debug!(sequence = self.sequence, "screen reader announcement: {}", text);

        self.history.push_back(Announcement {
            text: text.to_string(),
            politeness: self.politeness,
            sequence: self.sequence,
        });
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
        &self.history[self.history.len() - 1]
    }

    /// Announce that a tab was shown. Only the first `-` of the id becomes a space.
    pub fn announce_tab(&mut self, tab_id: &str) -> &Announcement {
        let name = tab_id.replacen('-', " ", 1);
        self.announce(&format!("{name} tab displayed"))
    }

    pub fn history(&self) -> impl Iterator<Item = &Announcement> { self.history.iter() }
    pub fn last(&self) -> Option<&Announcement> { self.history.back() }

    pub fn clear(&mut self) {
        self.region.clear();
        self.history.clear();
    }
}
