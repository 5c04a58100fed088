//! Preference Application
//!
//! Applies a `PreferenceRecord` to a display target, and the page-level
//! flows built on it: startup, saving from the dialog, and the dark mode toggle.

use crate::display::DisplayTarget;
use crate::preferences::PreferenceRecord;
use crate::store::{KeyValueStore, PreferenceStore, StoreError};
use crate::theme::{resolve_theme, toggle_theme, ColorScheme, Theme};

/// Apply every flag in `record` to `target`. Idempotent.
///
/// A record without a dark mode choice leaves the theme alone.
pub fn apply_preferences<T: DisplayTarget + ?Sized>(record: &PreferenceRecord, target: &mut T) {
    target.set_high_contrast(record.high_contrast);

    let size = (!record.text_size.is_baseline()).then_some(record.text_size);
    target.set_text_size_class(size);

    if let Some(theme) = record.theme() {
        target.set_theme(theme);
    }

    if record.screen_reader {
        target.enable_screen_reader_hints();
    }
}

/// What page startup decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Startup {
    /// The preferences dialog should be shown (first visit)
    pub show_dialog: bool,
    /// Record that was applied, if any
    pub applied: Option<PreferenceRecord>,
    /// Theme shown after startup
    pub theme: Theme,
}

/// Page load: show the dialog on the first visit, otherwise apply saved
/// preferences; then settle the theme from the saved choice or the system.
pub fn initialize<S, T>(
    prefs: &mut PreferenceStore<S>,
    target: &mut T,
    system: ColorScheme,
) -> Result<Startup, StoreError>
where
    S: KeyValueStore,
    T: DisplayTarget + ?Sized,
{
    let saved = prefs.load();
    let show_dialog = prefs.is_first_visit();
    let applied = if show_dialog {
        prefs.mark_seen()?;
        None
    } else {
        if let Some(record) = &saved {
            apply_preferences(record, target);
        }
        saved
    };

    let theme = resolve_theme(saved.as_ref(), system);
    target.set_theme(theme);

    tracing::debug!(show_dialog, theme = theme.as_str(), "preferences initialized");
    Ok(Startup { show_dialog, applied, theme })
}

/// Save a record from the dialog and apply it
pub fn save_and_apply<S, T>(
    prefs: &mut PreferenceStore<S>,
    target: &mut T,
    record: &PreferenceRecord,
) -> Result<(), StoreError>
where
    S: KeyValueStore,
    T: DisplayTarget + ?Sized,
{
    prefs.save(record)?;
    apply_preferences(record, target);
    Ok(())
}

/// Flip the theme, show it, and persist it into an existing record
pub fn toggle_dark_mode<S, T>(
    prefs: &mut PreferenceStore<S>,
    target: &mut T,
    current: Theme,
) -> Result<Theme, StoreError>
where
    S: KeyValueStore,
    T: DisplayTarget + ?Sized,
{
    let next = toggle_theme(current);
    target.set_theme(next);
    prefs.update_dark_mode(next.is_dark())?;
    Ok(next)
}
