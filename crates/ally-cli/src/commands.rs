//! Command handlers
//!
//! Every handler writes its report to `out` so the binary and the tests share
//! one code path.

use std::fs;
use std::io::Write;
use std::time::Duration;

use ally_a11y::announcer::{FORMATTING_APPLIED, IMAGE_ANALYZED, IMAGE_UPLOADED};
use ally_a11y::{
    apply_preferences, evaluate, format_text, initialize, read_text_file, resolve_theme,
    save_and_apply, toggle_dark_mode, A11yError, Color, DocumentState, FileStore, FormatStyle,
    FormattedText, PreferenceStore, PreferenceUpdate,
};
use ally_net::{mime_for_path, ImageDescriber, ImageUpload};
use anyhow::{anyhow, bail, Context};

use crate::cli::{
    Cli, Command, ContrastArgs, DescribeArgs, FormatArgs, PrefsCommand, Preset, SetArgs, ThemeCommand,
};
use crate::config::AllyConfig;

/// Resolve configuration for `cli` and run its command
pub fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut config = AllyConfig::load(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store = store;
    }
    execute(cli.command, &config, out)
}

pub fn execute(command: Command, config: &AllyConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Contrast(args) => contrast(&args, out),
        Command::Prefs(cmd) => prefs(cmd, config, out),
        Command::Theme(cmd) => theme(cmd, config, out),
        Command::Format(args) => format(&args, config, out),
        Command::Describe(args) => describe(&args, config, out),
    }
}

/// Saved preferences plus the page they are shown on
struct Session {
    prefs: PreferenceStore<FileStore>,
    doc: DocumentState,
}

impl Session {
    fn open(config: &AllyConfig) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.store)
            .with_context(|| format!("failed to open preference store {}", config.store.display()))?;
        Ok(Self { prefs: PreferenceStore::new(store), doc: DocumentState::new() })
    }

    /// Open and apply whatever is saved
    fn restore(config: &AllyConfig) -> anyhow::Result<Self> {
        let mut session = Self::open(config)?;
        if let Some(record) = session.prefs.load() {
            apply_preferences(&record, &mut session.doc);
        }
        Ok(session)
    }

    /// Speak through the live region when screen reader hints are on
    fn announce(&mut self, message: &str, out: &mut dyn Write) -> anyhow::Result<()> {
        if !self.doc.screen_reader_hints() {
            return Ok(());
        }
        self.doc.announce(message);
        if let Some(last) = self.doc.announcer().and_then(|a| a.last()) {
            writeln!(out, "[{}] {}", last.politeness.as_str(), last.text)?;
        }
        Ok(())
    }

    fn write_announcements(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        if let Some(announcer) = self.doc.announcer() {
            for announcement in announcer.history() {
                writeln!(out, "[{}] {}", announcement.politeness.as_str(), announcement.text)?;
            }
        }
        Ok(())
    }
}

fn parse_pair(foreground: &str, background: &str) -> Result<(Color, Color), A11yError> {
    Ok((foreground.parse()?, background.parse()?))
}

fn contrast(args: &ContrastArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let (fg, bg) = parse_pair(&args.foreground, &args.background)?;
    let result = evaluate(fg, bg);

    writeln!(out, "{fg} on {bg}")?;
    writeln!(out, "Contrast ratio: {:.2}:1", result.ratio)?;
    writeln!(out, "WCAG level: {}", result.level(args.large_text).as_str())?;
    writeln!(out, "Sufficient: {}", if result.sufficient { "yes" } else { "no" })?;
    Ok(())
}

fn prefs(command: PrefsCommand, config: &AllyConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut session = Session::open(config)?;

    match command {
        PrefsCommand::Show => match session.prefs.load() {
            Some(record) => writeln!(out, "{}", record.to_json()?)?,
            None => writeln!(out, "No saved preferences")?,
        },
        PrefsCommand::Set(args) => {
            let update = update_from(&args);
            if update.is_empty() {
                bail!("nothing to change: pass at least one preference option");
            }
            let record = session.prefs.load().unwrap_or_default().merge(update);
            save_and_apply(&mut session.prefs, &mut session.doc, &record)?;
            session.prefs.mark_seen()?;
            tracing::info!(store = %config.store.display(), "preferences saved");

            writeln!(out, "{}", record.to_json()?)?;
            writeln!(out, "{}", session.doc.to_markup())?;
            session.write_announcements(out)?;
        }
        PrefsCommand::Apply(system) => {
            let startup = initialize(&mut session.prefs, &mut session.doc, system.color_scheme())?;
            if startup.show_dialog {
                writeln!(out, "First visit: preferences dialog shown")?;
            } else if startup.applied.is_none() {
                writeln!(out, "No saved preferences")?;
            }
            writeln!(out, "{}", session.doc.to_markup())?;
            session.write_announcements(out)?;
        }
        PrefsCommand::Clear => {
            session.prefs.clear()?;
            writeln!(out, "Preferences cleared")?;
        }
    }
    Ok(())
}

fn update_from(args: &SetArgs) -> PreferenceUpdate {
    PreferenceUpdate {
        screen_reader: args.screen_reader,
        high_contrast: args.high_contrast,
        dark_mode: args.dark_mode,
        text_size: args.text_size,
    }
}

fn theme(command: ThemeCommand, config: &AllyConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut session = Session::restore(config)?;

    match command {
        ThemeCommand::Show(system) => {
            let theme = resolve_theme(session.prefs.load().as_ref(), system.color_scheme());
            writeln!(out, "Theme: {}", theme.as_str())?;
            writeln!(out, "Button: {} ({})", theme.toggle_label(), theme.toggle_icon())?;
        }
        ThemeCommand::Toggle(system) => {
            let current = resolve_theme(session.prefs.load().as_ref(), system.color_scheme());
            let next = toggle_dark_mode(&mut session.prefs, &mut session.doc, current)?;

            writeln!(out, "Theme: {}", next.as_str())?;
            writeln!(out, "Button: {} ({})", next.toggle_label(), next.toggle_icon())?;
            if session.prefs.load().is_none() {
                writeln!(out, "Not saved: no saved preferences")?;
            }
        }
    }
    Ok(())
}

fn style_from(args: &FormatArgs) -> FormatStyle {
    let mut style = match args.preset {
        Preset::Cream => FormatStyle::cream(),
        Preset::Dark => FormatStyle::dark(),
        Preset::Sepia => FormatStyle::sepia(),
    };
    if let Some(font) = args.font {
        style.font_family = font;
    }
    if let Some(size) = args.size {
        style.font_size_px = size;
    }
    if let Some(spacing) = args.spacing {
        style.letter_spacing_px = spacing;
    }
    if let Some(line_height) = args.line_height {
        style.line_height = line_height;
    }
    if let Some(color) = &args.color {
        style.text_color = color.clone();
    }
    if let Some(background) = &args.background {
        style.background_color = background.clone();
    }
    style
}

/// Read a text file and format it
pub fn format_file(args: &FormatArgs) -> anyhow::Result<FormattedText> {
    let bytes = fs::read(&args.file).with_context(|| format!("failed to read {}", args.file.display()))?;
    Ok(format_bytes(mime_for_path(&args.file), &bytes, &style_from(args))?)
}

fn format_bytes(mime: &str, bytes: &[u8], style: &FormatStyle) -> Result<FormattedText, A11yError> {
    let text = read_text_file(mime, bytes)?;
    Ok(format_text(&text, style)?)
}

fn format(args: &FormatArgs, config: &AllyConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let formatted = format_file(args)?;
    let mut session = Session::restore(config)?;

    if args.html {
        write!(out, "{}", formatted.to_html())?;
    } else {
        writeln!(out, "{}", formatted.plain_text())?;
        if let Some(warning) = formatted.warning() {
            writeln!(out)?;
            writeln!(out, "{warning}")?;
        }
    }
    session.announce(FORMATTING_APPLIED, out)
}

fn describe(args: &DescribeArgs, config: &AllyConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let upload = ImageUpload::from_path(&args.image).map_err(|e| anyhow!(e.user_message()))?;
    let endpoint = args.endpoint.as_deref().unwrap_or(&config.endpoint);
    let describer = ImageDescriber::with_timeout(endpoint, Duration::from_secs(config.timeout_secs))
        .map_err(|e| anyhow!(e.user_message()))?;

    let mut session = Session::restore(config)?;
    session.announce(IMAGE_UPLOADED, out)?;

    let description = describer.describe(&upload).map_err(|e| anyhow!(e.user_message()))?;
    writeln!(out, "{description}")?;
    session.announce(IMAGE_ANALYZED, out)
}
