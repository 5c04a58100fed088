//! Command line definitions

use std::path::PathBuf;

use ally_a11y::{ColorScheme, FontFamily, TextSize};
use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "ally", version, about = "Accessibility assistant toolkit")]
pub struct Cli {
    /// Config file (defaults to ./ally.toml when present)
    #[arg(long, global = true, env = "ALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Preference store file, overriding the config
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the contrast ratio between two colors
    Contrast(ContrastArgs),

    /// Saved display preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Light/dark theme
    #[command(subcommand)]
    Theme(ThemeCommand),

    /// Format a text file for dyslexic readers
    Format(FormatArgs),

    /// Describe an image with the remote assistant
    Describe(DescribeArgs),
}

#[derive(Debug, Args)]
pub struct ContrastArgs {
    /// Foreground color, #RRGGBB
    pub foreground: String,

    /// Background color, #RRGGBB
    pub background: String,

    /// Grade against the large text thresholds
    #[arg(long)]
    pub large_text: bool,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Print the saved record
    Show,

    /// Change saved preferences and apply them
    Set(SetArgs),

    /// Run startup against the saved preferences and print the resulting page state
    Apply(SystemArgs),

    /// Forget saved preferences
    Clear,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub screen_reader: Option<bool>,

    #[arg(long, value_parser = BoolishValueParser::new())]
    pub high_contrast: Option<bool>,

    #[arg(long, value_parser = BoolishValueParser::new())]
    pub dark_mode: Option<bool>,

    /// Text size percent: 100, 120, 140, 160, 180 or 200
    #[arg(long, value_parser = parse_text_size)]
    pub text_size: Option<TextSize>,
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Print the theme that would be shown
    Show(SystemArgs),

    /// Switch between light and dark
    Toggle(SystemArgs),
}

#[derive(Debug, Clone, Copy, Args)]
pub struct SystemArgs {
    /// Treat the system color scheme as dark
    #[arg(long)]
    pub system_dark: bool,
}

impl SystemArgs {
    pub fn color_scheme(&self) -> ColorScheme {
        if self.system_dark { ColorScheme::Dark } else { ColorScheme::NoPreference }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    #[default]
    Cream,
    Dark,
    Sepia,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Plain text file to format
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = Preset::Cream)]
    pub preset: Preset,

    #[arg(long, value_parser = parse_font)]
    pub font: Option<FontFamily>,

    /// Font size in px
    #[arg(long)]
    pub size: Option<f64>,

    /// Letter spacing in px
    #[arg(long)]
    pub spacing: Option<f64>,

    #[arg(long)]
    pub line_height: Option<f64>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub background: Option<String>,

    /// Print preview markup instead of plain paragraphs
    #[arg(long)]
    pub html: bool,
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Image file
    pub image: PathBuf,

    /// Endpoint URL, overriding the config
    #[arg(long)]
    pub endpoint: Option<String>,
}

fn parse_text_size(value: &str) -> Result<TextSize, String> {
    value
        .trim()
        .trim_end_matches('%')
        .parse::<i64>()
        .ok()
        .and_then(TextSize::from_percent)
        .ok_or_else(|| "expected one of 100, 120, 140, 160, 180, 200".to_string())
}

fn parse_font(value: &str) -> Result<FontFamily, String> {
    FontFamily::from_name(value).ok_or_else(|| format!("unknown font family '{value}'"))
}
