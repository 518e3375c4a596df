//! CLI argument definitions using Clap v4

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// scriptrun - split text into script runs and shape them
#[derive(Parser, Debug)]
#[command(name = "scriptrun")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report the runs of a text
    #[command(alias = "r")]
    Runs(CommonArgs),

    /// Report the runs of a text and the glyphs each run shapes to
    #[command(alias = "s")]
    Shape(ShapeArgs),
}

/// Options shared by every command
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Text to analyze (reads stdin if omitted)
    pub text: Option<String>,

    /// Font size
    #[arg(short = 's', long = "size", default_value_t = 16.0)]
    pub size: f32,

    /// Report format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Load a font file under an id, as ID=PATH (repeatable)
    #[arg(long = "font", value_name = "ID=PATH")]
    pub fonts: Vec<String>,

    /// JSON font configuration (per-script candidates, default font, font files)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Font used when no candidate fits (defaults to the first --font, else
    /// the built-in last-resort font)
    #[arg(long = "default-font", value_name = "ID")]
    pub default_font: Option<String>,

    /// How ambiguous punctuation picks its script
    #[arg(long = "tie-break", value_enum, default_value_t = TieBreakArg::Preceding)]
    pub tie_break: TieBreakArg,

    /// End runs after hard line breaks
    #[arg(long = "split-lines")]
    pub split_lines: bool,
}

/// Arguments for the shape command
#[derive(Args, Debug)]
pub struct ShapeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Shaping backend
    #[arg(long = "shaper", value_enum, default_value_t = ShaperArg::Auto)]
    pub shaper: ShaperArg,

    /// Language tag (BCP 47), e.g. en, ar, zh-Hans
    #[arg(short = 'l', long = "language")]
    pub language: Option<String>,

    /// Font feature settings, e.g. "liga=0,kern"
    #[arg(short = 'F', long = "features")]
    pub features: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreakArg {
    /// Keep the preceding run's script when it is a candidate
    Preceding,
    /// Always the first candidate by name
    First,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaperArg {
    /// harfrust for binary fonts, cluster mapping otherwise
    Auto,
    /// Cluster mapping from font metadata only
    Cluster,
}
