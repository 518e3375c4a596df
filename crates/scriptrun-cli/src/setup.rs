//! Turning command-line options into an analyzer

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use scriptrun::export::ReportFormat;
use scriptrun::fontdb::{FontConfig, FontDatabase, FontSpec, MetricsFont};
use scriptrun::shape_cluster::ClusterShaper;
use scriptrun::types::ScriptTieBreak;
use scriptrun::{Analyzer, AnalyzerBuilder};

use crate::cli::{CommonArgs, FormatArg, ShapeArgs, ShaperArg, TieBreakArg};

/// Id of the built-in font that draws every scalar with one advance
pub const LAST_RESORT_ID: &str = "last-resort";

pub fn runs_analyzer(args: &CommonArgs) -> Result<Analyzer> {
    Ok(builder(args)?.build())
}

pub fn shape_analyzer(args: &ShapeArgs) -> Result<Analyzer> {
    let mut builder = builder(&args.common)?;
    if args.shaper == ShaperArg::Cluster {
        builder = builder.shaper(Arc::new(ClusterShaper::new()));
    }
    if let Some(language) = &args.language {
        builder = builder.language(language.clone());
    }
    if let Some(features) = &args.features {
        for (tag, value) in parse_features(features)? {
            builder = builder.feature(tag, value);
        }
    }
    Ok(builder.build())
}

fn builder(args: &CommonArgs) -> Result<AnalyzerBuilder> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => FontConfig::new(),
    };

    let mut db = FontDatabase::new();
    db.load_specs(&config.fonts)
        .context("Failed to load fonts listed in the configuration")?;

    let mut first_font = None;
    for arg in &args.fonts {
        let (id, path) = parse_font_arg(arg)?;
        db.load_file(id, path)
            .with_context(|| format!("Failed to load font '{}' from {}", id, path))?;
        first_font.get_or_insert_with(|| id.to_string());
    }

    if let Some(id) = &args.default_font {
        config.default_font = Some(id.clone());
    } else if config.default_font.is_none() {
        config.default_font = first_font;
    }
    if config.default_font.is_none() {
        db.insert(LAST_RESORT_ID, Arc::new(MetricsFont::last_resort()))?;
        config.default_font = Some(LAST_RESORT_ID.to_string());
    }
    log::info!("Loaded {} fonts", db.len());

    let format = match args.format {
        FormatArg::Text => ReportFormat::Text,
        FormatArg::Json => ReportFormat::Json,
    };
    let tie_break = match args.tie_break {
        TieBreakArg::Preceding => ScriptTieBreak::PreferPrecedingRun,
        TieBreakArg::First => ScriptTieBreak::FirstCandidate,
    };

    Ok(Analyzer::builder()
        .database(db)
        .config(config)
        .format(format)
        .tie_break(tie_break)
        .split_on_hard_breaks(args.split_lines))
}

/// Read a configuration file; relative font paths resolve against its directory
fn load_config(path: &Path) -> Result<FontConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let mut config = FontConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    config.fonts = config
        .fonts
        .into_iter()
        .map(|spec| FontSpec {
            path: base.join(&spec.path),
            ..spec
        })
        .collect();
    Ok(config)
}

/// Split `ID=PATH`
pub fn parse_font_arg(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((id, path)) if !id.is_empty() && !path.is_empty() => Ok((id, path)),
        _ => bail!("Expected --font ID=PATH, got '{}'", arg),
    }
}

/// Parse `liga=0,kern,-calt` into feature settings
pub fn parse_features(spec: &str) -> Result<Vec<(String, u32)>> {
    spec.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (tag, value) = if let Some((tag, value)) = item.split_once('=') {
                let value = value
                    .parse::<u32>()
                    .with_context(|| format!("Invalid feature value in '{}'", item))?;
                (tag, value)
            } else if let Some(tag) = item.strip_prefix('-') {
                (tag, 0)
            } else {
                (item.strip_prefix('+').unwrap_or(item), 1)
            };
            if tag.len() != 4 || !tag.is_ascii() {
                bail!("Feature tags have four ASCII characters, got '{}'", tag);
            }
            Ok((tag.to_string(), value))
        })
        .collect()
}
