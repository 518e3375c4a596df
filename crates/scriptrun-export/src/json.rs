//! JSON reports
//!
//! The same content as the text report, as one JSON document per call.
//! Ranges are `[start, end)` pairs; glyph positions are in the same units
//! as the requested font size. `lines` groups runs by line as index ranges
//! into `runs`; without hard-break splitting there is one line.

use serde::Serialize;
use scriptrun_core::{
    error::{ReportError, Result},
    types::{Segmentation, ShapedGlyph, ShapedRun, TextRun},
};

use crate::Reporter;

/// JSON reporter
pub struct JsonReport {
    /// Whether to pretty-print the JSON
    pretty: bool,
}

impl JsonReport {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty_print() -> Self {
        Self { pretty: true }
    }

    fn render(&self, doc: &ReportDoc<'_>) -> Result<String> {
        let mut json = if self.pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        }
        .map_err(|e| ReportError::EncodingFailed(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}

impl Default for JsonReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReport {
    fn name(&self) -> &'static str {
        "json"
    }

    fn runs(&self, source: &str, size: f32, segmentation: &Segmentation) -> Result<String> {
        let runs = segmentation
            .runs
            .iter()
            .enumerate()
            .map(|(index, run)| RunEntry::new(index, run, run.font.as_deref(), source))
            .collect();
        self.render(&ReportDoc {
            text: source,
            font_size: size,
            lines: LineEntry::group(segmentation.runs.iter()),
            runs,
        })
    }

    fn shaped(&self, source: &str, size: f32, runs: &[ShapedRun]) -> Result<String> {
        let entries = runs
            .iter()
            .enumerate()
            .map(|(index, shaped)| {
                let mut entry = RunEntry::new(index, &shaped.run, Some(&shaped.font), source);
                entry.size = Some(shaped.size);
                entry.advance = Some(shaped.advance_width());
                entry.glyphs = Some(shaped.glyphs.iter().map(GlyphEntry::from).collect());
                entry
            })
            .collect();
        self.render(&ReportDoc {
            text: source,
            font_size: size,
            lines: LineEntry::group(runs.iter().map(|shaped| &shaped.run)),
            runs: entries,
        })
    }
}

#[derive(Debug, Serialize)]
struct ReportDoc<'a> {
    text: &'a str,
    font_size: f32,
    lines: Vec<LineEntry>,
    runs: Vec<RunEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct LineEntry {
    index: usize,
    /// `[first, end)` into `runs`
    runs: [usize; 2],
}

impl LineEntry {
    fn group<'r>(runs: impl Iterator<Item = &'r TextRun>) -> Vec<LineEntry> {
        let mut lines: Vec<LineEntry> = Vec::new();
        for (i, run) in runs.enumerate() {
            match lines.last_mut() {
                Some(line) if line.index == run.line => line.runs[1] = i + 1,
                _ => lines.push(LineEntry {
                    index: run.line,
                    runs: [i, i + 1],
                }),
            }
        }
        lines
    }
}

#[derive(Debug, Serialize)]
struct RunEntry<'a> {
    index: usize,
    line: usize,
    text: &'a str,
    script: &'static str,
    direction: &'static str,
    font: Option<&'a str>,
    clusters: [usize; 2],
    bytes: [usize; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    advance: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    glyphs: Option<Vec<GlyphEntry>>,
}

impl<'a> RunEntry<'a> {
    fn new(index: usize, run: &TextRun, font: Option<&'a str>, source: &'a str) -> Self {
        Self {
            index,
            line: run.line,
            text: run.text(source),
            script: run.script.name(),
            direction: run.direction.label(),
            font,
            clusters: [run.clusters.start, run.clusters.end],
            bytes: [run.bytes.start, run.bytes.end],
            size: None,
            advance: None,
            glyphs: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct GlyphEntry {
    id: u32,
    x_advance: f32,
    y_advance: f32,
    x_offset: f32,
    y_offset: f32,
    clusters: [usize; 2],
}

impl From<&ShapedGlyph> for GlyphEntry {
    fn from(glyph: &ShapedGlyph) -> Self {
        Self {
            id: glyph.id,
            x_advance: glyph.x_advance,
            y_advance: glyph.y_advance,
            x_offset: glyph.x_offset,
            y_offset: glyph.y_offset,
            clusters: [glyph.clusters.start, glyph.clusters.end],
        }
    }
}
