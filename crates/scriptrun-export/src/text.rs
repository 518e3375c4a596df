// this_file: crates/scriptrun-export/src/text.rs

//! Line-oriented reports
//!
//! ```text
//! Text: "Hello 世界"
//! Font size: 16.000
//! Runs: 2
//! Run 0: "Hello " | script: Latin | direction: LTR | font: sans | size: 16.000
//!   glyph 0: id=41 advance=9.248,0.000 clusters=0..1
//! ```
//!
//! When runs were split at hard breaks and span several lines, a `Lines: N`
//! header follows `Runs:` and each line's runs sit under a `Line <i>:` row.
//! Run indices keep counting across lines.
//!
//! Numbers use fixed precision and nothing iterates a hash map, so equal
//! input gives byte-identical output.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use scriptrun_core::{
    error::{ReportError, Result},
    types::{Segmentation, ShapedRun, TextRun},
};

use crate::Reporter;

const UNRESOLVED: &str = "(unresolved)";

/// Plain-text reporter
pub struct TextReport;

impl TextReport {
    pub fn new() -> Self {
        Self
    }

    fn header(
        out: &mut String,
        source: &str,
        size: f32,
        runs: usize,
        lines: usize,
    ) -> fmt::Result {
        writeln!(out, "Text: \"{}\"", escape(source))?;
        writeln!(out, "Font size: {:.3}", size)?;
        writeln!(out, "Runs: {}", runs)?;
        if lines > 1 {
            writeln!(out, "Lines: {}", lines)?;
        }
        Ok(())
    }

    /// `Line <i>:` row before the first run of each line, multi-line reports only
    fn line_marker(
        out: &mut String,
        lines: usize,
        previous: Option<usize>,
        run: &TextRun,
    ) -> fmt::Result {
        if lines > 1 && previous != Some(run.line) {
            writeln!(out, "Line {}:", run.line)?;
        }
        Ok(())
    }

    fn run_line(
        out: &mut String,
        index: usize,
        run: &TextRun,
        font: Option<&str>,
        source: &str,
    ) -> fmt::Result {
        write!(
            out,
            "Run {}: \"{}\" | script: {} | direction: {} | font: {}",
            index,
            escape(run.text(source)),
            run.script,
            run.direction.label(),
            font.unwrap_or(UNRESOLVED)
        )
    }

    fn write_runs(out: &mut String, source: &str, size: f32, seg: &Segmentation) -> fmt::Result {
        let lines = seg.line_count();
        Self::header(out, source, size, seg.runs.len(), lines)?;
        let mut previous = None;
        for (i, run) in seg.runs.iter().enumerate() {
            Self::line_marker(out, lines, previous, run)?;
            previous = Some(run.line);
            Self::run_line(out, i, run, run.font.as_deref(), source)?;
            out.push('\n');
        }
        Ok(())
    }

    fn write_shaped(out: &mut String, source: &str, size: f32, runs: &[ShapedRun]) -> fmt::Result {
        let lines = runs.last().map_or(0, |shaped| shaped.run.line + 1);
        Self::header(out, source, size, runs.len(), lines)?;
        let mut previous = None;
        for (i, shaped) in runs.iter().enumerate() {
            Self::line_marker(out, lines, previous, &shaped.run)?;
            previous = Some(shaped.run.line);
            Self::run_line(out, i, &shaped.run, Some(&shaped.font), source)?;
            writeln!(out, " | size: {:.3}", shaped.size)?;
            for (j, glyph) in shaped.glyphs.iter().enumerate() {
                writeln!(
                    out,
                    "  glyph {}: id={} advance={:.3},{:.3} clusters={}..{}",
                    j,
                    glyph.id,
                    glyph.x_advance,
                    glyph.y_advance,
                    glyph.clusters.start,
                    glyph.clusters.end
                )?;
            }
        }
        Ok(())
    }
}

impl Default for TextReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TextReport {
    fn name(&self) -> &'static str {
        "text"
    }

    fn runs(&self, source: &str, size: f32, segmentation: &Segmentation) -> Result<String> {
        let mut out = String::new();
        Self::write_runs(&mut out, source, size, segmentation)
            .map_err(|e| ReportError::EncodingFailed(e.to_string()))?;
        Ok(out)
    }

    fn shaped(&self, source: &str, size: f32, runs: &[ShapedRun]) -> Result<String> {
        let mut out = String::new();
        Self::write_shaped(&mut out, source, size, runs)
            .map_err(|e| ReportError::EncodingFailed(e.to_string()))?;
        Ok(out)
    }
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '\\' | '"' | '\u{2028}' | '\u{2029}') || ch.is_control()
}

/// Escapes backslash, quote and control characters; everything else is verbatim
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if needs_escape(c) => {
                let _ = write!(out, "\\u{{{:04X}}}", u32::from(c));
            },
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
