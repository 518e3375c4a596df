//! Reports for scriptrun
//!
//! The last stage of the pipeline. Both report kinds exist in two formats:
//!
//! - [`TextReport`] - line-oriented, one run per line, for people and diffs
//! - [`JsonReport`] - the same content as structured data, for programs
//!
//! Reports are rendered into a `String` first and reach the sink through
//! [`write_report`] in one call, so a failing analysis never leaves half a
//! report behind.

use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use scriptrun_core::{
    error::Result,
    types::{Segmentation, ShapedRun},
    ScriptRunError,
};

pub mod json;
pub mod text;

pub use json::JsonReport;
pub use text::{escape, TextReport};

/// Turns pipeline output into report text
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run-only report: header plus one entry per run
    fn runs(&self, source: &str, size: f32, segmentation: &Segmentation) -> Result<String>;

    /// Run and glyph report
    fn shaped(&self, source: &str, size: f32, runs: &[ShapedRun]) -> Result<String>;
}

/// Which report a caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn reporter(self) -> Box<dyn Reporter> {
        match self {
            ReportFormat::Text => Box::new(TextReport::new()),
            ReportFormat::Json => Box::new(JsonReport::new()),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ScriptRunError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(ScriptRunError::Config(format!(
                "unknown report format '{}' (expected text or json)",
                other
            ))),
        }
    }
}

/// Hand a finished report to the sink in one write
pub fn write_report(sink: &mut dyn Write, report: &str) -> Result<()> {
    sink.write_all(report.as_bytes())?;
    sink.flush()?;
    Ok(())
}
