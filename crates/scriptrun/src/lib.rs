//! scriptrun - split Unicode text into runs and shape them
//!
//! The pipeline has five stages, run strictly in order:
//!
//! 1. Scanning - UTF-8 bytes are validated and split into grapheme clusters
//! 2. Classification - each cluster learns its script and direction
//! 3. Segmentation - clusters gather into maximal runs
//! 4. Font resolution and shaping - each run picks a font and becomes glyphs
//! 5. Reporting - runs and glyphs become a deterministic report
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use scriptrun::prelude::*;
//!
//! let mut db = FontDatabase::new();
//! db.insert("fallback", Arc::new(MetricsFont::last_resort()))?;
//!
//! let analyzer = Analyzer::builder()
//!     .database(db)
//!     .config(FontConfig::new().with_default("fallback"))
//!     .build();
//!
//! let mut out = Vec::new();
//! analyzer.analyze_shaped_runs("Hello, 世界".as_bytes(), 16.0, &mut out)?;
//! ```
//!
//! # Feature Flags
//!
//! - `shaping-hr` (default): OpenType shaping through harfrust
//! - `parallel`: resolve and shape runs on the rayon pool

mod analyzer;

pub use analyzer::{Analyzer, AnalyzerBuilder};

pub use scriptrun_core::{error, traits, types, Result, Script, ScriptRunError, ShapingParams};
pub use scriptrun_export as export;
pub use scriptrun_fontdb as fontdb;
pub use scriptrun_shape_cluster as shape_cluster;
#[cfg(feature = "shaping-hr")]
pub use scriptrun_shape_hr as shape_hr;
pub use scriptrun_unicode as unicode;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{Analyzer, AnalyzerBuilder};
    pub use scriptrun_core::{
        error::{Result, ScriptRunError},
        traits::{FontRef, Shaper},
        types::{Direction, ScriptTieBreak, SegmentOptions, Segmentation, ShapedRun, TextRun},
        Script, ShapingParams,
    };
    pub use scriptrun_export::ReportFormat;
    pub use scriptrun_fontdb::{Font, FontConfig, FontDatabase, MetricsFont};
}
