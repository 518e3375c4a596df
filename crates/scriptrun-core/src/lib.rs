//! scriptrun core: the vocabulary shared by every stage
//!
//! Text enters as UTF-8 bytes and leaves as a report of runs and glyphs.
//! Between those two points it passes through five stages:
//!
//! 1. **Scanning** - bytes become grapheme clusters
//! 2. **Classification** - each cluster learns its script and direction
//! 3. **Segmentation** - clusters gather into maximal runs
//! 4. **Font resolution and shaping** - each run picks a font and becomes glyphs
//! 5. **Reporting** - runs and glyphs become deterministic text
//!
//! This crate holds the data that flows between the stages ([`types`]), the
//! error taxonomy ([`error`]) and the two backend contracts ([`traits`]).
//! Clusters live in one arena ([`types::Segmentation::clusters`]); runs and
//! glyphs refer to them by index only.

pub mod error;
pub mod script;
pub mod traits;

pub use error::{Result, ScriptRunError};
pub use script::{OtherScript, Script};
pub use traits::{FontRef, Shaper};

/// The data structures that flow through the pipeline
pub mod types {
    use crate::error::{Result, ShapingError};
    use crate::script::Script;
    use serde::{Deserialize, Serialize};
    use std::ops::Range;

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// The glyph every font draws when it has nothing better
    pub const NOTDEF_GLYPH: GlyphId = 0;

    /// Caller-chosen name of a configured font
    pub type FontId = String;

    /// Which way a cluster or run reads
    ///
    /// Bidi classes collapse into three buckets: `L` is left-to-right, `R` and
    /// `AL` are right-to-left, everything else is neutral.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Direction {
        LeftToRight,
        RightToLeft,
        Neutral,
    }

    impl Direction {
        /// Short label used in reports
        pub const fn label(self) -> &'static str {
            match self {
                Direction::LeftToRight => "LTR",
                Direction::RightToLeft => "RTL",
                Direction::Neutral => "Neutral",
            }
        }

        pub const fn is_rtl(self) -> bool {
            matches!(self, Direction::RightToLeft)
        }

        /// Neutral sides never conflict with anything
        pub fn compatible_with(self, other: Direction) -> bool {
            self == other || self == Direction::Neutral || other == Direction::Neutral
        }
    }

    /// Coarse general category of a cluster's base scalar
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum ClusterCategory {
        Letter,
        Mark,
        Number,
        Punctuation,
        Symbol,
        Separator,
        Emoji,
        Control,
        Other,
    }

    /// Everything segmentation needs to know about one cluster
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ClusterClass {
        pub script: Script,
        pub direction: Direction,
        /// Joins a neighbouring run instead of starting one
        pub attachable: bool,
        pub category: ClusterCategory,
        /// Specific scripts from Script_Extensions, sorted by name
        pub candidates: Vec<Script>,
    }

    impl ClusterClass {
        /// More than one specific script could claim this cluster
        pub fn is_ambiguous(&self) -> bool {
            self.candidates.len() > 1
        }
    }

    /// How an ambiguous cluster picks among its Script_Extensions candidates
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub enum ScriptTieBreak {
        /// Keep the preceding run's script when it is a candidate, else the
        /// first candidate by name
        #[default]
        PreferPrecedingRun,
        /// Always the first candidate by name
        FirstCandidate,
    }

    /// How text gets broken into runs
    #[derive(Debug, Clone, Default)]
    pub struct SegmentOptions {
        /// End the current run after a hard line break cluster
        pub split_on_hard_breaks: bool,
        pub tie_break: ScriptTieBreak,
    }

    /// Maximal span of clusters sharing script and direction
    ///
    /// A run led by neutral clusters (digits, punctuation) takes the
    /// direction of the first strong cluster that joins it, so `١٢ مرحبا`
    /// is one right-to-left run. A run with no strong cluster stays
    /// [`Direction::Neutral`].
    #[derive(Debug, Clone, PartialEq)]
    pub struct TextRun {
        /// Half-open range into [`Segmentation::clusters`]
        pub clusters: Range<usize>,
        /// Half-open byte range into the source text
        pub bytes: Range<usize>,
        /// Zero-based line, counted in hard breaks when runs split on them;
        /// always 0 otherwise
        pub line: usize,
        pub script: Script,
        pub direction: Direction,
        /// Filled in by font resolution
        pub font: Option<FontId>,
    }

    impl TextRun {
        /// The exact substring this run covers
        pub fn text<'s>(&self, source: &'s str) -> &'s str {
            &source[self.bytes.clone()]
        }

        pub fn cluster_count(&self) -> usize {
            self.clusters.len()
        }
    }

    /// The cluster arena and the runs built over it
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Segmentation {
        /// Byte span of every grapheme cluster, in source order
        pub clusters: Vec<Range<usize>>,
        pub runs: Vec<TextRun>,
    }

    impl Segmentation {
        pub fn is_empty(&self) -> bool {
            self.runs.is_empty()
        }

        pub fn line_count(&self) -> usize {
            self.runs.last().map_or(0, |run| run.line + 1)
        }

        /// Runs grouped by line, in order
        pub fn lines(&self) -> impl Iterator<Item = &[TextRun]> {
            self.runs.chunk_by(|a, b| a.line == b.line)
        }

        /// Borrow one run as shaper input
        pub fn shaping_input<'a>(&'a self, source: &'a str, run: &TextRun) -> ShapingInput<'a> {
            ShapingInput {
                text: run.text(source),
                base_offset: run.bytes.start,
                first_cluster: run.clusters.start,
                clusters: &self.clusters[run.clusters.clone()],
                script: run.script,
                direction: run.direction,
            }
        }
    }

    /// One run, as a shaper sees it
    #[derive(Debug, Clone, Copy)]
    pub struct ShapingInput<'a> {
        /// The run's substring
        pub text: &'a str,
        /// Byte offset of `text` in the source
        pub base_offset: usize,
        /// Arena index of `clusters[0]`
        pub first_cluster: usize,
        /// Absolute byte spans of the run's clusters
        pub clusters: &'a [Range<usize>],
        pub script: Script,
        pub direction: Direction,
    }

    impl<'a> ShapingInput<'a> {
        /// Text of the `local`-th cluster of the run
        pub fn cluster_str(&self, local: usize) -> Result<&'a str> {
            let span = self
                .clusters
                .get(local)
                .ok_or(ShapingError::ClusterOutOfRange {
                    start: local,
                    end: local + 1,
                })?;
            let start = span.start.wrapping_sub(self.base_offset);
            let end = span.end.wrapping_sub(self.base_offset);
            self.text.get(start..end).ok_or_else(|| {
                ShapingError::ClusterOutOfRange {
                    start: span.start,
                    end: span.end,
                }
                .into()
            })
        }

        /// Arena index of the cluster holding a byte offset relative to the run
        pub fn cluster_at(&self, local_byte: usize) -> usize {
            let absolute = self.base_offset + local_byte;
            let local = self
                .clusters
                .partition_point(|span| span.end <= absolute)
                .min(self.clusters.len().saturating_sub(1));
            self.first_cluster + local
        }

        /// Arena index one past the run's last cluster
        pub fn end_cluster(&self) -> usize {
            self.first_cluster + self.clusters.len()
        }
    }

    /// A glyph that knows its advance and where it came from
    #[derive(Debug, Clone, PartialEq)]
    pub struct ShapedGlyph {
        pub id: GlyphId,
        pub x_advance: f32,
        pub y_advance: f32,
        pub x_offset: f32,
        pub y_offset: f32,
        /// Arena range of the clusters this glyph draws
        pub clusters: Range<usize>,
    }

    impl ShapedGlyph {
        /// A horizontally advancing glyph with no offset
        pub fn advancing(id: GlyphId, x_advance: f32, clusters: Range<usize>) -> Self {
            Self {
                id,
                x_advance,
                y_advance: 0.0,
                x_offset: 0.0,
                y_offset: 0.0,
                clusters,
            }
        }

        pub fn is_notdef(&self) -> bool {
            self.id == NOTDEF_GLYPH
        }
    }

    /// What emerges after shaping: one run, its font, its glyphs
    #[derive(Debug, Clone, PartialEq)]
    pub struct ShapedRun {
        pub run: TextRun,
        pub font: FontId,
        pub size: f32,
        pub glyphs: Vec<ShapedGlyph>,
    }

    impl ShapedRun {
        /// Total horizontal advance of the run
        pub fn advance_width(&self) -> f32 {
            self.glyphs.iter().map(|g| g.x_advance).sum()
        }
    }
}

/// Rejects sizes that are zero, negative, NaN or infinite
pub fn validate_font_size(size: f32) -> Result<f32> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(ScriptRunError::InvalidFontSize(size))
    }
}

/// How shaping should behave
#[derive(Debug, Clone)]
pub struct ShapingParams {
    pub size: f32,
    /// BCP 47 language hint for OpenType shapers
    pub language: Option<String>,
    /// OpenType feature settings such as `("liga", 0)`
    pub features: Vec<(String, u32)>,
}

impl ShapingParams {
    pub fn with_size(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_font_size(self.size).map(|_| ())
    }

    /// Factor turning font units into advances at this size
    pub fn scale(&self, units_per_em: u16) -> f32 {
        self.size / f32::from(units_per_em.max(1))
    }
}

impl Default for ShapingParams {
    fn default() -> Self {
        Self {
            size: 16.0,
            language: None,
            features: Vec::new(),
        }
    }
}
