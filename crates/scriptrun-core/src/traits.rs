//! The contracts between the pipeline and its font and shaping backends
//!
//! - [`FontRef`] - Read-only window into a font's coverage and metrics
//! - [`Shaper`] - Where a run's clusters become glyphs

use crate::{
    error::Result,
    types::{GlyphId, ShapedGlyph, ShapingInput, NOTDEF_GLYPH},
    ShapingParams,
};
use std::sync::Arc;

/// Your key to a font's coverage and metrics
///
/// Implementations are immutable once built: coverage queries never mutate
/// and never lock, so one font can serve any number of concurrent runs.
///
/// ```ignore
/// struct MyFont;
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &[]
///     }
///
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         ch.is_ascii().then_some(ch as u32)
///     }
///
///     fn advance_width(&self, _glyph_id: GlyphId) -> f32 {
///         500.0
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes, empty for fonts described only by metadata
    fn data(&self) -> &[u8];

    /// Which face of a collection `data` holds (0 for single fonts)
    fn face_index(&self) -> u32 {
        0
    }

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Advance of this glyph in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// How many glyphs this font contains
    fn glyph_count(&self) -> Option<u32> {
        None
    }

    /// A single glyph drawing a whole multi-scalar cluster (ZWJ sequences, flags)
    fn sequence_glyph(&self, _cluster: &str) -> Option<GlyphId> {
        None
    }

    /// Ligature substitution for a sequence of glyphs
    fn ligature(&self, _components: &[GlyphId]) -> Option<GlyphId> {
        None
    }

    /// Does the font have a real glyph for this character?
    fn covers(&self, ch: char) -> bool {
        self.glyph_id(ch).is_some_and(|id| id != NOTDEF_GLYPH)
    }

    /// Does the font have a real glyph for every character?
    ///
    /// Fonts that parse tables on lookup override this to parse once.
    fn covers_all(&self, chars: &mut dyn Iterator<Item = char>) -> bool {
        for ch in chars {
            if !self.covers(ch) {
                return false;
            }
        }
        true
    }
}

/// Where clusters learn their glyphs
///
/// A shaper receives one run at a time. It must return glyphs in the run's
/// logical order and point every glyph back at the clusters it came from.
pub trait Shaper: Send + Sync {
    /// Identify yourself in logs and reports
    fn name(&self) -> &'static str;

    /// Turn the run's clusters into glyphs scaled to `params.size`
    fn shape(
        &self,
        input: &ShapingInput<'_>,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<Vec<ShapedGlyph>>;
}
