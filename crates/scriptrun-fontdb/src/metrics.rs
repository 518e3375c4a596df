// this_file: crates/scriptrun-fontdb/src/metrics.rs

//! Fonts described by metadata alone.
//!
//! A [`MetricsFont`] answers the same questions as a parsed font file
//! (coverage, advances, sequence glyphs, ligatures) from tables built in
//! memory. Hosts use one as a last-resort fallback; tests use them to pin
//! down exact glyph ids and advances.

use std::collections::{BTreeMap, HashMap};

use scriptrun_core::{
    traits::FontRef,
    types::{GlyphId, NOTDEF_GLYPH},
};

/// A contiguous block of codepoints mapped to consecutive glyph ids
#[derive(Debug, Clone, Copy, PartialEq)]
struct Coverage {
    first: u32,
    last: u32,
    first_glyph: GlyphId,
    advance: f32,
}

impl Coverage {
    fn glyph(&self, cp: u32) -> Option<GlyphId> {
        (self.first..=self.last)
            .contains(&cp)
            .then(|| self.first_glyph + (cp - self.first))
    }

    fn owns(&self, glyph: GlyphId) -> bool {
        glyph >= self.first_glyph && glyph - self.first_glyph <= self.last - self.first
    }
}

/// In-memory font metadata
#[derive(Debug, Clone)]
pub struct MetricsFont {
    units_per_em: u16,
    coverage: Vec<Coverage>,
    advances: BTreeMap<GlyphId, f32>,
    sequences: HashMap<String, GlyphId>,
    ligatures: HashMap<Vec<GlyphId>, GlyphId>,
    notdef_advance: f32,
}

impl MetricsFont {
    pub fn builder(units_per_em: u16) -> MetricsFontBuilder {
        MetricsFontBuilder::new(units_per_em)
    }

    /// Covers every scalar from U+0020 upwards with one box-shaped glyph each
    pub fn last_resort() -> Self {
        Self::builder(1000)
            .range('\u{20}', char::MAX, 1, 600.0)
            .notdef_advance(600.0)
            .build()
    }
}

impl FontRef for MetricsFont {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        let cp = u32::from(ch);
        self.coverage.iter().find_map(|block| block.glyph(cp))
    }

    fn advance_width(&self, glyph_id: GlyphId) -> f32 {
        if glyph_id == NOTDEF_GLYPH {
            return self.notdef_advance;
        }
        if let Some(advance) = self.advances.get(&glyph_id) {
            return *advance;
        }
        self.coverage
            .iter()
            .find(|block| block.owns(glyph_id))
            .map_or(0.0, |block| block.advance)
    }

    fn sequence_glyph(&self, cluster: &str) -> Option<GlyphId> {
        self.sequences.get(cluster).copied()
    }

    fn ligature(&self, components: &[GlyphId]) -> Option<GlyphId> {
        self.ligatures.get(components).copied()
    }
}

/// Builds a [`MetricsFont`] one table at a time
///
/// ```ignore
/// let font = MetricsFont::builder(1000)
///     .range('a', 'z', 1, 500.0)
///     .ligature("fi", 100, 550.0)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct MetricsFontBuilder {
    units_per_em: u16,
    coverage: Vec<Coverage>,
    advances: BTreeMap<GlyphId, f32>,
    sequences: HashMap<String, GlyphId>,
    ligatures: Vec<(String, GlyphId)>,
    notdef_advance: f32,
}

impl MetricsFontBuilder {
    pub fn new(units_per_em: u16) -> Self {
        Self {
            units_per_em: units_per_em.max(1),
            coverage: Vec::new(),
            advances: BTreeMap::new(),
            sequences: HashMap::new(),
            ligatures: Vec::new(),
            notdef_advance: f32::from(units_per_em.max(1)) / 2.0,
        }
    }

    /// Map `first..=last` to glyphs `first_glyph..`, all with one advance
    ///
    /// Earlier ranges win where ranges overlap.
    pub fn range(mut self, first: char, last: char, first_glyph: GlyphId, advance: f32) -> Self {
        if first <= last && first_glyph != NOTDEF_GLYPH {
            self.coverage.push(Coverage {
                first: u32::from(first),
                last: u32::from(last),
                first_glyph,
                advance,
            });
        }
        self
    }

    /// Map a single character
    pub fn glyph(self, ch: char, glyph: GlyphId, advance: f32) -> Self {
        self.range(ch, ch, glyph, advance)
    }

    /// A glyph that draws a whole multi-scalar cluster
    pub fn sequence(mut self, cluster: &str, glyph: GlyphId, advance: f32) -> Self {
        self.sequences.insert(cluster.to_string(), glyph);
        self.advances.insert(glyph, advance);
        self
    }

    /// A ligature over the glyphs of `components`, resolved when built
    pub fn ligature(mut self, components: &str, glyph: GlyphId, advance: f32) -> Self {
        self.ligatures.push((components.to_string(), glyph));
        self.advances.insert(glyph, advance);
        self
    }

    pub fn notdef_advance(mut self, advance: f32) -> Self {
        self.notdef_advance = advance;
        self
    }

    pub fn build(self) -> MetricsFont {
        let mut font = MetricsFont {
            units_per_em: self.units_per_em,
            coverage: self.coverage,
            advances: self.advances,
            sequences: self.sequences,
            ligatures: HashMap::new(),
            notdef_advance: self.notdef_advance,
        };

        for (components, glyph) in self.ligatures {
            let ids: Option<Vec<GlyphId>> =
                components.chars().map(|ch| font.glyph_id(ch)).collect();
            match ids {
                Some(ids) if ids.len() > 1 => {
                    font.ligatures.insert(ids, glyph);
                },
                _ => log::warn!("Ligature {:?} has uncovered or too few components", components),
            }
        }

        font
    }
}
