//! Cluster Shaper - glyphs straight from font metadata
//!
//! Works with any [`FontRef`], including fonts that carry no binary data.
//! Each grapheme cluster becomes one or more glyphs:
//!
//! - a whole-cluster sequence glyph when the font has one (ZWJ emoji, flags)
//! - otherwise one glyph per visible scalar, so base and marks share a cluster
//! - a single notdef glyph when any visible scalar is missing
//!
//! Runs of single-glyph clusters are then offered to the font's ligature
//! table, longest match first.

use std::sync::Arc;

use scriptrun_core::{
    error::Result,
    traits::{FontRef, Shaper},
    types::{GlyphId, ShapedGlyph, ShapingInput, NOTDEF_GLYPH},
    ShapingParams,
};
use scriptrun_unicode::is_default_ignorable;

/// Longest component sequence offered to the ligature table
pub const MAX_LIGATURE_COMPONENTS: usize = 4;

/// A shaper that needs nothing but coverage and advances
pub struct ClusterShaper;

impl ClusterShaper {
    pub fn new() -> Self {
        Self
    }

    /// Glyphs for one cluster, before ligatures
    fn map_cluster(font: &dyn FontRef, cluster: &str) -> Vec<GlyphId> {
        if cluster.chars().nth(1).is_some() {
            if let Some(glyph) = font.sequence_glyph(cluster) {
                return vec![glyph];
            }
        }

        let mut scalars: Vec<char> = cluster
            .chars()
            .filter(|&ch| !is_default_ignorable(ch))
            .collect();
        if scalars.is_empty() {
            // A cluster of ignorables alone still needs a glyph
            scalars.extend(cluster.chars().take(1));
        }

        let glyphs: Option<Vec<GlyphId>> = scalars
            .iter()
            .map(|&ch| font.glyph_id(ch).filter(|&id| id != NOTDEF_GLYPH))
            .collect();

        glyphs.unwrap_or_else(|| vec![NOTDEF_GLYPH])
    }

    /// Longest ligature starting at `start`, as (glyph, component count)
    fn find_ligature(
        font: &dyn FontRef,
        mapped: &[(usize, Vec<GlyphId>)],
        start: usize,
    ) -> Option<(GlyphId, usize)> {
        let components: Vec<GlyphId> = mapped[start..]
            .iter()
            .take(MAX_LIGATURE_COMPONENTS)
            .map_while(|(_, ids)| match ids.as_slice() {
                [id] if *id != NOTDEF_GLYPH => Some(*id),
                _ => None,
            })
            .collect();

        (2..=components.len())
            .rev()
            .find_map(|len| font.ligature(&components[..len]).map(|glyph| (glyph, len)))
    }
}

impl Default for ClusterShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl Shaper for ClusterShaper {
    fn name(&self) -> &'static str {
        "cluster"
    }

    fn shape(
        &self,
        input: &ShapingInput<'_>,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<Vec<ShapedGlyph>> {
        params.validate()?;
        let font = font.as_ref();
        let scale = params.scale(font.units_per_em());

        let mut mapped = Vec::with_capacity(input.clusters.len());
        for local in 0..input.clusters.len() {
            let cluster = input.cluster_str(local)?;
            mapped.push((input.first_cluster + local, Self::map_cluster(font, cluster)));
        }

        let mut glyphs = Vec::with_capacity(mapped.len());
        let mut i = 0;
        while i < mapped.len() {
            let index = mapped[i].0;
            if let Some((glyph, len)) = Self::find_ligature(font, &mapped, i) {
                let advance = font.advance_width(glyph) * scale;
                glyphs.push(ShapedGlyph::advancing(glyph, advance, index..index + len));
                i += len;
                continue;
            }

            for &id in &mapped[i].1 {
                let advance = font.advance_width(id) * scale;
                glyphs.push(ShapedGlyph::advancing(id, advance, index..index + 1));
            }
            i += 1;
        }

        log::debug!(
            "ClusterShaper: {} clusters became {} glyphs",
            mapped.len(),
            glyphs.len()
        );

        Ok(glyphs)
    }
}
