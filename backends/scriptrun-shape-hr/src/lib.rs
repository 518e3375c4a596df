//! OpenType shaping backend using harfrust
//!
//! Harfrust is a pure Rust port of HarfBuzz. It reads GSUB/GPOS from the
//! font's binary data, so it only works for fonts that carry bytes; anything
//! else (metadata-only fonts, unparsable data) goes to [`ClusterShaper`].
//!
//! Harfrust reports clusters as byte offsets into the run and emits
//! right-to-left runs in visual order. Both are undone here: glyphs come back
//! in logical order with cluster-arena ranges.

use std::str::FromStr;
use std::sync::Arc;

use harfrust::{
    Direction as HrDirection, Feature, FontRef as HrFontRef, GlyphBuffer, Language,
    Script as HrScript, ShaperData, Tag, UnicodeBuffer,
};

use scriptrun_core::{
    error::Result,
    traits::{FontRef, Shaper},
    types::{Direction, ShapedGlyph, ShapingInput, NOTDEF_GLYPH},
    ShapingParams,
};
use scriptrun_shape_cluster::ClusterShaper;

/// One glyph as harfrust reports it, in font units
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawGlyph {
    id: u32,
    /// Byte offset into the run text
    cluster: u32,
    x_advance: i32,
    y_advance: i32,
    x_offset: i32,
    y_offset: i32,
}

/// Pure Rust OpenType shaping powered by harfrust
pub struct HarfrustShaper {
    fallback: ClusterShaper,
}

impl HarfrustShaper {
    pub fn new() -> Self {
        Self {
            fallback: ClusterShaper::new(),
        }
    }

    /// Neutral runs shape left to right
    fn to_hr_direction(dir: Direction) -> HrDirection {
        match dir {
            Direction::RightToLeft => HrDirection::RightToLeft,
            Direction::LeftToRight | Direction::Neutral => HrDirection::LeftToRight,
        }
    }

    /// Parse a 4-character tag string into a harfrust Tag
    fn parse_tag(tag_str: &str) -> Option<Tag> {
        let bytes: [u8; 4] = tag_str.as_bytes().try_into().ok()?;
        Some(Tag::new(&bytes))
    }

    fn read_buffer(buffer: &GlyphBuffer) -> Vec<RawGlyph> {
        buffer
            .glyph_infos()
            .iter()
            .zip(buffer.glyph_positions())
            .map(|(info, pos)| RawGlyph {
                id: info.glyph_id,
                cluster: info.cluster,
                x_advance: pos.x_advance,
                y_advance: pos.y_advance,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
            })
            .collect()
    }

    /// Logical order, arena cluster ranges, one notdef per cluster
    fn collect_glyphs(
        input: &ShapingInput<'_>,
        mut raw: Vec<RawGlyph>,
        scale: f32,
    ) -> Vec<ShapedGlyph> {
        if input.direction.is_rtl() {
            raw.reverse();
        }

        let starts: Vec<usize> = raw
            .iter()
            .map(|glyph| input.cluster_at(glyph.cluster as usize))
            .collect();

        let mut glyphs: Vec<ShapedGlyph> = Vec::with_capacity(raw.len());
        for (k, glyph) in raw.iter().enumerate() {
            let start = starts[k];
            let repeated_notdef = glyph.id == NOTDEF_GLYPH
                && glyphs
                    .last()
                    .is_some_and(|prev| prev.is_notdef() && prev.clusters.start == start);
            if repeated_notdef {
                continue;
            }

            // A glyph covers every cluster up to the next glyph's cluster
            let end = starts[k + 1..]
                .iter()
                .copied()
                .find(|&next| next > start)
                .unwrap_or_else(|| input.end_cluster());

            glyphs.push(ShapedGlyph {
                id: glyph.id,
                x_advance: glyph.x_advance as f32 * scale,
                y_advance: glyph.y_advance as f32 * scale,
                x_offset: glyph.x_offset as f32 * scale,
                y_offset: glyph.y_offset as f32 * scale,
                clusters: start..end,
            });
        }

        glyphs
    }
}

impl Default for HarfrustShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl Shaper for HarfrustShaper {
    fn name(&self) -> &'static str {
        "harfrust"
    }

    fn shape(
        &self,
        input: &ShapingInput<'_>,
        font: Arc<dyn FontRef>,
        params: &ShapingParams,
    ) -> Result<Vec<ShapedGlyph>> {
        params.validate()?;
        if input.text.is_empty() {
            return Ok(Vec::new());
        }

        let font_data = font.data();
        if font_data.is_empty() {
            log::debug!("HarfrustShaper: no font data, using cluster shaping");
            return self.fallback.shape(input, Arc::clone(&font), params);
        }

        let hr_font = match HrFontRef::from_index(font_data, font.face_index()) {
            Ok(f) => f,
            Err(_) => {
                log::debug!(
                    "HarfrustShaper: unparsable font data (face {}), using cluster shaping",
                    font.face_index()
                );
                return self.fallback.shape(input, Arc::clone(&font), params);
            },
        };

        // Caches font tables; rebuilt per run since fonts are shared read-only
        let shaper_data = ShaperData::new(&hr_font);
        let shaper = shaper_data
            .shaper(&hr_font)
            .point_size(Some(params.size))
            .build();

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(input.text);
        buffer.set_direction(Self::to_hr_direction(input.direction));

        if let Some(ref lang) = params.language {
            if let Ok(language) = Language::from_str(lang) {
                buffer.set_language(language);
            }
        }

        if let Some(script) = input
            .script
            .iso15924()
            .and_then(Self::parse_tag)
            .and_then(HrScript::from_iso15924_tag)
        {
            buffer.set_script(script);
        }

        let features: Vec<Feature> = params
            .features
            .iter()
            .filter_map(|(name, value)| {
                Self::parse_tag(name).map(|tag| Feature {
                    tag,
                    value: *value,
                    start: 0,
                    end: u32::MAX,
                })
            })
            .collect();

        let output = shaper.shape(buffer, &features);
        let raw = Self::read_buffer(&output);
        let glyphs = Self::collect_glyphs(input, raw, params.scale(font.units_per_em()));

        log::debug!(
            "HarfrustShaper: {} clusters became {} glyphs",
            input.clusters.len(),
            glyphs.len()
        );

        Ok(glyphs)
    }
}
