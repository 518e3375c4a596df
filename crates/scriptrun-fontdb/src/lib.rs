//! Where runs meet their fonts: metadata, configuration and resolution
//!
//! The fourth stage of the pipeline. Holds the fonts a caller has configured,
//! answers coverage and advance questions about them, and picks one font per
//! run. Nothing here rasterizes; glyph outlines are never read.
//!
//! ## Memory Management
//!
//! Fonts store their raw data plus the horizontal advances, read once at load.
//! Character lookups create a `read_fonts::FontRef` on demand; coverage checks
//! over a whole run parse `cmap` once for the run. The database hands out
//! `Arc<dyn FontRef>` so runs shaped in parallel share one immutable font.

pub mod config;
pub mod metrics;
pub mod resolve;

pub use config::{FontConfig, FontSpec};
pub use metrics::{MetricsFont, MetricsFontBuilder};
pub use resolve::{covers_text, FontResolver, ResolvedFont};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use read_fonts::{types::GlyphId as ReadGlyphId, FontRef as ReadFontRef, TableProvider};

use scriptrun_core::{
    error::{FontLoadError, Result},
    traits::FontRef,
    types::{FontId, GlyphId, NOTDEF_GLYPH},
};

/// An OpenType or TrueType face, parsed lazily from its bytes
///
/// For TTC collections, the `face_index` specifies which face to use.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    glyph_count: Option<u32>,
    /// `hmtx` advance of every glyph, indexed by glyph id
    advances: Vec<u16>,
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;

        Self::from_data_index(data, face_index)
    }

    /// Turns raw font bytes into a face
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .map_err(|_| FontLoadError::InvalidData)?;

        let glyph_count = font_ref.maxp().ok().map(|maxp| u32::from(maxp.num_glyphs()));
        let advances = match font_ref.hmtx() {
            Ok(hmtx) => (0..glyph_count.unwrap_or(0))
                .map(|gid| hmtx.advance(ReadGlyphId::new(gid)).unwrap_or(0))
                .collect(),
            Err(_) => Vec::new(),
        };

        Ok(Font {
            data,
            face_index,
            units_per_em,
            glyph_count,
            advances,
        })
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Advance in font units; glyphs outside the font report zero
    fn advance_width(&self, glyph_id: GlyphId) -> f32 {
        usize::try_from(glyph_id)
            .ok()
            .and_then(|index| self.advances.get(index))
            .copied()
            .map_or(0.0, f32::from)
    }

    fn glyph_count(&self) -> Option<u32> {
        self.glyph_count
    }

    fn covers_all(&self, chars: &mut dyn Iterator<Item = char>) -> bool {
        let Some(font) = self.font_ref() else {
            return chars.next().is_none();
        };
        let Ok(cmap) = font.cmap() else {
            return chars.next().is_none();
        };
        for ch in chars {
            let covered = cmap
                .map_codepoint(ch)
                .is_some_and(|gid| gid.to_u32() != NOTDEF_GLYPH);
            if !covered {
                return false;
            }
        }
        true
    }
}

/// Every font a caller configured, by id
///
/// Immutable once handed to an analyzer. Iteration order is the id order.
#[derive(Clone, Default)]
pub struct FontDatabase {
    fonts: BTreeMap<FontId, Arc<dyn FontRef>>,
}

impl FontDatabase {
    /// Starts with an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a font under an id; ids are unique
    pub fn insert(&mut self, id: impl Into<FontId>, font: Arc<dyn FontRef>) -> Result<()> {
        let id = id.into();
        if self.fonts.contains_key(&id) {
            return Err(FontLoadError::DuplicateId(id).into());
        }
        log::debug!("Registered font '{}' (upem {})", id, font.units_per_em());
        self.fonts.insert(id, font);
        Ok(())
    }

    /// Loads a font file and registers it
    pub fn load_file(&mut self, id: impl Into<FontId>, path: impl AsRef<Path>) -> Result<()> {
        let font = Font::from_file(path)?;
        self.insert(id, Arc::new(font))
    }

    /// Loads every font a configuration names
    pub fn load_specs(&mut self, specs: &[FontSpec]) -> Result<()> {
        for spec in specs {
            let font = Font::from_file_index(&spec.path, spec.face_index)?;
            self.insert(spec.id.clone(), Arc::new(font))?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn FontRef>> {
        self.fonts.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fonts.contains_key(id)
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.fonts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl std::fmt::Debug for FontDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontDatabase")
            .field("ids", &self.fonts.keys().collect::<Vec<_>>())
            .finish()
    }
}
