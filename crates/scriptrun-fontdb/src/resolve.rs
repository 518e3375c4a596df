// this_file: crates/scriptrun-fontdb/src/resolve.rs

//! Picking one font per run.
//!
//! Candidates for the run's script are tried in configured order:
//!
//! 1. the first that covers every scalar of the run,
//! 2. else the first that covers the run's first non-attachable cluster,
//! 3. else the default fallback.
//!
//! Default-ignorable scalars (ZWJ, variation selectors) never count against
//! coverage. Partial coverage is fine: the shaper draws notdef for the rest.

use std::sync::Arc;

use scriptrun_core::{
    error::Result,
    traits::FontRef,
    types::{FontId, Segmentation, TextRun},
    ScriptRunError,
};
use scriptrun_unicode::{is_default_ignorable, Classifier};

use crate::{FontConfig, FontDatabase};

/// The font chosen for a run
#[derive(Clone)]
pub struct ResolvedFont {
    pub id: FontId,
    pub font: Arc<dyn FontRef>,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont").field("id", &self.id).finish()
    }
}

/// Maps runs to fonts using a configuration and a database
pub struct FontResolver<'a> {
    db: &'a FontDatabase,
    config: &'a FontConfig,
    classifier: &'a Classifier,
}

impl<'a> FontResolver<'a> {
    pub fn new(db: &'a FontDatabase, config: &'a FontConfig, classifier: &'a Classifier) -> Self {
        Self {
            db,
            config,
            classifier,
        }
    }

    /// The default font, or `NoFontAvailable` when it is missing
    pub fn fallback(&self) -> Result<ResolvedFont> {
        let id = self.config.default_font.as_ref().ok_or_else(|| {
            ScriptRunError::NoFontAvailable("no default font configured".to_string())
        })?;
        let font = self.db.get(id).ok_or_else(|| {
            ScriptRunError::NoFontAvailable(format!("default font '{}' is not loaded", id))
        })?;
        Ok(ResolvedFont {
            id: id.clone(),
            font,
        })
    }

    /// Choose the font for one run of `segmentation`
    pub fn resolve(
        &self,
        run: &TextRun,
        segmentation: &Segmentation,
        source: &str,
    ) -> Result<ResolvedFont> {
        let fallback = self.fallback()?;
        let candidates = self.candidates(run);

        let text = run.text(source);
        if let Some(found) = candidates.iter().find(|c| covers_text(c.font.as_ref(), text)) {
            return Ok(found.clone());
        }

        let spans = segmentation.clusters.get(run.clusters.clone()).unwrap_or(&[]);
        let anchor = spans
            .iter()
            .filter_map(|span| source.get(span.clone()))
            .find(|cluster| !self.classifier.classify(cluster).attachable);
        if let Some(cluster) = anchor {
            if let Some(found) = candidates
                .iter()
                .find(|c| covers_text(c.font.as_ref(), cluster))
            {
                return Ok(found.clone());
            }
        }

        Ok(fallback)
    }

    fn candidates(&self, run: &TextRun) -> Vec<ResolvedFont> {
        self.config
            .candidates(run.script)
            .iter()
            .filter_map(|id| match self.db.get(id) {
                Some(font) => Some(ResolvedFont {
                    id: id.clone(),
                    font,
                }),
                None => {
                    log::warn!("Font '{}' configured for {} is not loaded", id, run.script);
                    None
                },
            })
            .collect()
    }
}

/// Does the font draw every visible scalar of `text`?
pub fn covers_text(font: &dyn FontRef, text: &str) -> bool {
    font.covers_all(&mut text.chars().filter(|&ch| !is_default_ignorable(ch)))
}
