//! Which fonts each script may use

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use scriptrun_core::{error::Result, types::FontId, Script, ScriptRunError};

/// Per-script font candidates plus the process-wide fallback
///
/// Loadable from JSON:
///
/// ```json
/// {
///   "scripts": { "Latin": ["sans"], "Han": ["cjk", "sans"] },
///   "default_font": "sans",
///   "fonts": [{ "id": "sans", "path": "fonts/Sans.ttf" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Ordered candidates per script
    pub scripts: BTreeMap<Script, Vec<FontId>>,
    /// Used when no candidate fits; required before any run is resolved
    pub default_font: Option<FontId>,
    /// Font files a host should load; ignored by the analyzer itself
    pub fonts: Vec<FontSpec>,
}

/// A font file a host loads into the database under `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub id: FontId,
    pub path: PathBuf,
    #[serde(default)]
    pub face_index: u32,
}

impl FontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, id: impl Into<FontId>) -> Self {
        self.default_font = Some(id.into());
        self
    }

    /// Append candidates for a script, after any already configured
    pub fn with_script<I, S>(mut self, script: Script, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FontId>,
    {
        self.scripts
            .entry(script)
            .or_default()
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Candidates for a script, empty when none are configured
    pub fn candidates(&self, script: Script) -> &[FontId] {
        self.scripts.get(&script).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parse a configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScriptRunError::Config(e.to_string()))
    }
}
