//! The entry operations: text in, report out

// this_file: crates/scriptrun/src/analyzer.rs

use std::io::Write;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use scriptrun_core::{
    error::Result,
    traits::Shaper,
    types::{ScriptTieBreak, SegmentOptions, Segmentation, ShapedRun, TextRun},
    validate_font_size, ShapingParams,
};
use scriptrun_export::{write_report, ReportFormat, Reporter};
use scriptrun_fontdb::{FontConfig, FontDatabase, FontResolver};
use scriptrun_unicode::{decode, TextSegmenter};

/// Runs text through scanning, segmentation, font resolution and shaping
///
/// Holds only immutable configuration, so one analyzer can serve many calls
/// from many threads.
///
/// ```ignore
/// let analyzer = Analyzer::builder()
///     .database(db)
///     .config(FontConfig::new().with_default("fallback"))
///     .format(ReportFormat::Json)
///     .build();
///
/// analyzer.analyze_runs(b"Hello", 16.0, &mut std::io::stdout())?;
/// ```
pub struct Analyzer {
    segmenter: TextSegmenter,
    db: FontDatabase,
    config: FontConfig,
    options: SegmentOptions,
    shaper: Arc<dyn Shaper>,
    reporter: Box<dyn Reporter>,
    format: ReportFormat,
    language: Option<String>,
    features: Vec<(String, u32)>,
}

impl Analyzer {
    /// Start building a new analyzer
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Write a run-only report of `text`
    ///
    /// Never consults the font configuration, so it works without fonts.
    pub fn analyze_runs(&self, text: &[u8], font_size: f32, sink: &mut dyn Write) -> Result<()> {
        let text = decode(text)?;
        let size = validate_font_size(font_size)?;

        let segmentation = self.segment(text);
        let report = self.reporter.runs(text, size, &segmentation)?;
        write_report(sink, &report)
    }

    /// Write a run and glyph report of `text`
    pub fn analyze_shaped_runs(
        &self,
        text: &[u8],
        font_size: f32,
        sink: &mut dyn Write,
    ) -> Result<()> {
        let text = decode(text)?;
        let size = validate_font_size(font_size)?;

        let segmentation = self.segment(text);
        let shaped = self.shape(text, &segmentation, size)?;
        let report = self.reporter.shaped(text, size, &shaped)?;
        write_report(sink, &report)
    }

    /// Split `text` into clusters and runs
    pub fn segment(&self, text: &str) -> Segmentation {
        self.segmenter.segment(text, &self.options)
    }

    /// Resolve a font for every run and shape it at `font_size`
    ///
    /// Results come back in source order.
    pub fn shape(
        &self,
        text: &str,
        segmentation: &Segmentation,
        font_size: f32,
    ) -> Result<Vec<ShapedRun>> {
        let params = self.params(font_size)?;
        let resolver = FontResolver::new(&self.db, &self.config, self.segmenter.classifier());

        #[cfg(feature = "parallel")]
        let shaped: Result<Vec<ShapedRun>> = segmentation
            .runs
            .par_iter()
            .map(|run| self.shape_run(&resolver, text, segmentation, run, &params))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let shaped: Result<Vec<ShapedRun>> = segmentation
            .runs
            .iter()
            .map(|run| self.shape_run(&resolver, text, segmentation, run, &params))
            .collect();

        let shaped = shaped?;
        log::debug!(
            "{} shaped {} runs into {} glyphs",
            self.shaper.name(),
            shaped.len(),
            shaped.iter().map(|run| run.glyphs.len()).sum::<usize>()
        );
        Ok(shaped)
    }

    fn shape_run(
        &self,
        resolver: &FontResolver<'_>,
        text: &str,
        segmentation: &Segmentation,
        run: &TextRun,
        params: &ShapingParams,
    ) -> Result<ShapedRun> {
        let resolved = resolver.resolve(run, segmentation, text)?;
        let input = segmentation.shaping_input(text, run);
        let glyphs = self.shaper.shape(&input, resolved.font.clone(), params)?;

        let mut run = run.clone();
        run.font = Some(resolved.id.clone());
        Ok(ShapedRun {
            run,
            font: resolved.id,
            size: params.size,
            glyphs,
        })
    }

    fn params(&self, font_size: f32) -> Result<ShapingParams> {
        let params = ShapingParams {
            size: font_size,
            language: self.language.clone(),
            features: self.features.clone(),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn database(&self) -> &FontDatabase {
        &self.db
    }

    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn shaper_name(&self) -> &'static str {
        self.shaper.name()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        AnalyzerBuilder::new().build()
    }
}

/// Assemble an [`Analyzer`] piece by piece
///
/// Everything is optional. Without fonts the analyzer still produces run
/// reports; shaping then fails with `NoFontAvailable`.
pub struct AnalyzerBuilder {
    db: FontDatabase,
    config: FontConfig,
    options: SegmentOptions,
    shaper: Option<Arc<dyn Shaper>>,
    format: ReportFormat,
    language: Option<String>,
    features: Vec<(String, u32)>,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            db: FontDatabase::new(),
            config: FontConfig::new(),
            options: SegmentOptions::default(),
            shaper: None,
            format: ReportFormat::default(),
            language: None,
            features: Vec::new(),
        }
    }

    /// Fonts the resolver may pick from
    pub fn database(mut self, db: FontDatabase) -> Self {
        self.db = db;
        self
    }

    /// Per-script candidates and the default fallback font
    pub fn config(mut self, config: FontConfig) -> Self {
        self.config = config;
        self
    }

    pub fn segment_options(mut self, options: SegmentOptions) -> Self {
        self.options = options;
        self
    }

    pub fn tie_break(mut self, tie_break: ScriptTieBreak) -> Self {
        self.options.tie_break = tie_break;
        self
    }

    pub fn split_on_hard_breaks(mut self, split: bool) -> Self {
        self.options.split_on_hard_breaks = split;
        self
    }

    /// Choose who turns clusters into glyphs
    pub fn shaper(mut self, shaper: Arc<dyn Shaper>) -> Self {
        self.shaper = Some(shaper);
        self
    }

    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// BCP 47 language hint passed to the shaper
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// OpenType feature setting such as `("liga", 0)`
    pub fn feature(mut self, tag: impl Into<String>, value: u32) -> Self {
        self.features.push((tag.into(), value));
        self
    }

    pub fn build(self) -> Analyzer {
        let shaper = self.shaper.unwrap_or_else(default_shaper);
        for (script, ids) in &self.config.scripts {
            for id in ids {
                if !self.db.contains(id) {
                    log::warn!("Font '{}' configured for {} is not loaded", id, script);
                }
            }
        }
        log::debug!(
            "Analyzer with {} fonts, shaper {}, {:?} reports",
            self.db.len(),
            shaper.name(),
            self.format
        );

        Analyzer {
            segmenter: TextSegmenter::new(),
            db: self.db,
            config: self.config,
            options: self.options,
            shaper,
            reporter: self.format.reporter(),
            format: self.format,
            language: self.language,
            features: self.features,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "shaping-hr")]
fn default_shaper() -> Arc<dyn Shaper> {
    Arc::new(scriptrun_shape_hr::HarfrustShaper::new())
}

#[cfg(not(feature = "shaping-hr"))]
fn default_shaper() -> Arc<dyn Shaper> {
    Arc::new(scriptrun_shape_cluster::ClusterShaper::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptrun_core::ScriptRunError;
    use scriptrun_fontdb::MetricsFont;

    fn analyzer() -> Analyzer {
        let mut db = FontDatabase::new();
        db.insert("fallback", Arc::new(MetricsFont::last_resort()))
            .unwrap();
        Analyzer::builder()
            .database(db)
            .config(FontConfig::new().with_default("fallback"))
            .build()
    }

    #[test]
    fn analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }

    #[test]
    fn shaped_runs_carry_their_font() {
        let analyzer = analyzer();
        let seg = analyzer.segment("abc 世界");
        let shaped = analyzer.shape("abc 世界", &seg, 16.0).unwrap();
        assert_eq!(shaped.len(), seg.runs.len());
        for run in &shaped {
            assert_eq!(run.font, "fallback");
            assert_eq!(run.run.font.as_deref(), Some("fallback"));
        }
    }

    #[test]
    fn shape_validates_size() {
        let analyzer = analyzer();
        let seg = analyzer.segment("abc");
        let err = analyzer.shape("abc", &seg, 0.0).unwrap_err();
        assert!(matches!(err, ScriptRunError::InvalidFontSize(_)));
    }

    #[test]
    fn builder_records_options() {
        let analyzer = Analyzer::builder()
            .tie_break(ScriptTieBreak::FirstCandidate)
            .split_on_hard_breaks(true)
            .format(ReportFormat::Json)
            .build();
        assert_eq!(analyzer.options().tie_break, ScriptTieBreak::FirstCandidate);
        assert!(analyzer.options().split_on_hard_breaks);
        assert_eq!(analyzer.format(), ReportFormat::Json);
    }

    #[test]
    fn features_reach_shaping_params() {
        let analyzer = Analyzer::builder().language("tr").feature("liga", 0).build();
        let params = analyzer.params(12.0).unwrap();
        assert_eq!(params.language.as_deref(), Some("tr"));
        assert_eq!(params.features, vec![("liga".to_string(), 0)]);
    }
}
