// this_file: crates/scriptrun-unicode/src/lib.rs

//! Unicode-aware run segmentation: scanner, classifier and segmenter.

pub mod classify;
pub mod scanner;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use classify::{is_default_ignorable, is_hard_break, Classifier};
pub use scanner::{decode, graphemes, Grapheme};

use scriptrun_core::{
    types::{ClusterClass, Direction, ScriptTieBreak, SegmentOptions, Segmentation, TextRun},
    Script,
};

/// Splits text into maximal runs of shared script and direction.
pub struct TextSegmenter {
    classifier: Classifier,
}

impl TextSegmenter {
    /// Create a new segmenter with ICU data baked in.
    pub fn new() -> Self {
        Self {
            classifier: Classifier::new(),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Segment text into runs covering every cluster exactly once.
    pub fn segment(&self, text: &str, options: &SegmentOptions) -> Segmentation {
        let mut clusters = Vec::new();
        let mut runs: Vec<TextRun> = Vec::new();
        let mut open: Option<OpenRun> = None;
        // Leading stretch of attachable clusters with no strong run yet
        let mut pending: Option<Pending> = None;
        let mut line = 0;

        for grapheme in graphemes(text) {
            let index = clusters.len();
            clusters.push(grapheme.range());
            let class = self.classifier.classify(grapheme.text);

            if !class.attachable {
                let preceding = open
                    .as_ref()
                    .map(|run| run.script)
                    .or_else(|| runs.last().map(|run| run.script));
                let script = Self::resolve_script(&class, preceding, options.tie_break);

                let extends = open
                    .as_ref()
                    .is_some_and(|run| run.accepts(script, class.direction));

                if extends {
                    if let Some(run) = open.as_mut() {
                        run.adopt(class.direction);
                    }
                } else {
                    if let Some(run) = open.take() {
                        runs.push(run.close(index, &clusters));
                    }
                    let start = pending.take().map_or(index, |prefix| prefix.start);
                    open = Some(OpenRun {
                        start,
                        line,
                        script,
                        direction: class.direction,
                    });
                }
            } else if open.is_none() {
                pending
                    .get_or_insert_with(|| Pending::new(index))
                    .narrow(&class.candidates);
            }

            if options.split_on_hard_breaks && is_hard_break(grapheme.text) {
                if let Some(run) = open.take() {
                    runs.push(run.close(index + 1, &clusters));
                } else if let Some(prefix) = pending.take() {
                    let run = prefix.into_run(line, runs.last(), options.tie_break);
                    runs.push(run.close(index + 1, &clusters));
                }
                line += 1;
            }
        }

        if let Some(run) = open.take() {
            runs.push(run.close(clusters.len(), &clusters));
        } else if let Some(prefix) = pending.take() {
            let run = prefix.into_run(line, runs.last(), options.tie_break);
            runs.push(run.close(clusters.len(), &clusters));
        }

        log::debug!(
            "Segmented {} bytes into {} clusters and {} runs",
            text.len(),
            clusters.len(),
            runs.len()
        );

        Segmentation { clusters, runs }
    }

    /// Pick a script for a non-attachable cluster
    fn resolve_script(
        class: &ClusterClass,
        preceding: Option<Script>,
        tie_break: ScriptTieBreak,
    ) -> Script {
        if !class.is_ambiguous() {
            return class.script;
        }
        pick_candidate(&class.candidates, preceding, tie_break).unwrap_or(class.script)
    }
}

/// The preceding run's script when allowed and listed, else the first candidate
fn pick_candidate(
    candidates: &[Script],
    preceding: Option<Script>,
    tie_break: ScriptTieBreak,
) -> Option<Script> {
    if tie_break == ScriptTieBreak::PreferPrecedingRun {
        if let Some(script) = preceding.filter(|s| candidates.contains(s)) {
            return Some(script);
        }
    }
    candidates.first().copied()
}

impl Default for TextSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// The run being grown, local to one `segment` call
#[derive(Clone, Copy)]
struct OpenRun {
    start: usize,
    line: usize,
    script: Script,
    direction: Direction,
}

impl OpenRun {
    fn accepts(&self, script: Script, direction: Direction) -> bool {
        self.script == script && self.direction.compatible_with(direction)
    }

    /// A neutral run takes the first strong direction it meets
    fn adopt(&mut self, direction: Direction) {
        if self.direction == Direction::Neutral {
            self.direction = direction;
        }
    }

    fn close(self, end: usize, clusters: &[std::ops::Range<usize>]) -> TextRun {
        let bytes = clusters[self.start].start..clusters[end - 1].end;
        TextRun {
            clusters: self.start..end,
            bytes,
            line: self.line,
            script: self.script,
            direction: self.direction,
            font: None,
        }
    }
}

/// Attachable clusters waiting for a strong run to join
struct Pending {
    start: usize,
    /// Script_Extensions shared by the scoped clusters seen so far
    candidates: Option<Vec<Script>>,
}

impl Pending {
    fn new(start: usize) -> Self {
        Self {
            start,
            candidates: None,
        }
    }

    /// Keep only the scripts every scoped cluster agrees on; a disagreement
    /// keeps the earlier set
    fn narrow(&mut self, scoped: &[Script]) {
        if scoped.is_empty() {
            return;
        }
        match self.candidates.as_mut() {
            None => self.candidates = Some(scoped.to_vec()),
            Some(current) => {
                let shared: Vec<Script> = current
                    .iter()
                    .copied()
                    .filter(|script| scoped.contains(script))
                    .collect();
                if !shared.is_empty() {
                    *current = shared;
                }
            },
        }
    }

    /// An all-Common run, tagged with its punctuation's script when it has one
    fn into_run(
        self,
        line: usize,
        preceding: Option<&TextRun>,
        tie_break: ScriptTieBreak,
    ) -> OpenRun {
        let script = self
            .candidates
            .as_deref()
            .and_then(|candidates| {
                pick_candidate(candidates, preceding.map(|run| run.script), tie_break)
            })
            .unwrap_or(Script::Common);
        OpenRun {
            start: self.start,
            line,
            script,
            direction: Direction::Neutral,
        }
    }
}
