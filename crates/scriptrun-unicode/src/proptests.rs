use super::*;
use proptest::prelude::*;

fn segment(text: &str) -> Segmentation {
    TextSegmenter::new().segment(text, &SegmentOptions::default())
}

// Property: run substrings concatenate back to the input
proptest! {
    #[test]
    fn prop_runs_concatenate_to_input(s in "\\PC*") {
        let seg = segment(&s);
        let joined: String = seg.runs.iter().map(|run| run.text(&s)).collect();
        prop_assert_eq!(joined, s);
    }
}

// Property: every cluster belongs to exactly one run, in order
proptest! {
    #[test]
    fn prop_runs_partition_clusters(s in "\\PC*") {
        let seg = segment(&s);
        let mut next = 0;
        for run in &seg.runs {
            prop_assert_eq!(run.clusters.start, next);
            prop_assert!(run.clusters.end > run.clusters.start);
            prop_assert_eq!(run.bytes.start, seg.clusters[run.clusters.start].start);
            prop_assert_eq!(run.bytes.end, seg.clusters[run.clusters.end - 1].end);
            next = run.clusters.end;
        }
        prop_assert_eq!(next, seg.clusters.len());
    }
}

// Property: non-empty text always yields at least one run
proptest! {
    #[test]
    fn prop_non_empty_has_runs(s in "\\PC+") {
        let seg = segment(&s);
        prop_assert!(!seg.runs.is_empty());
    }
}

const MIXED_SCRIPTS: &str = concat!(
    "[a-zA-Z0-9 ,.!",
    "\u{0600}-\u{06FF}",
    "\u{4E00}-\u{4E20}",
    "\u{05D0}-\u{05EA}]*"
);

// Property: adjacent runs differ in script or direction
proptest! {
    #[test]
    fn prop_adjacent_runs_are_distinct(s in MIXED_SCRIPTS) {
        let seg = segment(&s);
        for pair in seg.runs.windows(2) {
            let same_script = pair[0].script == pair[1].script;
            let same_direction = pair[0].direction.compatible_with(pair[1].direction);
            prop_assert!(!(same_script && same_direction));
        }
    }
}

const LATIN_WITH_CJK_PUNCTUATION: &str = concat!(
    "[a-z]{1,8}",
    "([\u{3001}\u{3002}\u{300C}\u{300D}\u{30FB}][a-z]{1,8})*"
);

// Property: CJK punctuation inside Latin text never starts a run of its own
proptest! {
    #[test]
    fn prop_scoped_punctuation_attaches(s in LATIN_WITH_CJK_PUNCTUATION) {
        let seg = segment(&s);
        prop_assert_eq!(seg.runs.len(), 1);
        prop_assert_eq!(seg.runs[0].script, Script::Latin);
    }
}

// Property: with hard-break splitting, line indices start at 0 and never skip
proptest! {
    #[test]
    fn prop_line_indices_are_dense(s in "[a-z \n\u{4E00}-\u{4E20}]*") {
        let options = SegmentOptions {
            split_on_hard_breaks: true,
            ..Default::default()
        };
        let seg = TextSegmenter::new().segment(&s, &options);
        let mut line = 0;
        for run in &seg.runs {
            prop_assert!(run.line == line || run.line == line + 1);
            line = run.line;
        }
        if let Some(first) = seg.runs.first() {
            prop_assert_eq!(first.line, 0);
        }
    }
}

// Property: segmentation is deterministic
proptest! {
    #[test]
    fn prop_segmentation_is_deterministic(s in "\\PC*") {
        let segmenter = TextSegmenter::new();
        let options = SegmentOptions::default();
        prop_assert_eq!(segmenter.segment(&s, &options), segmenter.segment(&s, &options));
    }
}

// Property: clusters tile the input without gaps
proptest! {
    #[test]
    fn prop_graphemes_tile_input(s in "\\PC*") {
        let mut end = 0;
        for g in graphemes(&s) {
            prop_assert_eq!(g.offset, end);
            prop_assert!(!g.is_empty());
            end = g.range().end;
        }
        prop_assert_eq!(end, s.len());
    }
}
