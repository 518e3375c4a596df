//! Fuzz the entry operations with arbitrary bytes
//!
//! Invalid UTF-8 must come back as an error with nothing written; valid text
//! must produce runs that tile the input and glyphs that stay inside them.

#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use scriptrun::fontdb::MetricsFont;
use scriptrun::prelude::*;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4_096 {
        return;
    }

    let mut db = FontDatabase::new();
    let _ = db.insert("fallback", Arc::new(MetricsFont::last_resort()));
    let analyzer = Analyzer::builder()
        .database(db)
        .config(FontConfig::new().with_default("fallback"))
        .build();

    let mut out = Vec::new();
    let result = analyzer.analyze_shaped_runs(data, 16.0, &mut out);

    let Ok(text) = std::str::from_utf8(data) else {
        assert!(result.is_err());
        assert!(out.is_empty());
        return;
    };
    assert!(result.is_ok());

    let seg = analyzer.segment(text);
    let joined: String = seg.runs.iter().map(|run| run.text(text)).collect();
    assert_eq!(joined, text);

    if let Ok(shaped) = analyzer.shape(text, &seg, 16.0) {
        for run in &shaped {
            for glyph in &run.glyphs {
                assert!(glyph.clusters.start >= run.run.clusters.start);
                assert!(glyph.clusters.end <= run.run.clusters.end);
            }
        }
    }
});
