//! Fuzz font parsing and shaping with malformed font bytes
//!
//! Arbitrary data either fails to load or shapes a fixed mixed-script string
//! without panicking.

#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use scriptrun::fontdb::Font;
use scriptrun::prelude::*;

const TEXT: &str = "Hello, مرحبا 世界 e\u{301}";

fuzz_target!(|data: &[u8]| {
    // Skip inputs too small to hold a table directory
    if data.len() < 12 || data.len() > 1_000_000 {
        return;
    }

    let Ok(font) = Font::from_data(data.to_vec()) else {
        return;
    };
    let _ = font.glyph_count();
    for ch in TEXT.chars() {
        if let Some(id) = font.glyph_id(ch) {
            let _ = font.advance_width(id);
        }
    }

    let mut db = FontDatabase::new();
    let _ = db.insert("fuzz", Arc::new(font));
    let analyzer = Analyzer::builder()
        .database(db)
        .config(FontConfig::new().with_default("fuzz"))
        .build();

    let mut out = Vec::new();
    let _ = analyzer.analyze_shaped_runs(TEXT.as_bytes(), 16.0, &mut out);
});
