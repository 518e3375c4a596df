// this_file: crates/scriptrun-unicode/src/scanner.rs

//! Bytes in, grapheme clusters out.

use std::ops::Range;

use icu_segmenter::GraphemeClusterSegmenter;
use scriptrun_core::Result;

/// One user-perceived character, borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grapheme<'a> {
    /// Byte offset of the cluster in the source
    pub offset: usize,
    pub text: &'a str,
}

impl<'a> Grapheme<'a> {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    pub fn chars(&self) -> std::str::Chars<'a> {
        self.text.chars()
    }
}

/// Validates UTF-8 without substituting anything
pub fn decode(bytes: &[u8]) -> Result<&str> {
    Ok(std::str::from_utf8(bytes)?)
}

/// Lazily walks extended grapheme clusters in source order
///
/// Forward-only. Call again to start over.
pub fn graphemes(text: &str) -> impl Iterator<Item = Grapheme<'_>> + '_ {
    let mut boundaries = GraphemeClusterSegmenter::new().segment_str(text);
    // The segmenter always reports offset 0 first
    let mut start = boundaries.next().unwrap_or(0);
    boundaries.filter_map(move |end| {
        if end <= start {
            return None;
        }
        let grapheme = Grapheme {
            offset: start,
            text: &text[start..end],
        };
        start = end;
        Some(grapheme)
    })
}
