// this_file: crates/scriptrun-unicode/src/tests.rs

use super::*;

fn segment(text: &str) -> Segmentation {
    TextSegmenter::new().segment(text, &SegmentOptions::default())
}

fn run_texts<'a>(text: &'a str, seg: &Segmentation) -> Vec<&'a str> {
    seg.runs.iter().map(|run| run.text(text)).collect()
}

#[test]
fn test_empty_text() {
    let seg = segment("");
    assert!(seg.runs.is_empty());
    assert!(seg.clusters.is_empty());
}

#[test]
fn test_simple_latin() {
    let seg = segment("Hello World");
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Latin);
    assert_eq!(seg.runs[0].direction, Direction::LeftToRight);
    assert_eq!(seg.runs[0].clusters, 0..11);
}

#[test]
fn test_arabic_rtl() {
    // "Hello" in Arabic
    let seg = segment("مرحبا");
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].direction, Direction::RightToLeft);
    assert_eq!(seg.runs[0].script, Script::Arabic);
}

#[test]
fn test_devanagari() {
    // "Namaste" in Devanagari
    let seg = segment("नमस्ते");
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Devanagari);
    assert_eq!(seg.runs[0].direction, Direction::LeftToRight);
}

#[test]
fn test_thai_marks() {
    let text = "สวัสดี";
    let seg = segment(text);
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Thai);
    // Vowel and tone marks ride along with their bases
    assert!(seg.clusters.len() < text.chars().count());
}

#[test]
fn test_chinese_cjk() {
    let seg = segment("你好");
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Han);
}

#[test]
fn test_mixed_latin_arabic() {
    let text = "Hello مرحبا";
    let seg = segment(text);
    assert_eq!(run_texts(text, &seg), vec!["Hello ", "مرحبا"]);
    assert_eq!(seg.runs[0].script, Script::Latin);
    assert_eq!(seg.runs[1].script, Script::Arabic);
    assert_eq!(seg.runs[1].direction, Direction::RightToLeft);
}

#[test]
fn test_hebrew_with_numbers_stays_one_run() {
    let text = "שלום 123 עולם";
    let seg = segment(text);
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Hebrew);
    assert_eq!(seg.runs[0].direction, Direction::RightToLeft);
}

#[test]
fn test_itemizes_cjk_and_latin() {
    let text = "漢字ABC";
    let seg = segment(text);
    assert_eq!(run_texts(text, &seg), vec!["漢字", "ABC"]);
    assert_eq!(seg.runs[0].script, Script::Han);
    assert_eq!(seg.runs[1].script, Script::Latin);
}

#[test]
fn test_whitespace_only_is_one_common_run() {
    let seg = segment("   ");
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Common);
    assert_eq!(seg.runs[0].direction, Direction::Neutral);
    assert_eq!(seg.runs[0].bytes, 0..3);
}

#[test]
fn test_leading_punctuation_joins_first_run() {
    let text = "(abc) 123";
    let seg = segment(text);
    assert_eq!(run_texts(text, &seg), vec![text]);
    assert_eq!(seg.runs[0].script, Script::Latin);
}

#[test]
fn test_leading_digits_join_han_run() {
    let seg = segment("123 世界");
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Han);
}

#[test]
fn test_sample_sentence() {
    let text = "Hello, Java; 世界;! \u{1F487}\u{200D}\u{2640}\u{FE0F}\u{1F30D}";
    let seg = segment(text);
    assert_eq!(
        run_texts(text, &seg),
        vec![
            "Hello, Java; ",
            "世界;! ",
            "\u{1F487}\u{200D}\u{2640}\u{FE0F}\u{1F30D}"
        ]
    );
    let scripts: Vec<Script> = seg.runs.iter().map(|r| r.script).collect();
    assert_eq!(scripts, vec![Script::Latin, Script::Han, Script::Common]);

    // The ZWJ sequence and the globe are one cluster each
    let emoji_run = &seg.runs[2];
    assert_eq!(emoji_run.cluster_count(), 2);
    let first = seg.clusters[emoji_run.clusters.start].clone();
    assert_eq!(&text[first], "\u{1F487}\u{200D}\u{2640}\u{FE0F}");
}

#[test]
fn test_emoji_between_words_splits() {
    let text = "hi \u{1F30D} there";
    let seg = segment(text);
    assert_eq!(run_texts(text, &seg), vec!["hi ", "\u{1F30D} ", "there"]);
}

#[test]
fn test_hard_breaks_split_when_enabled() {
    let options = SegmentOptions {
        split_on_hard_breaks: true,
        ..Default::default()
    };
    let text = "Line1\nLine2";
    let seg = TextSegmenter::new().segment(text, &options);
    assert_eq!(run_texts(text, &seg), vec!["Line1\n", "Line2"]);

    let seg = segment(text);
    assert_eq!(seg.runs.len(), 1);
}

#[test]
fn test_hard_break_after_whitespace_prefix() {
    let options = SegmentOptions {
        split_on_hard_breaks: true,
        ..Default::default()
    };
    let text = " \nab";
    let seg = TextSegmenter::new().segment(text, &options);
    assert_eq!(run_texts(text, &seg), vec![" \n", "ab"]);
    assert_eq!(seg.runs[0].script, Script::Common);
}

#[test]
fn test_tie_break_prefers_preceding_run() {
    // Thaana letter followed by an Arabic-Indic digit (Script_Extensions: Arab, Thaa, Yezi)
    let text = "\u{078B}\u{0660}";
    let seg = segment(text);
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Thaana);
}

#[test]
fn test_tie_break_first_candidate_policy() {
    let options = SegmentOptions {
        tie_break: ScriptTieBreak::FirstCandidate,
        ..Default::default()
    };
    let text = "\u{078B}\u{0660}";
    let seg = TextSegmenter::new().segment(text, &options);
    assert_eq!(seg.runs.len(), 2);
    assert_eq!(seg.runs[1].script, Script::Arabic);
}

#[test]
fn test_tie_break_without_preceding_run() {
    let text = "abc \u{0660}";
    let seg = segment(text);
    assert_eq!(seg.runs.last().map(|r| r.script), Some(Script::Arabic));
}

#[test]
fn test_neutral_run_adopts_strong_direction() {
    let seg = segment("\u{0660}م");
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Arabic);
    assert_eq!(seg.runs[0].direction, Direction::RightToLeft);
}

#[test]
fn test_neutral_led_run_takes_first_strong_direction() {
    let text = "\u{0661}\u{0662} مرحبا";
    let seg = segment(text);
    assert_eq!(run_texts(text, &seg), vec![text]);
    assert_eq!(seg.runs[0].direction, Direction::RightToLeft);

    let seg = segment("\u{0661}\u{0662}");
    assert_eq!(seg.runs[0].direction, Direction::Neutral);
}

#[test]
fn test_unnamed_scripts_split() {
    // Ethiopic then Tifinagh
    let text = "ሰላምⵜⴰ";
    let seg = segment(text);
    assert_eq!(run_texts(text, &seg), vec!["ሰላም", "ⵜⴰ"]);
    assert_eq!(seg.runs[0].script.name(), "Ethiopic");
    assert_eq!(seg.runs[1].script.name(), "Tifinagh");
}

#[test]
fn test_corner_brackets_stay_in_han_run() {
    let text = "「你好」";
    let seg = segment(text);
    assert_eq!(run_texts(text, &seg), vec![text]);
    assert_eq!(seg.runs[0].script, Script::Han);
}

#[test]
fn test_ideographic_comma_between_latin_words() {
    let text = "abc、def";
    let seg = segment(text);
    assert_eq!(run_texts(text, &seg), vec![text]);
    assert_eq!(seg.runs[0].script, Script::Latin);
}

#[test]
fn test_scoped_punctuation_alone_takes_first_candidate() {
    let seg = segment("\u{3001}\u{3002}");
    assert_eq!(seg.runs.len(), 1);
    assert_eq!(seg.runs[0].script, Script::Bopomofo);
    assert_eq!(seg.runs[0].direction, Direction::Neutral);

    // Plain punctuation has no candidates
    assert_eq!(segment("!?").runs[0].script, Script::Common);
}

#[test]
fn test_common_line_prefers_preceding_run_script() {
    let options = SegmentOptions {
        split_on_hard_breaks: true,
        ..Default::default()
    };
    let text = "世界\n\u{3001}";
    let seg = TextSegmenter::new().segment(text, &options);
    assert_eq!(run_texts(text, &seg), vec!["世界\n", "\u{3001}"]);
    assert_eq!(seg.runs[1].script, Script::Han);

    let options = SegmentOptions {
        tie_break: ScriptTieBreak::FirstCandidate,
        ..options
    };
    let seg = TextSegmenter::new().segment(text, &options);
    assert_eq!(seg.runs[1].script, Script::Bopomofo);
}

#[test]
fn test_runs_record_their_line() {
    let options = SegmentOptions {
        split_on_hard_breaks: true,
        ..Default::default()
    };
    let text = "ab 世界\ncd\n\nef";
    let seg = TextSegmenter::new().segment(text, &options);
    assert_eq!(run_texts(text, &seg), vec!["ab ", "世界\n", "cd\n", "\n", "ef"]);
    let lines: Vec<usize> = seg.runs.iter().map(|run| run.line).collect();
    assert_eq!(lines, vec![0, 0, 1, 2, 3]);
    assert_eq!(seg.line_count(), 4);
    let grouped: Vec<usize> = seg.lines().map(|runs| runs.len()).collect();
    assert_eq!(grouped, vec![2, 1, 1, 1]);

    // Without splitting every run sits on line 0
    let seg = segment(text);
    assert!(seg.runs.iter().all(|run| run.line == 0));
    assert_eq!(seg.line_count(), 1);
}

#[test]
fn test_every_mandatory_break_splits() {
    let options = SegmentOptions {
        split_on_hard_breaks: true,
        ..Default::default()
    };
    for brk in ["\n", "\r", "\r\n", "\u{0B}", "\u{0C}", "\u{85}", "\u{2028}", "\u{2029}"] {
        let text = format!("ab{brk}cd");
        let seg = TextSegmenter::new().segment(&text, &options);
        assert_eq!(seg.runs.len(), 2, "{brk:?} should end a line");
        assert_eq!(seg.runs[1].text(&text), "cd");
        assert_eq!(seg.runs[1].line, 1);
    }
}

#[test]
fn test_runs_are_contiguous() {
    let text = "abc, мир! שלום 世界 🌍🌍 ok";
    let seg = segment(text);
    let mut cluster = 0;
    let mut byte = 0;
    for run in &seg.runs {
        assert_eq!(run.clusters.start, cluster);
        assert_eq!(run.bytes.start, byte);
        assert!(run.clusters.end > run.clusters.start);
        cluster = run.clusters.end;
        byte = run.bytes.end;
    }
    assert_eq!(cluster, seg.clusters.len());
    assert_eq!(byte, text.len());
}
