// this_file: crates/scriptrun-unicode/src/classify.rs

//! Per-cluster script, direction and attachability.
//!
//! Everything here is a pure function of the ICU4X property tables and the
//! `unicode-bidi` class table. The same scalars always classify the same way.

use icu_properties::{
    props::{
        DefaultIgnorableCodePoint, EmojiPresentation, ExtendedPictographic, GeneralCategory,
        RegionalIndicator, Script as IcuScript,
    },
    script::{ScriptWithExtensions, ScriptWithExtensionsBorrowed},
    CodePointMapData, CodePointMapDataBorrowed, CodePointSetData, CodePointSetDataBorrowed,
};
use scriptrun_core::{
    types::{ClusterCategory, ClusterClass, Direction},
    Script,
};
use unicode_bidi::{bidi_class, BidiClass};

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const EMOJI_PRESENTATION_SELECTOR: char = '\u{FE0F}';
const COMBINING_KEYCAP: char = '\u{20E3}';

/// Is this scalar invisible unless a font says otherwise (ZWJ, variation selectors, tags)?
pub fn is_default_ignorable(ch: char) -> bool {
    CodePointSetData::new::<DefaultIgnorableCodePoint>().contains(ch)
}

/// Does this cluster end a line? Covers the UAX #14 mandatory breaks: BK, CR, LF and NL
pub fn is_hard_break(cluster: &str) -> bool {
    matches!(
        cluster,
        "\n" | "\r" | "\r\n" | "\u{0B}" | "\u{0C}" | "\u{85}" | "\u{2028}" | "\u{2029}"
    )
}

/// Classifies clusters with ICU data baked in
pub struct Classifier {
    script_map: CodePointMapDataBorrowed<'static, IcuScript>,
    category_map: CodePointMapDataBorrowed<'static, GeneralCategory>,
    extensions: ScriptWithExtensionsBorrowed<'static>,
    emoji_presentation: CodePointSetDataBorrowed<'static>,
    pictographic: CodePointSetDataBorrowed<'static>,
    regional_indicator: CodePointSetDataBorrowed<'static>,
    ignorable: CodePointSetDataBorrowed<'static>,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            script_map: CodePointMapData::<IcuScript>::new(),
            category_map: CodePointMapData::<GeneralCategory>::new(),
            extensions: ScriptWithExtensions::new(),
            emoji_presentation: CodePointSetData::new::<EmojiPresentation>(),
            pictographic: CodePointSetData::new::<ExtendedPictographic>(),
            regional_indicator: CodePointSetData::new::<RegionalIndicator>(),
            ignorable: CodePointSetData::new::<DefaultIgnorableCodePoint>(),
        }
    }

    /// Classify one grapheme cluster
    pub fn classify(&self, cluster: &str) -> ClusterClass {
        let Some(base) = self.base_scalar(cluster) else {
            return ClusterClass {
                script: Script::Common,
                direction: Direction::Neutral,
                attachable: true,
                category: ClusterCategory::Other,
                candidates: Vec::new(),
            };
        };

        let emoji = self.is_emoji_cluster(cluster);
        let weak_only = cluster
            .chars()
            .all(|ch| matches!(self.script(ch), Script::Common | Script::Inherited));
        let attachable = weak_only && !emoji;

        let script = if attachable || emoji {
            Script::Common
        } else {
            // Base first, then whichever scalar carries a real script
            std::iter::once(base)
                .chain(cluster.chars())
                .map(|ch| self.script(ch))
                .find(|script| !script.is_weak())
                .unwrap_or(Script::Unknown)
        };

        let category = if emoji {
            ClusterCategory::Emoji
        } else {
            self.category(base)
        };

        ClusterClass {
            script,
            direction: self.direction(base),
            attachable,
            category,
            candidates: self.candidates(base),
        }
    }

    /// Script property of one scalar
    pub fn script(&self, ch: char) -> Script {
        Script::from(self.script_map.get(ch))
    }

    /// Collapsed bidi class of one scalar
    pub fn direction(&self, ch: char) -> Direction {
        match bidi_class(ch) {
            BidiClass::L => Direction::LeftToRight,
            BidiClass::R | BidiClass::AL => Direction::RightToLeft,
            _ => Direction::Neutral,
        }
    }

    /// First scalar that is not a mark, joiner or selector
    fn base_scalar(&self, cluster: &str) -> Option<char> {
        cluster
            .chars()
            .find(|&ch| !self.is_combining(ch))
            .or_else(|| cluster.chars().next())
    }

    fn is_combining(&self, ch: char) -> bool {
        ch == ZERO_WIDTH_JOINER
            || self.ignorable.contains(ch)
            || matches!(
                self.category_map.get(ch),
                GeneralCategory::NonspacingMark
                    | GeneralCategory::SpacingMark
                    | GeneralCategory::EnclosingMark
                    | GeneralCategory::Format
            )
    }

    fn is_emoji_cluster(&self, cluster: &str) -> bool {
        let mut after_pictograph = false;
        for ch in cluster.chars() {
            if self.emoji_presentation.contains(ch)
                || self.regional_indicator.contains(ch)
                || ch == COMBINING_KEYCAP
                || (ch == EMOJI_PRESENTATION_SELECTOR && after_pictograph)
            {
                return true;
            }
            after_pictograph = self.pictographic.contains(ch);
        }
        false
    }

    fn category(&self, ch: char) -> ClusterCategory {
        use GeneralCategory as Gc;
        match self.category_map.get(ch) {
            Gc::UppercaseLetter
            | Gc::LowercaseLetter
            | Gc::TitlecaseLetter
            | Gc::ModifierLetter
            | Gc::OtherLetter => ClusterCategory::Letter,
            Gc::NonspacingMark | Gc::SpacingMark | Gc::EnclosingMark => ClusterCategory::Mark,
            Gc::DecimalNumber | Gc::LetterNumber | Gc::OtherNumber => ClusterCategory::Number,
            Gc::DashPunctuation
            | Gc::OpenPunctuation
            | Gc::ClosePunctuation
            | Gc::ConnectorPunctuation
            | Gc::InitialPunctuation
            | Gc::FinalPunctuation
            | Gc::OtherPunctuation => ClusterCategory::Punctuation,
            Gc::MathSymbol | Gc::CurrencySymbol | Gc::ModifierSymbol | Gc::OtherSymbol => {
                ClusterCategory::Symbol
            },
            Gc::SpaceSeparator | Gc::LineSeparator | Gc::ParagraphSeparator => {
                ClusterCategory::Separator
            },
            Gc::Control => ClusterCategory::Control,
            _ => ClusterCategory::Other,
        }
    }

    /// Specific scripts from Script_Extensions, deduplicated and sorted by name
    fn candidates(&self, ch: char) -> Vec<Script> {
        let mut candidates: Vec<Script> = self
            .extensions
            .get_script_extensions_val(ch)
            .iter()
            .map(Script::from)
            .filter(|script| !script.is_weak())
            .collect();
        candidates.sort_by_key(|script| script.name());
        candidates.dedup();
        candidates
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
