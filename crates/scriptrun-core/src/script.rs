//! Writing systems the pipeline tells apart
//!
//! `Common` and `Inherited` are the weak scripts: punctuation, digits, spaces
//! and marks that borrow the script of a neighbour. Scripts without a
//! dedicated variant keep their own identity in [`Script::Other`], so two
//! different unnamed scripts never share a run.

use icu_properties::{
    props::Script as IcuScript, PropertyNamesLong, PropertyNamesShort, PropertyParser,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A Unicode script without a dedicated [`Script`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OtherScript(IcuScript);

impl OtherScript {
    /// Long Unicode name, e.g. `Ethiopic` or `Old_Italic`
    pub fn name(self) -> &'static str {
        PropertyNamesLong::<IcuScript>::new()
            .get(self.0)
            .unwrap_or("Unknown")
    }

    pub fn iso15924(self) -> Option<&'static str> {
        PropertyNamesShort::<IcuScript>::new().get(self.0)
    }
}

/// Unicode script of a cluster or run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Script {
    Common,
    Inherited,
    Unknown,
    Latin,
    Greek,
    Cyrillic,
    Armenian,
    Hebrew,
    Arabic,
    Syriac,
    Thaana,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Thai,
    Lao,
    Tibetan,
    Myanmar,
    Georgian,
    Hangul,
    Cherokee,
    Khmer,
    Mongolian,
    Han,
    Hiragana,
    Katakana,
    Bopomofo,
    Yi,
    Other(OtherScript),
}

impl Script {
    pub const ALL: [Script; 35] = [
        Script::Common,
        Script::Inherited,
        Script::Unknown,
        Script::Latin,
        Script::Greek,
        Script::Cyrillic,
        Script::Armenian,
        Script::Hebrew,
        Script::Arabic,
        Script::Syriac,
        Script::Thaana,
        Script::Devanagari,
        Script::Bengali,
        Script::Gurmukhi,
        Script::Gujarati,
        Script::Oriya,
        Script::Tamil,
        Script::Telugu,
        Script::Kannada,
        Script::Malayalam,
        Script::Sinhala,
        Script::Thai,
        Script::Lao,
        Script::Tibetan,
        Script::Myanmar,
        Script::Georgian,
        Script::Hangul,
        Script::Cherokee,
        Script::Khmer,
        Script::Mongolian,
        Script::Han,
        Script::Hiragana,
        Script::Katakana,
        Script::Bopomofo,
        Script::Yi,
    ];

    /// Long Unicode name, as printed in reports
    pub fn name(self) -> &'static str {
        match self {
            Script::Common => "Common",
            Script::Inherited => "Inherited",
            Script::Unknown => "Unknown",
            Script::Latin => "Latin",
            Script::Greek => "Greek",
            Script::Cyrillic => "Cyrillic",
            Script::Armenian => "Armenian",
            Script::Hebrew => "Hebrew",
            Script::Arabic => "Arabic",
            Script::Syriac => "Syriac",
            Script::Thaana => "Thaana",
            Script::Devanagari => "Devanagari",
            Script::Bengali => "Bengali",
            Script::Gurmukhi => "Gurmukhi",
            Script::Gujarati => "Gujarati",
            Script::Oriya => "Oriya",
            Script::Tamil => "Tamil",
            Script::Telugu => "Telugu",
            Script::Kannada => "Kannada",
            Script::Malayalam => "Malayalam",
            Script::Sinhala => "Sinhala",
            Script::Thai => "Thai",
            Script::Lao => "Lao",
            Script::Tibetan => "Tibetan",
            Script::Myanmar => "Myanmar",
            Script::Georgian => "Georgian",
            Script::Hangul => "Hangul",
            Script::Cherokee => "Cherokee",
            Script::Khmer => "Khmer",
            Script::Mongolian => "Mongolian",
            Script::Han => "Han",
            Script::Hiragana => "Hiragana",
            Script::Katakana => "Katakana",
            Script::Bopomofo => "Bopomofo",
            Script::Yi => "Yi",
            Script::Other(other) => other.name(),
        }
    }

    /// ISO 15924 four-letter code
    pub fn iso15924(self) -> Option<&'static str> {
        let tag = match self {
            Script::Common => "Zyyy",
            Script::Inherited => "Zinh",
            Script::Unknown => "Zzzz",
            Script::Latin => "Latn",
            Script::Greek => "Grek",
            Script::Cyrillic => "Cyrl",
            Script::Armenian => "Armn",
            Script::Hebrew => "Hebr",
            Script::Arabic => "Arab",
            Script::Syriac => "Syrc",
            Script::Thaana => "Thaa",
            Script::Devanagari => "Deva",
            Script::Bengali => "Beng",
            Script::Gurmukhi => "Guru",
            Script::Gujarati => "Gujr",
            Script::Oriya => "Orya",
            Script::Tamil => "Taml",
            Script::Telugu => "Telu",
            Script::Kannada => "Knda",
            Script::Malayalam => "Mlym",
            Script::Sinhala => "Sinh",
            Script::Thai => "Thai",
            Script::Lao => "Laoo",
            Script::Tibetan => "Tibt",
            Script::Myanmar => "Mymr",
            Script::Georgian => "Geor",
            Script::Hangul => "Hang",
            Script::Cherokee => "Cher",
            Script::Khmer => "Khmr",
            Script::Mongolian => "Mong",
            Script::Han => "Hani",
            Script::Hiragana => "Hira",
            Script::Katakana => "Kana",
            Script::Bopomofo => "Bopo",
            Script::Yi => "Yiii",
            Script::Other(other) => return other.iso15924(),
        };
        Some(tag)
    }

    /// Common, Inherited and Unknown never decide a run on their own
    #[inline]
    pub const fn is_weak(self) -> bool {
        matches!(self, Script::Common | Script::Inherited | Script::Unknown)
    }

    /// Looks a script up by long name or ISO 15924 code, ignoring case
    pub fn from_name(name: &str) -> Option<Script> {
        Script::ALL
            .iter()
            .copied()
            .find(|script| {
                script.name().eq_ignore_ascii_case(name)
                    || script
                        .iso15924()
                        .is_some_and(|tag| tag.eq_ignore_ascii_case(name))
            })
            .or_else(|| {
                PropertyParser::<IcuScript>::new()
                    .get_loose(name)
                    .map(Script::from)
            })
    }
}

impl From<IcuScript> for Script {
    fn from(script: IcuScript) -> Self {
        match script {
            IcuScript::Common => Script::Common,
            IcuScript::Inherited => Script::Inherited,
            IcuScript::Unknown => Script::Unknown,
            IcuScript::Latin => Script::Latin,
            IcuScript::Greek => Script::Greek,
            IcuScript::Cyrillic => Script::Cyrillic,
            IcuScript::Armenian => Script::Armenian,
            IcuScript::Hebrew => Script::Hebrew,
            IcuScript::Arabic => Script::Arabic,
            IcuScript::Syriac => Script::Syriac,
            IcuScript::Thaana => Script::Thaana,
            IcuScript::Devanagari => Script::Devanagari,
            IcuScript::Bengali => Script::Bengali,
            IcuScript::Gurmukhi => Script::Gurmukhi,
            IcuScript::Gujarati => Script::Gujarati,
            IcuScript::Oriya => Script::Oriya,
            IcuScript::Tamil => Script::Tamil,
            IcuScript::Telugu => Script::Telugu,
            IcuScript::Kannada => Script::Kannada,
            IcuScript::Malayalam => Script::Malayalam,
            IcuScript::Sinhala => Script::Sinhala,
            IcuScript::Thai => Script::Thai,
            IcuScript::Lao => Script::Lao,
            IcuScript::Tibetan => Script::Tibetan,
            IcuScript::Myanmar => Script::Myanmar,
            IcuScript::Georgian => Script::Georgian,
            IcuScript::Hangul => Script::Hangul,
            IcuScript::Cherokee => Script::Cherokee,
            IcuScript::Khmer => Script::Khmer,
            IcuScript::Mongolian => Script::Mongolian,
            IcuScript::Han => Script::Han,
            IcuScript::Hiragana => Script::Hiragana,
            IcuScript::Katakana => Script::Katakana,
            IcuScript::Bopomofo => Script::Bopomofo,
            IcuScript::Yi => Script::Yi,
            other => Script::Other(OtherScript(other)),
        }
    }
}

/// Scripts serialize as their long name, so config files and reports agree
impl Serialize for Script {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Script::from_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown script '{}'", name)))
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
