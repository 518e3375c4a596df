//! Error types for scriptrun

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScriptRunError>;

/// Main error type for scriptrun
///
/// Every variant is fatal to the call that produced it. A missing glyph is
/// not an error: shapers emit the notdef glyph and carry on.
#[derive(Debug, Error)]
pub enum ScriptRunError {
    #[error("Malformed UTF-8 input: invalid sequence after byte {valid_up_to}")]
    MalformedEncoding {
        /// Length of the valid prefix
        valid_up_to: usize,
        /// Length of the invalid sequence, `None` when the input ends mid-sequence
        error_len: Option<usize>,
    },

    #[error("Invalid font size: {0} (must be positive and finite)")]
    InvalidFontSize(f32),

    #[error("No font available: {0}")]
    NoFontAvailable(String),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Shaping failed: {0}")]
    ShapingFailed(#[from] ShapingError),

    #[error("Report failed: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::str::Utf8Error> for ScriptRunError {
    fn from(err: std::str::Utf8Error) -> Self {
        ScriptRunError::MalformedEncoding {
            valid_up_to: err.valid_up_to(),
            error_len: err.error_len(),
        }
    }
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Duplicate font id: {0}")]
    DuplicateId(String),
}

/// Shaping errors
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("Cluster span {start}..{end} is outside the run")]
    ClusterOutOfRange { start: usize, end: usize },

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Report errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_error_keeps_offsets() {
        let bytes = [b'a', 0xE4, 0x28, b'b'];
        let err = std::str::from_utf8(&bytes).unwrap_err();
        match ScriptRunError::from(err) {
            ScriptRunError::MalformedEncoding {
                valid_up_to,
                error_len,
            } => {
                assert_eq!(valid_up_to, 1);
                assert_eq!(error_len, Some(1));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn font_size_message_names_value() {
        let err = ScriptRunError::InvalidFontSize(-2.0);
        assert!(err.to_string().contains("-2"));
    }
}
