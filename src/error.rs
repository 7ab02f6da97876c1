use std::error;
use std::fmt;

/// Failures raised at the decode/encode boundaries.
///
/// All of these are data-shape errors detected before any output is built;
/// none are retryable. Frame -1 refers to the pre-roll start pose.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// The document's structure is wrong: a JSON shape violation, or the
    /// three motion streams disagree on length.
    MalformedReplay {
        field: &'static str,
        detail: String,
    },
    /// An encode was handed a sample sequence that does not cover the
    /// requested frame range.
    FrameRangeMismatch { expected: usize, actual: usize },
    /// The document a splice targets lacks a field the splice overwrites.
    BaseDocumentMissing { field: &'static str },
    /// A NaN or infinity in an input vector or angle.
    NonFiniteValue { field: &'static str, frame: i64 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::MalformedReplay { field, detail } => {
                write!(f, "malformed replay: {}: {}", field, detail)
            }
            ReplayError::FrameRangeMismatch { expected, actual } => write!(
                f,
                "frame range mismatch: expected {} samples, got {}",
                expected, actual
            ),
            ReplayError::BaseDocumentMissing { field } => {
                write!(f, "base document is missing `{}`", field)
            }
            ReplayError::NonFiniteValue { field, frame } => {
                write!(f, "non-finite value in {} at frame {}", field, frame)
            }
        }
    }
}

impl error::Error for ReplayError {}
