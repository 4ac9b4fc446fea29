//! Error types for the repetition pipeline.

use thiserror::Error;

use crate::models::Speaker;

/// Fatal conditions that abort a batch run.
///
/// Recoverable per-turn problems (text that cannot be segmented or tagged)
/// never reach this type; they degrade to an empty token list.
#[derive(Error, Debug)]
pub enum RepetitionError {
    /// A token carries a word class other than open/closed.
    #[error("token {token:?} has word class {class:?}, expected \"open\" or \"closed\"")]
    SchemaViolation {
        /// Token text.
        token: String,
        /// The offending class label.
        class: String,
    },

    /// N-gram size must be at least 1.
    #[error("invalid n-gram size: {0}")]
    InvalidNGramSize(usize),

    /// An n-gram of the wrong width reached the counter.
    #[error("n-gram width mismatch: expected {expected}, found {found}")]
    NGramLengthMismatch {
        /// Width of the current pass.
        expected: usize,
        /// Width of the offending n-gram.
        found: usize,
    },

    /// A required column is absent from the input header.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A fatal condition located at a specific row, speaker and n.
    #[error("row {row}, speaker {speaker}, n={n}: {source}")]
    Turn {
        /// Zero-based data row.
        row: usize,
        /// Speaker whose turn was being processed.
        speaker: Speaker,
        /// N-gram size of the pass.
        n: usize,
        /// Underlying failure.
        #[source]
        source: Box<RepetitionError>,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RepetitionError {
    /// Attach the row/speaker/n location to a failure.
    pub fn at(self, row: usize, speaker: Speaker, n: usize) -> Self {
        Self::Turn {
            row,
            speaker,
            n,
            source: Box::new(self),
        }
    }
}

/// Result alias using [`RepetitionError`].
pub type PipelineResult<T> = Result<T, RepetitionError>;
