//! # Error Types

use crate::conllu::MalformedLine;

/// Which id space an out-of-range id was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum IdSpace {
    /// Token ids of a [`crate::vocab::Vocabulary`].
    Token,

    /// Tag ids of a [`crate::tags::TagSpace`].
    Tag,
}

/// Errors from udprep operations.
#[derive(Debug, thiserror::Error)]
pub enum UdPrepError {
    /// I/O error; the source could not be opened or read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A CoNLL-U line could not be used as a token record.
    ///
    /// Only surfaced when the parser is configured to fail on malformed lines;
    /// otherwise the line is skipped and a warning is recorded.
    #[error("line {line_number}: {kind}")]
    MalformedLine {
        /// The 1-based line number.
        line_number: usize,

        /// What was wrong with the line.
        kind: MalformedLine,
    },

    /// Tag is not part of the tag space.
    #[error("unknown tag: {0:?}")]
    UnknownTag(String),

    /// Tag id is not bound to any tag.
    #[error("invalid tag id: {0}")]
    InvalidTagId(usize),

    /// An id handed to a decoder is outside the valid span.
    #[error("{space} id {id} out of range [0, {max}]")]
    OutOfRange {
        /// The id space.
        space: IdSpace,

        /// The offending id.
        id: usize,

        /// The largest valid id.
        max: usize,
    },

    /// Vocab size exceeds the capacity of the target id type.
    #[error("vocab size ({size}) exceeds id type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// A vocabulary source held no entries.
    #[error("vocabulary is empty")]
    EmptyVocabulary,

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Sequence, matrix or tensor dimensions disagree.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Result type for udprep operations.
pub type UPResult<T> = core::result::Result<T, UdPrepError>;
