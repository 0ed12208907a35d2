//! Error types for restoring and persisting fitted state.

use thiserror::Error;

/// Errors raised when fitted state is restored or persisted.
/// Fit and encode themselves never fail.
#[derive(Debug, Error)]
pub enum StateError {
    /// Declared dimension disagrees with the vocabulary size.
    #[error("Dimension mismatch: declared {declared}, vocabulary size {vocab_size}")]
    DimensionMismatch { declared: usize, vocab_size: usize },

    /// A vocabulary term has no idf weight.
    #[error("Missing idf weight for term {0:?}")]
    MissingIdf(String),

    /// An idf weight names a term outside the vocabulary.
    #[error("Idf weight for unknown term {0:?}")]
    UnknownIdfTerm(String),

    /// A vocabulary index falls outside `[0, dim)`.
    #[error("Index {index} of term {term:?} out of range for dimension {dim}")]
    IndexOutOfRange { term: String, index: usize, dim: usize },

    /// Two terms share one vocabulary index.
    #[error("Index {index} assigned to both {first:?} and {second:?}")]
    DuplicateIndex {
        index: usize,
        first: String,
        second: String,
    },

    /// Idf weight is not finite.
    #[error("Invalid idf weight {weight} for term {term:?}")]
    InvalidIdf { term: String, weight: f64 },

    #[error("CBOR error: {0}")]
    Cbor(#[from] serde_cbor::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StateError {
    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(declared: usize, vocab_size: usize) -> Self {
        Self::DimensionMismatch {
            declared,
            vocab_size,
        }
    }
}

pub type Result<T, E = StateError> = std::result::Result<T, E>;
