//! Error types for metric computation

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which side of a sentence pair an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Hypothesis,
    Reference,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hypothesis => write!(f, "hypothesis"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

/// Errors raised by the metric functions and the in-memory embedding store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    /// Hypothesis and reference corpora are not aligned
    #[error("corpus length mismatch: {hypothesis} hypothesis sentences vs {reference} reference sentences")]
    CorpusLengthMismatch { hypothesis: usize, reference: usize },

    /// A sentence has no token with a usable embedding
    #[error("{side} sentence has no in-vocabulary tokens")]
    NoEmbeddings { side: Side },

    /// A vector does not match the embedding set's dimension
    #[error("embedding for {token:?} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        token: String,
        expected: usize,
        actual: usize,
    },

    /// Embedding sets must have at least one dimension
    #[error("embedding dimension must be greater than zero")]
    EmptyEmbeddings,
}

/// Result alias for metric operations
pub type Result<T> = std::result::Result<T, MetricsError>;
