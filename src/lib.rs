//! Embedding-based similarity metrics
//!
//! Scores how closely hypothesis sentences match reference sentences using
//! pre-trained word vectors. Three metrics are provided:
//!
//! - **Average**: cosine of the summed (then normalized) sentence vectors
//! - **Extrema**: cosine of per-dimension extrema vectors
//! - **Greedy Matching**: symmetric mean of per-token best cosine matches
//!
//! ## Usage
//!
//! ```rust
//! use embedding_metrics::{average_corpus_level, KeyedVectors};
//!
//! let mut embeddings = KeyedVectors::new(3).unwrap();
//! embeddings.insert("a", vec![1.0, 0.0, 0.0]).unwrap();
//! embeddings.insert("b", vec![0.0, 1.0, 0.0]).unwrap();
//!
//! let hypothesis = vec![vec!["a"], vec!["x"]];
//! let reference = vec![vec!["a"], vec!["a"]];
//!
//! let stats = average_corpus_level(&hypothesis, &reference, &embeddings).unwrap();
//! assert!((stats.mean - 0.5).abs() < 1e-6);
//! ```

pub mod config;
pub mod embeddings;
pub mod error;
pub mod metrics;

pub use config::{Metric, MetricsConfig, DEFAULT_CONFIDENCE_Z, ZERO_NORM_EPSILON};
pub use embeddings::{EmbeddingLookup, KeyedVectors};
pub use error::{MetricsError, Side};
pub use metrics::{
    // Sentence level
    average_sentence_level, extrema_sentence_level, greedy_match_sentence_level,
    // Corpus level
    average_corpus_level, extrema_corpus_level, greedy_match_corpus_level,
    CorpusEvaluation, CorpusScorer, PairOutcome,
    // Statistics
    ScoreStatistics, compute_statistics, mean, std_dev,
};
