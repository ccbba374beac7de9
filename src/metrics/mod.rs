//! Embedding-based metrics
//!
//! ## Modules
//!
//! - `vector` - Sum, normalization, Extrema aggregation and cosine similarity
//! - `sentence` - Average, Extrema and Greedy Matching for one sentence pair
//! - `corpus` - Corpus-level aggregation with the skip / zero-score policy
//! - `statistics` - Mean, confidence half-width and standard deviation

pub mod corpus;
pub mod sentence;
pub mod statistics;
pub mod vector;

pub use corpus::{
    average_corpus_level, extrema_corpus_level, greedy_match_corpus_level,
    CorpusEvaluation, CorpusScorer, PairOutcome,
};
pub use sentence::{average_sentence_level, extrema_sentence_level, greedy_match_sentence_level};
pub use statistics::{compute_statistics, mean, std_dev, ScoreStatistics};
pub use vector::{cosine_similarity, embedding_sum, extrema, map_to_embeddings, normalize};
