//! Corpus-level aggregation
//!
//! Scores every aligned (hypothesis, reference) sentence pair and reduces the
//! scores to summary statistics.
//!
//! ## Edge-case policy
//!
//! For each pair:
//! 1. Reference has no usable embedding → pair is **skipped** (no score)
//! 2. Hypothesis has no usable embedding → score is **0**
//! 3. Otherwise → the metric's similarity is recorded
//!
//! The confidence half-width divides by the number of recorded scores, so
//! skipped pairs do not count.

use crate::config::{Metric, MetricsConfig};
use crate::embeddings::EmbeddingLookup;
use crate::error::{MetricsError, Result, Side};
use crate::metrics::sentence::{average_score, extrema_score, greedy_match_score};
use crate::metrics::statistics::{compute_statistics, ScoreStatistics};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// What happened to one aligned sentence pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "score", rename_all = "snake_case")]
pub enum PairOutcome {
    /// Similarity was computed
    Scored(f32),
    /// Hypothesis had no usable embedding; counted as 0
    ZeroScored,
    /// Reference had no usable embedding; excluded
    Skipped,
}

impl PairOutcome {
    /// Score contributed to the statistics, if any
    pub fn score(&self) -> Option<f32> {
        match self {
            Self::Scored(score) => Some(*score),
            Self::ZeroScored => Some(0.0),
            Self::Skipped => None,
        }
    }

    fn from_result(result: Result<f32>) -> Result<Self> {
        match result {
            Ok(score) => Ok(Self::Scored(score)),
            Err(MetricsError::NoEmbeddings { side: Side::Reference }) => Ok(Self::Skipped),
            Err(MetricsError::NoEmbeddings { side: Side::Hypothesis }) => Ok(Self::ZeroScored),
            Err(e) => Err(e),
        }
    }
}

/// Corpus-level result for one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEvaluation {
    pub metric: Metric,
    pub statistics: ScoreStatistics,
    /// Number of aligned sentence pairs
    pub pair_count: usize,
    pub scored: usize,
    pub zero_scored: usize,
    pub skipped: usize,
}

impl CorpusEvaluation {
    fn from_outcomes(metric: Metric, outcomes: &[PairOutcome], confidence_z: f32) -> Self {
        let scores: Vec<f32> = outcomes.iter().filter_map(PairOutcome::score).collect();
        let zero_scored = outcomes.iter().filter(|o| matches!(o, PairOutcome::ZeroScored)).count();

        Self {
            metric,
            statistics: compute_statistics(&scores, confidence_z),
            pair_count: outcomes.len(),
            scored: scores.len() - zero_scored,
            zero_scored,
            skipped: outcomes.len() - scores.len(),
        }
    }

    /// Format a summary line for display
    pub fn format_summary(&self) -> String {
        format!(
            "{}: {} | Pairs: {} (zero: {}, skipped: {})",
            self.metric.name(),
            self.statistics.format_summary(),
            self.pair_count,
            self.zero_scored,
            self.skipped
        )
    }
}

/// Runs metrics over aligned corpora with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct CorpusScorer {
    config: MetricsConfig,
}

impl CorpusScorer {
    pub fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Evaluate one metric over aligned corpora
    pub fn evaluate<S, E>(
        &self,
        metric: Metric,
        hypothesis_corpus: &[Vec<S>],
        reference_corpus: &[Vec<S>],
        embeddings: &E,
    ) -> Result<CorpusEvaluation>
    where
        S: AsRef<str> + Sync,
        E: EmbeddingLookup + ?Sized,
    {
        let outcomes = self.score_pairs(metric, hypothesis_corpus, reference_corpus, embeddings)?;
        let evaluation = CorpusEvaluation::from_outcomes(metric, &outcomes, self.config.confidence_z);

        if evaluation.statistics.is_empty() {
            tracing::warn!(
                metric = metric.name(),
                pairs = evaluation.pair_count,
                "No sentence pair produced a score; every reference lacks embeddings"
            );
        } else {
            tracing::info!(
                metric = metric.name(),
                pairs = evaluation.pair_count,
                scores = evaluation.statistics.count,
                skipped = evaluation.skipped,
                mean = evaluation.statistics.mean,
                "Corpus evaluation complete"
            );
        }

        Ok(evaluation)
    }

    /// Evaluate every metric over the same corpora
    pub fn evaluate_all<S, E>(
        &self,
        hypothesis_corpus: &[Vec<S>],
        reference_corpus: &[Vec<S>],
        embeddings: &E,
    ) -> Result<Vec<CorpusEvaluation>>
    where
        S: AsRef<str> + Sync,
        E: EmbeddingLookup + ?Sized,
    {
        Metric::all()
            .into_iter()
            .map(|metric| self.evaluate(metric, hypothesis_corpus, reference_corpus, embeddings))
            .collect()
    }

    /// Per-pair outcomes, in corpus order
    pub fn score_pairs<S, E>(
        &self,
        metric: Metric,
        hypothesis_corpus: &[Vec<S>],
        reference_corpus: &[Vec<S>],
        embeddings: &E,
    ) -> Result<Vec<PairOutcome>>
    where
        S: AsRef<str> + Sync,
        E: EmbeddingLookup + ?Sized,
    {
        if hypothesis_corpus.len() != reference_corpus.len() {
            return Err(MetricsError::CorpusLengthMismatch {
                hypothesis: hypothesis_corpus.len(),
                reference: reference_corpus.len(),
            });
        }

        let epsilon = self.config.epsilon;
        let score = |index: usize, hypothesis: &[S], reference: &[S]| -> Result<PairOutcome> {
            let result = match metric {
                Metric::Average => average_score(hypothesis, reference, embeddings, epsilon),
                Metric::Extrema => extrema_score(hypothesis, reference, embeddings, epsilon),
                Metric::GreedyMatch => greedy_match_score(hypothesis, reference, embeddings, epsilon),
            };
            let outcome = PairOutcome::from_result(result)?;
            match outcome {
                PairOutcome::Skipped => tracing::debug!(index, metric = metric.name(), "Skipping pair: reference has no embeddings"),
                PairOutcome::ZeroScored => tracing::debug!(index, metric = metric.name(), "Zero score: hypothesis has no embeddings"),
                PairOutcome::Scored(_) => {}
            }
            Ok(outcome)
        };

        if self.config.parallel {
            hypothesis_corpus
                .par_iter()
                .zip(reference_corpus.par_iter())
                .enumerate()
                .map(|(index, (hypothesis, reference))| score(index, hypothesis.as_slice(), reference.as_slice()))
                .collect()
        } else {
            hypothesis_corpus
                .iter()
                .zip(reference_corpus.iter())
                .enumerate()
                .map(|(index, (hypothesis, reference))| score(index, hypothesis.as_slice(), reference.as_slice()))
                .collect()
        }
    }
}

/// Compute Average on corpus level
pub fn average_corpus_level<S, E>(
    hypothesis_corpus: &[Vec<S>],
    reference_corpus: &[Vec<S>],
    embeddings: &E,
) -> Result<ScoreStatistics>
where
    S: AsRef<str> + Sync,
    E: EmbeddingLookup + ?Sized,
{
    CorpusScorer::default()
        .evaluate(Metric::Average, hypothesis_corpus, reference_corpus, embeddings)
        .map(|evaluation| evaluation.statistics)
}

/// Compute Extrema on corpus level
pub fn extrema_corpus_level<S, E>(
    hypothesis_corpus: &[Vec<S>],
    reference_corpus: &[Vec<S>],
    embeddings: &E,
) -> Result<ScoreStatistics>
where
    S: AsRef<str> + Sync,
    E: EmbeddingLookup + ?Sized,
{
    CorpusScorer::default()
        .evaluate(Metric::Extrema, hypothesis_corpus, reference_corpus, embeddings)
        .map(|evaluation| evaluation.statistics)
}

/// Compute Greedy Matching on corpus level
pub fn greedy_match_corpus_level<S, E>(
    hypothesis_corpus: &[Vec<S>],
    reference_corpus: &[Vec<S>],
    embeddings: &E,
) -> Result<ScoreStatistics>
where
    S: AsRef<str> + Sync,
    E: EmbeddingLookup + ?Sized,
{
    CorpusScorer::default()
        .evaluate(Metric::GreedyMatch, hypothesis_corpus, reference_corpus, embeddings)
        .map(|evaluation| evaluation.statistics)
}
