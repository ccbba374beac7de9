//! Sentence-level scores
//!
//! Each function compares one hypothesis sentence with one reference sentence.
//! A side with no usable embedding is reported as `MetricsError::NoEmbeddings`
//! (reference checked first) instead of producing NaN.

use crate::config::ZERO_NORM_EPSILON;
use crate::embeddings::EmbeddingLookup;
use crate::error::{MetricsError, Result, Side};
use crate::metrics::vector::{
    cosine_similarity, embedding_sum, extrema, list_norm, map_to_embeddings, norm, normalize,
};

/// Compute Average on sentence level
///
/// Cosine similarity of the normalized sums of the token embeddings.
pub fn average_sentence_level<S, E>(hypothesis: &[S], reference: &[S], embeddings: &E) -> Result<f32>
where
    S: AsRef<str>,
    E: EmbeddingLookup + ?Sized,
{
    average_score(hypothesis, reference, embeddings, ZERO_NORM_EPSILON)
}

/// Compute Extrema on sentence level
///
/// Cosine similarity of the Extrema vectors of the in-vocabulary tokens.
pub fn extrema_sentence_level<S, E>(hypothesis: &[S], reference: &[S], embeddings: &E) -> Result<f32>
where
    S: AsRef<str>,
    E: EmbeddingLookup + ?Sized,
{
    extrema_score(hypothesis, reference, embeddings, ZERO_NORM_EPSILON)
}

/// Compute Greedy Matching on sentence level
///
/// Every hypothesis token is matched with its most similar reference token and
/// the best cosines are averaged; the same is done from reference to
/// hypothesis. The score is the mean of both directions, so it is symmetric in
/// its arguments and lies in [-1, 1].
pub fn greedy_match_sentence_level<S, E>(hypothesis: &[S], reference: &[S], embeddings: &E) -> Result<f32>
where
    S: AsRef<str>,
    E: EmbeddingLookup + ?Sized,
{
    greedy_match_score(hypothesis, reference, embeddings, ZERO_NORM_EPSILON)
}

pub(crate) fn average_score<S, E>(hypothesis: &[S], reference: &[S], embeddings: &E, epsilon: f32) -> Result<f32>
where
    S: AsRef<str>,
    E: EmbeddingLookup + ?Sized,
{
    let hypothesis = embedding_sum(hypothesis, embeddings, epsilon);
    let reference = embedding_sum(reference, embeddings, epsilon);

    require_magnitude(norm(&reference), epsilon, Side::Reference)?;
    require_magnitude(norm(&hypothesis), epsilon, Side::Hypothesis)?;

    Ok(cosine_similarity(&normalize(&hypothesis), &normalize(&reference)))
}

pub(crate) fn extrema_score<S, E>(hypothesis: &[S], reference: &[S], embeddings: &E, epsilon: f32) -> Result<f32>
where
    S: AsRef<str>,
    E: EmbeddingLookup + ?Sized,
{
    let hypothesis = map_to_embeddings(hypothesis, embeddings);
    let reference = map_to_embeddings(reference, embeddings);

    require_magnitude(list_norm(&reference), epsilon, Side::Reference)?;
    require_magnitude(list_norm(&hypothesis), epsilon, Side::Hypothesis)?;

    let reference = extrema(&reference).ok_or(MetricsError::NoEmbeddings { side: Side::Reference })?;
    let hypothesis = extrema(&hypothesis).ok_or(MetricsError::NoEmbeddings { side: Side::Hypothesis })?;

    Ok(cosine_similarity(&hypothesis, &reference))
}

pub(crate) fn greedy_match_score<S, E>(hypothesis: &[S], reference: &[S], embeddings: &E, epsilon: f32) -> Result<f32>
where
    S: AsRef<str>,
    E: EmbeddingLookup + ?Sized,
{
    let hypothesis = map_to_embeddings(hypothesis, embeddings);
    let reference = map_to_embeddings(reference, embeddings);

    require_magnitude(list_norm(&reference), epsilon, Side::Reference)?;
    require_magnitude(list_norm(&hypothesis), epsilon, Side::Hypothesis)?;

    // Zero-norm tokens have no direction to match against
    let reference = unit_vectors(&reference, epsilon);
    let hypothesis = unit_vectors(&hypothesis, epsilon);
    if reference.is_empty() {
        return Err(MetricsError::NoEmbeddings { side: Side::Reference });
    }
    if hypothesis.is_empty() {
        return Err(MetricsError::NoEmbeddings { side: Side::Hypothesis });
    }

    let forward = greedy_direction(&hypothesis, &reference);
    let backward = greedy_direction(&reference, &hypothesis);
    Ok((forward + backward) / 2.0)
}

fn require_magnitude(magnitude: f32, epsilon: f32, side: Side) -> Result<()> {
    // A zero vector never passes, even with a zero epsilon
    if magnitude == 0.0 || magnitude < epsilon {
        return Err(MetricsError::NoEmbeddings { side });
    }
    Ok(())
}

fn unit_vectors(vectors: &[&[f32]], epsilon: f32) -> Vec<Vec<f32>> {
    vectors
        .iter()
        .filter(|v| {
            let n = norm(v);
            n > 0.0 && n >= epsilon
        })
        .map(|v| normalize(v))
        .collect()
}

/// Mean over `from` of the best cosine against any vector in `to` (unit inputs)
fn greedy_direction(from: &[Vec<f32>], to: &[Vec<f32>]) -> f32 {
    let total: f32 = from
        .iter()
        .map(|f| {
            to.iter()
                .map(|t| {
                    let dot: f32 = f.iter().zip(t.iter()).map(|(x, y)| x * y).sum();
                    dot.clamp(-1.0, 1.0)
                })
                .fold(f32::NEG_INFINITY, f32::max)
        })
        .sum();
    total / from.len() as f32
}
