//! Vector aggregation and similarity primitives
//!
//! Turns token vectors into sentence vectors:
//! - **Sum**: element-wise sum of in-vocabulary vectors (backs Average)
//! - **Extrema**: per-dimension value of largest magnitude (backs Extrema)

use crate::embeddings::EmbeddingLookup;

/// L2 norm of a vector
pub fn norm(vector: &[f32]) -> f32 {
    vector.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Frobenius norm of a list of vectors (0 for an empty list)
pub fn list_norm(vectors: &[&[f32]]) -> f32 {
    vectors
        .iter()
        .flat_map(|v| v.iter())
        .map(|x| x * x)
        .sum::<f32>()
        .sqrt()
}

/// Cosine similarity of two equal-dimension vectors, clamped to [-1, 1]
///
/// Yields NaN when either vector has zero magnitude; callers check norms first.
/// Both inputs must have the same length (see `EmbeddingLookup`); release
/// builds do not check it.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "cosine_similarity on vectors of different dimension");

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    // Rounding can land one ulp outside the range
    (dot_product / (norm(a) * norm(b))).clamp(-1.0, 1.0)
}

/// Divide a vector by its own norm
///
/// The caller guarantees a non-zero norm.
pub fn normalize(vector: &[f32]) -> Vec<f32> {
    let n = norm(vector);
    vector.iter().map(|x| x / n).collect()
}

/// Sum the embeddings of all in-vocabulary tokens in a sentence
///
/// Returns the zero vector of the embedding dimension when the sum's norm is
/// below `epsilon`, which includes sentences with no in-vocabulary token.
pub fn embedding_sum<S, E>(sentence: &[S], embeddings: &E, epsilon: f32) -> Vec<f32>
where
    S: AsRef<str>,
    E: EmbeddingLookup + ?Sized,
{
    let mut total = vec![0.0f32; embeddings.dimensions()];
    for vector in sentence.iter().filter_map(|token| embeddings.get(token.as_ref())) {
        for (acc, x) in total.iter_mut().zip(vector) {
            *acc += x;
        }
    }

    if norm(&total) < epsilon {
        total.iter_mut().for_each(|x| *x = 0.0);
    }
    total
}

/// Map each token to its embedding, dropping OOV tokens
///
/// The result may be shorter than the sentence.
pub fn map_to_embeddings<'e, S, E>(sentence: &[S], embeddings: &'e E) -> Vec<&'e [f32]>
where
    S: AsRef<str>,
    E: EmbeddingLookup + ?Sized,
{
    sentence
        .iter()
        .filter_map(|token| embeddings.get(token.as_ref()))
        .collect()
}

/// Compute the Extrema vector of a list of equal-dimension vectors
///
/// For each dimension the minimum is chosen when `|min| > max`, otherwise the
/// maximum. Returns `None` for an empty list.
pub fn extrema(vectors: &[&[f32]]) -> Option<Vec<f32>> {
    let (first, rest) = vectors.split_first()?;

    let mut max_values = first.to_vec();
    let mut min_values = first.to_vec();
    for vector in rest {
        for ((max_v, min_v), &x) in max_values.iter_mut().zip(min_values.iter_mut()).zip(vector.iter()) {
            *max_v = max_v.max(x);
            *min_v = min_v.min(x);
        }
    }

    Some(
        min_values
            .into_iter()
            .zip(max_values)
            .map(|(min_v, max_v)| if min_v.abs() > max_v { min_v } else { max_v })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZERO_NORM_EPSILON;
    use crate::embeddings::KeyedVectors;

    fn embeddings() -> KeyedVectors {
        KeyedVectors::from_entries(
            3,
            vec![
                ("a", vec![1.0, 0.0, 0.0]),
                ("b", vec![0.0, 1.0, 0.0]),
                ("neg_a", vec![-1.0, 0.0, 0.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.0001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.0001);

        let d = vec![-2.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.3, -1.2, 4.0, 0.7];
        let b = vec![-2.5, 0.1, 1.0, 3.3];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_similarity_self() {
        let a = vec![0.3, -1.2, 4.0, 0.7];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_stays_in_range() {
        for i in 0..200 {
            let a: Vec<f32> = (0..7).map(|j| ((i * 31 + j * 17) % 13) as f32 / 3.0 - 2.1).collect();
            let b: Vec<f32> = a.iter().map(|x| x * 1.7).collect();
            let same = cosine_similarity(&a, &b);
            assert!(same <= 1.0, "{same} > 1.0 for {a:?}");
            let negated: Vec<f32> = a.iter().map(|x| -x).collect();
            assert!(cosine_similarity(&a, &negated) >= -1.0);
        }
    }

    #[test]
    fn test_cosine_similarity_zero_vector_is_nan() {
        let a = vec![1.0, 2.0];
        let zero = vec![0.0, 0.0];
        assert!(cosine_similarity(&a, &zero).is_nan());
    }

    #[test]
    fn test_normalize() {
        let unit = normalize(&[3.0, 4.0]);
        assert!((unit[0] - 0.6).abs() < 1e-6);
        assert!((unit[1] - 0.8).abs() < 1e-6);
        assert!((norm(&unit) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_embedding_sum() {
        let emb = embeddings();
        let sum = embedding_sum(&["a", "b", "oov", "a"], &emb, ZERO_NORM_EPSILON);
        assert_eq!(sum, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_embedding_sum_all_oov_is_zero_vector() {
        let emb = embeddings();
        let sum = embedding_sum(&["x", "y"], &emb, ZERO_NORM_EPSILON);
        assert_eq!(sum, vec![0.0, 0.0, 0.0]);

        let empty: [&str; 0] = [];
        assert_eq!(embedding_sum(&empty, &emb, ZERO_NORM_EPSILON), vec![0.0; 3]);
    }

    #[test]
    fn test_embedding_sum_cancelling_vectors() {
        let emb = embeddings();
        let sum = embedding_sum(&["a", "neg_a"], &emb, ZERO_NORM_EPSILON);
        assert!(norm(&sum) < ZERO_NORM_EPSILON);
    }

    #[test]
    fn test_embedding_sum_below_custom_epsilon() {
        let emb = KeyedVectors::from_entries(2, vec![("tiny", vec![1e-4, 0.0])]).unwrap();
        assert_eq!(embedding_sum(&["tiny"], &emb, 1e-3), vec![0.0, 0.0]);
        assert_eq!(embedding_sum(&["tiny"], &emb, ZERO_NORM_EPSILON), vec![1e-4, 0.0]);
    }

    #[test]
    fn test_map_to_embeddings_drops_oov() {
        let emb = embeddings();
        let vectors = map_to_embeddings(&["a", "oov", "b"], &emb);
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], &[1.0, 0.0, 0.0][..]);
        assert_eq!(vectors[1], &[0.0, 1.0, 0.0][..]);
    }

    #[test]
    fn test_list_norm() {
        let a = [3.0f32, 0.0];
        let b = [0.0f32, 4.0];
        assert!((list_norm(&[&a, &b]) - 5.0).abs() < 1e-6);
        assert_eq!(list_norm(&[]), 0.0);
    }

    #[test]
    fn test_extrema() {
        let a = [3.0f32, -5.0];
        let b = [2.0f32, 1.0];
        assert_eq!(extrema(&[&a, &b]), Some(vec![3.0, -5.0]));
    }

    #[test]
    fn test_extrema_all_negative_picks_min() {
        let a = [-1.0f32, -4.0];
        let b = [-3.0f32, -2.0];
        assert_eq!(extrema(&[&a, &b]), Some(vec![-3.0, -4.0]));
    }

    #[test]
    fn test_extrema_tie_picks_max() {
        let a = [2.0f32];
        let b = [-2.0f32];
        assert_eq!(extrema(&[&a, &b]), Some(vec![2.0]));
    }

    #[test]
    fn test_extrema_single_vector() {
        let a = [0.5f32, -0.25];
        assert_eq!(extrema(&[&a]), Some(vec![0.5, -0.25]));
    }

    #[test]
    fn test_extrema_empty() {
        assert_eq!(extrema(&[]), None);
    }
}
