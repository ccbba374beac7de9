//! Embedding lookup trait
//!
//! Defines the interface every word-vector source must expose to the metrics.

/// Read-only token → vector lookup
///
/// Implementations hold a fixed dimension D shared by every vector they return.
/// Every vector from `get` must have exactly `dimensions()` components: the
/// metrics compare vectors component-wise and do not re-check lengths in
/// release builds. Vectors are borrowed and never mutated by the metrics.
pub trait EmbeddingLookup: Send + Sync {
    /// Vector dimension D
    fn dimensions(&self) -> usize;

    /// Get the embedding for a token, or `None` if it is out of vocabulary
    fn get(&self, token: &str) -> Option<&[f32]>;

    /// Check whether a token has an embedding
    fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }
}

impl<T: EmbeddingLookup + ?Sized> EmbeddingLookup for &T {
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn get(&self, token: &str) -> Option<&[f32]> {
        (**self).get(token)
    }

    fn contains(&self, token: &str) -> bool {
        (**self).contains(token)
    }
}
