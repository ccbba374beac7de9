//! In-memory keyed word vectors

use crate::embeddings::traits::EmbeddingLookup;
use crate::error::{MetricsError, Result};
use std::collections::HashMap;

/// Word vectors keyed by token
///
/// Every vector has the same dimension, checked on insert.
#[derive(Debug, Clone)]
pub struct KeyedVectors {
    dimensions: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl KeyedVectors {
    /// Create an empty store for vectors of `dimensions` components
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(MetricsError::EmptyEmbeddings);
        }
        Ok(Self {
            dimensions,
            vectors: HashMap::new(),
        })
    }

    /// Build a store from (token, vector) pairs
    ///
    /// Later duplicates overwrite earlier ones.
    pub fn from_entries<I, S>(dimensions: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut store = Self::new(dimensions)?;
        for (token, vector) in entries {
            store.insert(token, vector)?;
        }
        Ok(store)
    }

    /// Insert or replace a token's vector
    pub fn insert(&mut self, token: impl Into<String>, vector: Vec<f32>) -> Result<()> {
        let token = token.into();
        if vector.len() != self.dimensions {
            return Err(MetricsError::DimensionMismatch {
                token,
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        self.vectors.insert(token, vector);
        Ok(())
    }

    /// Number of tokens in the vocabulary
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Iterate over vocabulary tokens (unordered)
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }
}

impl EmbeddingLookup for KeyedVectors {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn get(&self, token: &str) -> Option<&[f32]> {
        self.vectors.get(token).map(Vec::as_slice)
    }

    fn contains(&self, token: &str) -> bool {
        self.vectors.contains_key(token)
    }
}
