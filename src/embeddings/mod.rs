//! Embedding lookup abstraction
//!
//! Provides a typed lookup interface over pre-trained word vectors:
//! - `EmbeddingLookup` trait (membership, retrieval, dimensionality)
//! - `KeyedVectors` in-memory implementation

pub mod keyed_vectors;
pub mod traits;

pub use keyed_vectors::KeyedVectors;
pub use traits::EmbeddingLookup;
