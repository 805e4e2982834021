//! Cosine similarity of a text pair

use std::sync::Arc;

use cmet_core::{Error, ModelSpec, Result};

use crate::{EmbedOptions, Embedder, dot};

/// Scores a pair of texts with one batched embedding call
pub struct SimilarityScorer {
    embedder: Arc<dyn Embedder>,
    options: EmbedOptions,
}

impl SimilarityScorer {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            options: EmbedOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EmbedOptions) -> Self {
        self.options = options;
        self
    }

    /// Dot product of the unit embeddings of `text_a` and `text_b`
    ///
    /// Both texts go to the embedding service together so batch-relative
    /// padding or normalization applies to the pair as a whole.
    pub async fn score(&self, text_a: &str, text_b: &str, model: &ModelSpec) -> Result<f64> {
        let vectors = self
            .embedder
            .embed(&[text_a, text_b], model, &self.options)
            .await
            .map_err(|e| match e {
                Error::EmbeddingFailure { .. } => e,
                other => Error::embedding_failure(model.as_str(), other),
            })?;

        match vectors.as_slice() {
            [a, b, ..] if !a.is_empty() && a.len() == b.len() => Ok(dot(a, b)),
            [a, b, ..] => Err(Error::embedding_failure(
                model.as_str(),
                format!("vector dimensions differ ({} vs {})", a.len(), b.len()),
            )),
            _ => Err(Error::embedding_failure(
                model.as_str(),
                format!("expected 2 vectors, got {}", vectors.len()),
            )),
        }
    }
}
