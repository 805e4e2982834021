use async_trait::async_trait;
use cmet_core::{ModelSpec, Result};

use crate::{EmbedOptions, Embedder, normalize};

pub const DEFAULT_MOCK_DIMENSION: usize = 64;

/// Deterministic embedder for offline runs
///
/// Each vector is derived from a blake3 hash of the text, so equal texts
/// always embed identically regardless of model.
pub struct MockEmbedder {
    dimension: usize,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut bytes = vec![0u8; self.dimension];
        blake3::Hasher::new()
            .update(text.as_bytes())
            .finalize_xof()
            .fill(&mut bytes);

        let mut vector: Vec<f32> = bytes
            .into_iter()
            .map(|b| f32::from(b) / 127.5 - 1.0)
            .collect();
        normalize(&mut vector);
        vector
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DIMENSION)
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn embed(
        &self,
        texts: &[&str],
        _model: &ModelSpec,
        _options: &EmbedOptions,
    ) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.vector(text)).collect())
    }
}
