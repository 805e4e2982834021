//! Identifiers of the available validation metrics

use std::fmt;

use cmet_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Original length / compressed length
    CompressionRatio,
    /// Single-model cosine similarity
    EmbeddingSimilarity,
    /// Deprecated single-pass multi-model similarity with a whitespace ceiling
    EmbeddingSimilarityMulti,
    /// Per-model similarity with per-model token limits
    MultiModelEmbeddingSimilarity,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        Self::CompressionRatio,
        Self::EmbeddingSimilarity,
        Self::EmbeddingSimilarityMulti,
        Self::MultiModelEmbeddingSimilarity,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::CompressionRatio => "compression_ratio",
            Self::EmbeddingSimilarity => "embedding_similarity",
            Self::EmbeddingSimilarityMulti => "embedding_similarity_multi",
            Self::MultiModelEmbeddingSimilarity => "multi_model_embedding_similarity",
        }
    }

    pub fn from_id(id: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| Error::UnknownMetric(id.to_string()))
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::EmbeddingSimilarityMulti)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for kind in MetricKind::ALL {
            assert_eq!(MetricKind::from_id(kind.id()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_metric() {
        assert!(matches!(
            MetricKind::from_id("bleu"),
            Err(Error::UnknownMetric(id)) if id == "bleu"
        ));
    }

    #[test]
    fn test_only_legacy_is_deprecated() {
        assert!(MetricKind::EmbeddingSimilarityMulti.is_deprecated());
        assert!(!MetricKind::MultiModelEmbeddingSimilarity.is_deprecated());
    }
}
