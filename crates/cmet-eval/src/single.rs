use std::sync::Arc;

use cmet_core::{EvaluationRequest, ModelSpec, Result};
use cmet_embed::SimilarityScorer;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SemanticSimilarity {
    pub semantic_similarity: f64,
}

/// Cosine similarity with a single embedding model
///
/// Empty texts score 0.0; embedding failures are returned to the caller.
pub struct SingleModelEvaluator {
    scorer: Arc<SimilarityScorer>,
    model: ModelSpec,
}

impl SingleModelEvaluator {
    pub fn new(scorer: Arc<SimilarityScorer>, model: ModelSpec) -> Self {
        Self { scorer, model }
    }

    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<SemanticSimilarity> {
        if request.is_empty() {
            return Ok(SemanticSimilarity {
                semantic_similarity: 0.0,
            });
        }

        let (text_a, text_b) = request.texts();
        let semantic_similarity = self.scorer.score(text_a, text_b, &self.model).await?;
        Ok(SemanticSimilarity {
            semantic_similarity,
        })
    }
}
