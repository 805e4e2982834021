//! Deprecated single-pass multi-model similarity
//!
//! One global ceiling, the smallest of the configured maximum and every
//! resolvable model's own limit, is compared against a whitespace word
//! count of both texts before any model runs. Kept to reproduce historical
//! reports; `MultiModelEvaluator` is the accurate per-model replacement.

use std::sync::Arc;

use cmet_core::{EvaluationRequest, LegacyScores, ModelSpec};
use cmet_embed::SimilarityScorer;
use cmet_tokens::TokenizerResolver;
use tracing::{debug, warn};

pub const DEFAULT_LEGACY_MAX_TOKENS: usize = 8192;

pub struct LegacyMultiEvaluator {
    resolver: Arc<TokenizerResolver>,
    scorer: Arc<SimilarityScorer>,
    models: Vec<ModelSpec>,
    max_tokens: usize,
}

impl LegacyMultiEvaluator {
    pub fn new(
        resolver: Arc<TokenizerResolver>,
        scorer: Arc<SimilarityScorer>,
        models: Vec<ModelSpec>,
        max_tokens: usize,
    ) -> Self {
        warn!(
            "embedding_similarity_multi is deprecated, use multi_model_embedding_similarity instead"
        );
        Self {
            resolver,
            scorer,
            models,
            max_tokens,
        }
    }

    pub fn models(&self) -> &[ModelSpec] {
        &self.models
    }

    /// Smallest of the configured ceiling and each model's max length
    pub async fn max_allowed_tokens(&self) -> usize {
        let mut limit = self.max_tokens;
        for model in &self.models {
            match self.resolver.resolve(model).await {
                Ok(tokenizer) => {
                    if let Some(max) = tokenizer.max_length() {
                        limit = limit.min(max);
                    }
                }
                Err(e) => debug!("Ignoring {} for the token ceiling: {}", model, e),
            }
        }
        limit
    }

    pub async fn evaluate(&self, request: &EvaluationRequest) -> LegacyScores {
        let (text_a, text_b) = request.texts();
        let token_count = whitespace_token_count(text_a, text_b);

        let ceiling = self.max_allowed_tokens().await;
        if token_count > ceiling {
            debug!("{} words exceed the ceiling of {}", token_count, ceiling);
            return LegacyScores::token_count_only(token_count);
        }

        let mut scores = Vec::with_capacity(self.models.len());
        for model in &self.models {
            match self.scorer.score(text_a, text_b, model).await {
                Ok(score) => scores.push((model.clone(), score)),
                Err(e) => warn!("Skipping {}: {}", model, e),
            }
        }

        let mean = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|(_, s)| s).sum::<f64>() / scores.len() as f64
        };

        LegacyScores {
            token_count,
            scores,
            semantic_similarity: Some(mean),
        }
    }
}

/// Words in `text_a` and `text_b` joined by a space
pub fn whitespace_token_count(text_a: &str, text_b: &str) -> usize {
    text_a.split_whitespace().count() + text_b.split_whitespace().count()
}
