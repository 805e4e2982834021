//! Per-model embedding similarity
//!
//! Each requested model is handled on its own: tokenizer resolution,
//! length check and scoring either produce a `ModelScore` or a
//! `SkipReason`. Skipped models are logged and left out of the result,
//! they never abort the evaluation.

use std::sync::Arc;

use cmet_core::{EvaluationRequest, ModelScore, ModelSpec, SimilarityResult, SkipReason};
use cmet_embed::SimilarityScorer;
use cmet_tokens::{TokenizerHandle, TokenizerResolver};
use tracing::{debug, warn};

/// Scores plus the models that were skipped and why
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiModelOutcome {
    pub scores: SimilarityResult,
    pub skipped: Vec<(ModelSpec, SkipReason)>,
}

pub struct MultiModelEvaluator {
    resolver: Arc<TokenizerResolver>,
    scorer: Arc<SimilarityScorer>,
}

impl MultiModelEvaluator {
    pub fn new(resolver: Arc<TokenizerResolver>, scorer: Arc<SimilarityScorer>) -> Self {
        Self { resolver, scorer }
    }

    pub async fn evaluate(&self, request: &EvaluationRequest, models: &[ModelSpec]) -> SimilarityResult {
        self.evaluate_detailed(request, models).await.scores
    }

    pub async fn evaluate_detailed(
        &self,
        request: &EvaluationRequest,
        models: &[ModelSpec],
    ) -> MultiModelOutcome {
        let mut outcome = MultiModelOutcome::default();
        if request.is_empty() {
            debug!("Empty text in request, skipping all models");
            return outcome;
        }

        let (text_a, text_b) = request.texts();
        for model in models {
            match self.evaluate_model(model, text_a, text_b).await {
                Ok(score) => outcome.scores.insert(model.clone(), score),
                Err(reason) => {
                    warn!("Skipping {}: {}", model, reason);
                    outcome.skipped.push((model.clone(), reason));
                }
            }
        }

        outcome
    }

    async fn evaluate_model(
        &self,
        model: &ModelSpec,
        text_a: &str,
        text_b: &str,
    ) -> Result<ModelScore, SkipReason> {
        let tokenizer = self
            .resolver
            .resolve(model)
            .await
            .map_err(|e| SkipReason::TokenizerUnavailable(e.to_string()))?;

        check_length(&tokenizer, text_a, text_b)?;

        let similarity = self
            .scorer
            .score(text_a, text_b, model)
            .await
            .map_err(|e| SkipReason::EmbeddingFailure(e.to_string()))?;

        Ok(ModelScore {
            token_count: tokenizer.count(text_b),
            similarity,
        })
    }
}

/// Both texts must fit the tokenizer's max length; unlimited handles always pass
fn check_length(tokenizer: &TokenizerHandle, text_a: &str, text_b: &str) -> Result<(), SkipReason> {
    let Some(max) = tokenizer.max_length() else {
        return Ok(());
    };

    let text_a_tokens = tokenizer.count(text_a);
    let text_b_tokens = tokenizer.count(text_b);
    if text_a_tokens > max || text_b_tokens > max {
        return Err(SkipReason::ExceedsMaxLength {
            model_max_length: max,
            text_a_tokens,
            text_b_tokens,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use cmet_tokens::TokenizerBackend;

    use super::*;

    fn whitespace(max: Option<usize>) -> TokenizerHandle {
        TokenizerHandle::new("ws", TokenizerBackend::Whitespace).with_max_length(max)
    }

    #[test]
    fn test_length_at_limit_passes() {
        assert!(check_length(&whitespace(Some(3)), "a b c", "a b").is_ok());
    }

    #[test]
    fn test_length_over_limit_on_either_side() {
        let err = check_length(&whitespace(Some(2)), "a b", "a b c").unwrap_err();
        assert_eq!(
            err,
            SkipReason::ExceedsMaxLength {
                model_max_length: 2,
                text_a_tokens: 2,
                text_b_tokens: 3,
            }
        );
        assert!(check_length(&whitespace(Some(2)), "a b c", "a").is_err());
    }

    #[test]
    fn test_no_limit_or_zero_limit_passes() {
        assert!(check_length(&whitespace(None), "a b c d", "a").is_ok());
        assert!(check_length(&whitespace(Some(0)), "a b c d", "a").is_ok());
    }
}
