//! Similarity results produced by the evaluators

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use crate::ModelSpec;

/// Score recorded for one model
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, Deserialize)]
pub struct ModelScore {
    /// Tokens in the second text, counted with this model's tokenizer
    pub token_count: usize,
    /// Cosine similarity in [-1, 1]
    pub similarity: f64,
}

/// Why a model is absent from a `SimilarityResult`
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    TokenizerUnavailable(String),
    ExceedsMaxLength {
        model_max_length: usize,
        text_a_tokens: usize,
        text_b_tokens: usize,
    },
    EmbeddingFailure(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenizerUnavailable(reason) => write!(f, "tokenizer unavailable: {}", reason),
            Self::ExceedsMaxLength {
                model_max_length,
                text_a_tokens,
                text_b_tokens,
            } => write!(
                f,
                "input exceeds model_max_length {} ({} / {} tokens)",
                model_max_length, text_a_tokens, text_b_tokens
            ),
            Self::EmbeddingFailure(reason) => write!(f, "embedding failed: {}", reason),
        }
    }
}

/// Per-model scores in the order the models were requested
///
/// Serializes as a JSON object keyed by model id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityResult {
    entries: Vec<(ModelSpec, ModelScore)>,
}

impl SimilarityResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score, replacing any earlier entry for the same model
    pub fn insert(&mut self, model: ModelSpec, score: ModelScore) {
        match self.entries.iter_mut().find(|(m, _)| *m == model) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((model, score)),
        }
    }

    pub fn get(&self, model: &str) -> Option<&ModelScore> {
        self.entries
            .iter()
            .find(|(m, _)| m.as_str() == model)
            .map(|(_, s)| s)
    }

    pub fn contains(&self, model: &str) -> bool {
        self.get(model).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelSpec> {
        self.entries.iter().map(|(m, _)| m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModelSpec, &ModelScore)> {
        self.entries.iter().map(|(m, s)| (m, s))
    }
}

impl Serialize for SimilarityResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (model, score) in &self.entries {
            map.serialize_entry(model.as_str(), score)?;
        }
        map.end()
    }
}

/// Output of the deprecated single-pass multi-model evaluator
///
/// Serializes flat: `{"token_count": N, "<model>": score, ..., "semantic_similarity": mean}`.
/// When the whitespace ceiling is exceeded only `token_count` is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyScores {
    pub token_count: usize,
    pub scores: Vec<(ModelSpec, f64)>,
    pub semantic_similarity: Option<f64>,
}

impl LegacyScores {
    pub fn token_count_only(token_count: usize) -> Self {
        Self {
            token_count,
            ..Self::default()
        }
    }
}

impl Serialize for LegacyScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("token_count", &(self.token_count as f64))?;
        for (model, score) in &self.scores {
            map.serialize_entry(model.as_str(), score)?;
        }
        if let Some(mean) = self.semantic_similarity {
            map.serialize_entry("semantic_similarity", &mean)?;
        }
        map.end()
    }
}

/// Similarity section of an engine's metrics
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum SimilarityReport {
    PerModel(SimilarityResult),
    Legacy(LegacyScores),
}
