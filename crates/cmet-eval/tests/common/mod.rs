#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cmet_core::{Error, ModelSpec, Result};
use cmet_embed::{EmbedOptions, Embedder, MockEmbedder, SimilarityScorer};
use cmet_tokens::{TokenizerBackend, TokenizerHandle, TokenizerLoader, TokenizerResolver};

/// Whitespace tokenizers with per-model limits; unlisted models fail to load
#[derive(Default)]
pub struct StubLoader {
    limits: HashMap<String, Option<usize>>,
}

impl StubLoader {
    pub fn with_model(mut self, model: &str, max_length: Option<usize>) -> Self {
        self.limits.insert(model.to_string(), max_length);
        self
    }
}

#[async_trait]
impl TokenizerLoader for StubLoader {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn load(&self, model_id: &str) -> Result<TokenizerHandle> {
        match self.limits.get(model_id) {
            Some(max) => Ok(TokenizerHandle::new(model_id, TokenizerBackend::Whitespace)
                .with_max_length(*max)),
            None => Err(Error::tokenizer_unavailable(model_id, "not on the hub")),
        }
    }
}

/// Mock embeddings, except for the listed models which always fail
#[derive(Default)]
pub struct FlakyEmbedder {
    inner: MockEmbedder,
    failing: Vec<String>,
}

impl FlakyEmbedder {
    pub fn failing(models: &[&str]) -> Self {
        Self {
            inner: MockEmbedder::default(),
            failing: models.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Embedder for FlakyEmbedder {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn embed(
        &self,
        texts: &[&str],
        model: &ModelSpec,
        options: &EmbedOptions,
    ) -> Result<Vec<Vec<f32>>> {
        if self.failing.iter().any(|m| m == model.as_str()) {
            return Err(Error::embedding_failure(model.as_str(), "CUDA out of memory"));
        }
        self.inner.embed(texts, model, options).await
    }
}

/// Same vector for every text
pub struct ConstantEmbedder;

#[async_trait]
impl Embedder for ConstantEmbedder {
    fn name(&self) -> &'static str {
        "constant"
    }

    async fn embed(
        &self,
        texts: &[&str],
        _model: &ModelSpec,
        _options: &EmbedOptions,
    ) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![0.6, 0.8]).collect())
    }
}

pub fn resolver(loader: StubLoader) -> Arc<TokenizerResolver> {
    Arc::new(TokenizerResolver::new(Arc::new(loader)))
}

pub fn scorer(embedder: impl Embedder + 'static) -> Arc<SimilarityScorer> {
    Arc::new(SimilarityScorer::new(Arc::new(embedder)))
}

pub fn models(ids: &[&str]) -> Vec<ModelSpec> {
    ids.iter().map(|id| ModelSpec::from(*id)).collect()
}

/// Word-level `tokenizer.json` with truncation and padding switched on, as
/// sentence-transformers repos ship them, plus a `tokenizer_config.json`
pub fn write_truncating_tokenizer(
    root: &Path,
    model_id: &str,
    truncate_at: usize,
    model_max_length: usize,
) {
    let tokenizer = format!(
        r#"{{
        "version": "1.0",
        "truncation": {{"direction": "Right", "max_length": {truncate_at}, "strategy": "LongestFirst", "stride": 0}},
        "padding": {{"strategy": "BatchLongest", "direction": "Right", "pad_to_multiple_of": null, "pad_id": 0, "pad_type_id": 0, "pad_token": "[UNK]"}},
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": {{ "type": "Whitespace" }},
        "post_processor": null,
        "decoder": null,
        "model": {{
            "type": "WordLevel",
            "vocab": {{ "[UNK]": 0, "hello": 1, "world": 2, "apollo": 3, "moon": 4 }},
            "unk_token": "[UNK]"
        }}
    }}"#
    );

    let dir = root.join(model_id);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("tokenizer.json"), tokenizer).unwrap();
    std::fs::write(
        dir.join("tokenizer_config.json"),
        format!(r#"{{"model_max_length": {model_max_length}}}"#),
    )
    .unwrap();
}
