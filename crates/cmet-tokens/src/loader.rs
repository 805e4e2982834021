//! Pretrained tokenizer loaders

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cmet_core::{Error, Result};
use dashmap::DashMap;
use hf_hub::api::tokio::{Api, ApiBuilder};
use tokenizers::Tokenizer;
use tracing::debug;

use crate::{TokenizerBackend, TokenizerHandle};

const TOKENIZER_FILE: &str = "tokenizer.json";
const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

/// Organisation assumed for bare sentence-transformers model names
const DEFAULT_HUB_ORG: &str = "sentence-transformers";

/// Trait for loading a tokenizer by model id
#[async_trait]
pub trait TokenizerLoader: Send + Sync {
    /// Name of the loader (for logs and error messages)
    fn name(&self) -> &'static str;

    /// Load the tokenizer for `model_id`
    async fn load(&self, model_id: &str) -> Result<TokenizerHandle>;
}

/// Downloads `tokenizer.json` from the HuggingFace Hub
pub struct HubTokenizerLoader {
    cache_dir: Option<PathBuf>,
}

impl HubTokenizerLoader {
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self { cache_dir }
    }

    fn api(&self) -> std::result::Result<Api, hf_hub::api::tokio::ApiError> {
        match &self.cache_dir {
            Some(dir) => ApiBuilder::new().with_cache_dir(dir.clone()).build(),
            None => Api::new(),
        }
    }
}

/// Hub repository for a model id; bare names live under sentence-transformers
pub fn hub_repo_id(model_id: &str) -> String {
    if model_id.contains('/') {
        model_id.to_string()
    } else {
        format!("{}/{}", DEFAULT_HUB_ORG, model_id)
    }
}

#[async_trait]
impl TokenizerLoader for HubTokenizerLoader {
    fn name(&self) -> &'static str {
        "hub"
    }

    async fn load(&self, model_id: &str) -> Result<TokenizerHandle> {
        let api = self
            .api()
            .map_err(|e| Error::tokenizer_unavailable(model_id, e))?;
        let repo = api.model(hub_repo_id(model_id));

        let tokenizer_path = repo
            .get(TOKENIZER_FILE)
            .await
            .map_err(|e| Error::tokenizer_unavailable(model_id, e))?;

        let max_length = match repo.get(TOKENIZER_CONFIG_FILE).await {
            Ok(path) => read_model_max_length(&path).await,
            Err(e) => {
                debug!("No {} for {}: {}", TOKENIZER_CONFIG_FILE, model_id, e);
                None
            }
        };

        load_pretrained(model_id, &tokenizer_path, max_length)
    }
}

/// Reads `<root>/<model id>/tokenizer.json` from local disk
pub struct LocalTokenizerLoader {
    root: PathBuf,
}

impl LocalTokenizerLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl TokenizerLoader for LocalTokenizerLoader {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn load(&self, model_id: &str) -> Result<TokenizerHandle> {
        let dir = self.root.join(model_id);
        let tokenizer_path = dir.join(TOKENIZER_FILE);
        if !tokenizer_path.is_file() {
            return Err(Error::tokenizer_unavailable(
                model_id,
                format!("{} not found", tokenizer_path.display()),
            ));
        }

        let max_length = read_model_max_length(&dir.join(TOKENIZER_CONFIG_FILE)).await;
        load_pretrained(model_id, &tokenizer_path, max_length)
    }
}

/// Tries each loader in order, first success wins
pub struct ChainTokenizerLoader {
    loaders: Vec<Box<dyn TokenizerLoader>>,
}

impl ChainTokenizerLoader {
    pub fn new(loaders: Vec<Box<dyn TokenizerLoader>>) -> Self {
        Self { loaders }
    }
}

#[async_trait]
impl TokenizerLoader for ChainTokenizerLoader {
    fn name(&self) -> &'static str {
        "chain"
    }

    async fn load(&self, model_id: &str) -> Result<TokenizerHandle> {
        let mut failures = Vec::new();

        for loader in &self.loaders {
            match loader.load(model_id).await {
                Ok(handle) => return Ok(handle),
                Err(e) => {
                    debug!("{} loader failed for {}: {}", loader.name(), model_id, e);
                    failures.push(format!("{}: {}", loader.name(), e));
                }
            }
        }

        if failures.is_empty() {
            failures.push("no loaders configured".to_string());
        }
        Err(Error::tokenizer_unavailable(model_id, failures.join("; ")))
    }
}

/// Process-wide cache in front of another loader, keyed by model id
///
/// Failed loads are not cached.
pub struct CachingTokenizerLoader {
    inner: Arc<dyn TokenizerLoader>,
    cache: DashMap<String, TokenizerHandle>,
}

impl CachingTokenizerLoader {
    pub fn new(inner: Arc<dyn TokenizerLoader>) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl TokenizerLoader for CachingTokenizerLoader {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn load(&self, model_id: &str) -> Result<TokenizerHandle> {
        if let Some(handle) = self.cache.get(model_id) {
            return Ok(handle.clone());
        }

        let handle = self.inner.load(model_id).await?;
        self.cache.insert(model_id.to_string(), handle.clone());
        Ok(handle)
    }
}

/// Whitespace tokenizer for every model, no I/O
pub struct WhitespaceTokenizerLoader {
    max_length: Option<usize>,
}

impl WhitespaceTokenizerLoader {
    pub fn new(max_length: Option<usize>) -> Self {
        Self { max_length }
    }
}

#[async_trait]
impl TokenizerLoader for WhitespaceTokenizerLoader {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    async fn load(&self, model_id: &str) -> Result<TokenizerHandle> {
        Ok(TokenizerHandle::new(model_id, TokenizerBackend::Whitespace)
            .with_max_length(self.max_length))
    }
}

fn load_pretrained(
    model_id: &str,
    path: &Path,
    config_max_length: Option<usize>,
) -> Result<TokenizerHandle> {
    let mut tokenizer =
        Tokenizer::from_file(path).map_err(|e| Error::tokenizer_unavailable(model_id, e))?;

    let max_length = config_max_length
        .or_else(|| tokenizer.get_truncation().map(|t| t.max_length));

    // Counts must cover the whole text, never a truncated or padded encoding
    tokenizer
        .with_truncation(None)
        .map_err(|e| Error::tokenizer_unavailable(model_id, e))?;
    tokenizer.with_padding(None);

    debug!(
        "Loaded tokenizer for {} from {} (max length {:?})",
        model_id,
        path.display(),
        max_length
    );

    Ok(
        TokenizerHandle::new(model_id, TokenizerBackend::Pretrained(Arc::new(tokenizer)))
            .with_max_length(max_length),
    )
}

async fn read_model_max_length(path: &Path) -> Option<usize> {
    let content = tokio::fs::read_to_string(path).await.ok()?;
    parse_model_max_length(&content)
}

/// `model_max_length` from a tokenizer config
///
/// Unset limits are stored as a huge float sentinel and read as `None`.
pub fn parse_model_max_length(config_json: &str) -> Option<usize> {
    let value: serde_json::Value = serde_json::from_str(config_json).ok()?;
    value
        .get("model_max_length")?
        .as_u64()
        .filter(|&n| n > 0 && n <= u32::MAX as u64)
        .map(|n| n as usize)
}
