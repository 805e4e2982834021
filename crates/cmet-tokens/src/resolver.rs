//! Model id -> tokenizer handle

use std::path::PathBuf;
use std::sync::Arc;

use cmet_core::{ModelSpec, Result};

use crate::loader::{ChainTokenizerLoader, HubTokenizerLoader, LocalTokenizerLoader};
use crate::{TokenizerHandle, TokenizerLoader, remote};

/// Picks a resolution strategy from the model namespace
///
/// `openai/<model>` resolves to a tiktoken encoding without I/O; any other
/// id is handed to the pretrained loader.
pub struct TokenizerResolver {
    loader: Arc<dyn TokenizerLoader>,
}

impl TokenizerResolver {
    pub fn new(loader: Arc<dyn TokenizerLoader>) -> Self {
        Self { loader }
    }

    /// Hub download first, then `<local_dir>/<model id>` when configured
    pub fn with_default_loaders(cache_dir: Option<PathBuf>, local_dir: Option<PathBuf>) -> Self {
        Self::new(Arc::new(default_loader(cache_dir, local_dir)))
    }

    pub async fn resolve(&self, spec: &ModelSpec) -> Result<TokenizerHandle> {
        match spec.remote_model() {
            Some(base) => remote::resolve_remote(spec, base),
            None => self.loader.load(spec.as_str()).await,
        }
    }
}

/// The default pretrained loader chain
pub fn default_loader(cache_dir: Option<PathBuf>, local_dir: Option<PathBuf>) -> ChainTokenizerLoader {
    let mut loaders: Vec<Box<dyn TokenizerLoader>> =
        vec![Box::new(HubTokenizerLoader::new(cache_dir))];
    if let Some(dir) = local_dir {
        loaders.push(Box::new(LocalTokenizerLoader::new(dir)));
    }
    ChainTokenizerLoader::new(loaders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TokenizerBackend, WhitespaceTokenizerLoader};

    #[tokio::test]
    async fn test_remote_namespace_bypasses_loader() {
        let resolver = TokenizerResolver::new(Arc::new(WhitespaceTokenizerLoader::new(Some(3))));

        let handle = resolver
            .resolve(&ModelSpec::from("openai/gpt-4"))
            .await
            .unwrap();
        assert!(matches!(handle.backend(), TokenizerBackend::Bpe(_)));
        assert_eq!(handle.max_length(), Some(8192));
    }

    #[tokio::test]
    async fn test_other_ids_use_loader() {
        let resolver = TokenizerResolver::new(Arc::new(WhitespaceTokenizerLoader::new(Some(3))));

        let handle = resolver
            .resolve(&ModelSpec::from("all-MiniLM-L6-v2"))
            .await
            .unwrap();
        assert!(matches!(handle.backend(), TokenizerBackend::Whitespace));
        assert_eq!(handle.max_length(), Some(3));
    }
}
