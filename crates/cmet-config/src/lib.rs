use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for cmet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Models scored for every engine
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Token budget handed to every engine except the baseline
    #[serde(default = "default_budget")]
    pub budget_tokens: usize,

    /// Similarity metric recorded in the report
    #[serde(default = "default_similarity_metric")]
    pub similarity_metric: String,

    #[serde(default)]
    pub legacy: LegacyConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub tokenizers: TokenizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyConfig {
    /// Whitespace-token ceiling of the deprecated evaluator
    #[serde(default = "default_legacy_max_tokens")]
    pub max_tokens: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Base URL of an OpenAI-compatible embeddings API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,

    #[serde(default)]
    pub batch_size: Option<usize>,

    /// Vector size of the mock embedder
    #[serde(default = "default_mock_dimension")]
    pub mock_dimension: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenizerConfig {
    /// HuggingFace Hub cache directory (hub default when unset)
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Directory of `<model id>/tokenizer.json` used when the hub is unavailable
    #[serde(default)]
    pub local_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models: default_models(),
            budget_tokens: default_budget(),
            similarity_metric: default_similarity_metric(),
            legacy: LegacyConfig::default(),
            embedding: EmbeddingConfig::default(),
            tokenizers: TokenizerConfig::default(),
        }
    }
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_legacy_max_tokens(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            batch_size: None,
            mock_dimension: default_mock_dimension(),
        }
    }
}

fn default_models() -> Vec<String> {
    vec![
        "all-MiniLM-L6-v2".to_string(),
        "multi-qa-mpnet-base-dot-v1".to_string(),
    ]
}

fn default_budget() -> usize {
    100
}

fn default_similarity_metric() -> String {
    "multi_model_embedding_similarity".to_string()
}

fn default_legacy_max_tokens() -> usize {
    8192
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080/v1".to_string()
}

fn default_api_key_env() -> Option<String> {
    Some("OPENAI_API_KEY".to_string())
}

fn default_mock_dimension() -> usize {
    64
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "cmet", "cmet") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.cmet/config.toml")
        }
    }

    /// API key read from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        self.embedding
            .api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty())
    }
}
