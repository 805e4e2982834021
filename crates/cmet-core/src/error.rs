use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tokenizer unavailable for {model}: {reason}")]
    TokenizerUnavailable { model: String, reason: String },

    #[error("Embedding failed for {model}: {reason}")]
    EmbeddingFailure { model: String, reason: String },

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Unknown engine: {0}")]
    UnknownEngine(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Engine {engine} failed: {reason}")]
    Engine { engine: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn tokenizer_unavailable(model: impl Into<String>, reason: impl ToString) -> Self {
        Self::TokenizerUnavailable {
            model: model.into(),
            reason: reason.to_string(),
        }
    }

    pub fn embedding_failure(model: impl Into<String>, reason: impl ToString) -> Self {
        Self::EmbeddingFailure {
            model: model.into(),
            reason: reason.to_string(),
        }
    }

    pub fn engine(engine: impl Into<String>, reason: impl ToString) -> Self {
        Self::Engine {
            engine: engine.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
