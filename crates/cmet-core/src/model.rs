//! Model identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace prefix selecting the remote-API tokenizer strategy
pub const REMOTE_NAMESPACE: &str = "openai/";

/// Identifier of an embedding / tokenizer model, e.g.
/// `sentence-transformers/all-MiniLM-L6-v2` or `openai/text-embedding-ada-002`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSpec(String);

impl ModelSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base model name when the id carries the remote-API namespace
    pub fn remote_model(&self) -> Option<&str> {
        self.0.strip_prefix(REMOTE_NAMESPACE)
    }

    pub fn is_remote(&self) -> bool {
        self.remote_model().is_some()
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModelSpec {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelSpec {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModelSpec {
    fn from(id: String) -> Self {
        Self(id)
    }
}
