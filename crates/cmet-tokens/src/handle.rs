use std::fmt;
use std::sync::Arc;

use tiktoken_rs::CoreBPE;
use tokenizers::Tokenizer;

/// Encoder behind a handle
#[derive(Clone)]
pub enum TokenizerBackend {
    /// tiktoken BPE encoding (remote-API models)
    Bpe(Arc<CoreBPE>),
    /// HuggingFace pretrained tokenizer
    Pretrained(Arc<Tokenizer>),
    /// Whitespace word split, used when no real tokenizer is wanted
    Whitespace,
}

impl TokenizerBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bpe(_) => "bpe",
            Self::Pretrained(_) => "pretrained",
            Self::Whitespace => "whitespace",
        }
    }
}

/// A resolved tokenizer plus the maximum input length of its model
#[derive(Clone)]
pub struct TokenizerHandle {
    name: String,
    backend: TokenizerBackend,
    max_length: Option<usize>,
}

impl TokenizerHandle {
    pub fn new(name: impl Into<String>, backend: TokenizerBackend) -> Self {
        Self {
            name: name.into(),
            backend,
            max_length: None,
        }
    }

    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &TokenizerBackend {
        &self.backend
    }

    /// Maximum input length, only when known and positive
    pub fn max_length(&self) -> Option<usize> {
        self.max_length.filter(|&n| n > 0)
    }

    pub fn count(&self, text: &str) -> usize {
        crate::count(self, text)
    }
}

impl fmt::Debug for TokenizerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerHandle")
            .field("name", &self.name)
            .field("backend", &self.backend.kind())
            .field("max_length", &self.max_length)
            .finish()
    }
}
