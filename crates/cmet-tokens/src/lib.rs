//! Tokenizer resolution and token counting
//!
//! Models in the `openai/` namespace resolve to tiktoken BPE encodings;
//! everything else goes through a chain of pretrained-tokenizer loaders.

pub mod counter;
pub mod handle;
pub mod loader;
pub mod remote;
pub mod resolver;

pub use counter::count;
pub use handle::{TokenizerBackend, TokenizerHandle};
pub use loader::{
    CachingTokenizerLoader, ChainTokenizerLoader, HubTokenizerLoader, LocalTokenizerLoader,
    TokenizerLoader, WhitespaceTokenizerLoader,
};
pub use resolver::TokenizerResolver;
