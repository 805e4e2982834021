//! Embedding service and pairwise similarity scoring

pub mod embedder;
pub mod http;
pub mod mock;
pub mod scorer;

pub use embedder::{EmbedOptions, Embedder, dot, normalize};
pub use http::HttpEmbedder;
pub use mock::MockEmbedder;
pub use scorer::SimilarityScorer;
