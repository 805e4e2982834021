//! Compression engine trait

use cmet_core::{CompressionOutput, Result};

/// Trait for engines that shorten text under a token budget
pub trait CompressionEngine: Send + Sync {
    /// Registry identifier of the engine
    fn id(&self) -> &'static str;

    /// Compress `text` so it fits `budget` tokens (None = no limit)
    fn compress(&self, text: &str, budget: Option<usize>) -> Result<CompressionOutput>;
}
