//! Token counting across tokenizer backends

use tracing::warn;

use crate::{TokenizerBackend, TokenizerHandle};

/// Count the tokens of `text` with the handle's tokenizer
///
/// Special tokens are not added. A pretrained tokenizer that fails to
/// encode counts as zero.
pub fn count(handle: &TokenizerHandle, text: &str) -> usize {
    match handle.backend() {
        TokenizerBackend::Bpe(bpe) => bpe.encode_ordinary(text).len(),
        TokenizerBackend::Pretrained(tokenizer) => match tokenizer.encode(text, false) {
            Ok(encoding) => encoding.len(),
            Err(e) => {
                warn!("Tokenizer {} failed to encode input: {}", handle.name(), e);
                0
            }
        },
        TokenizerBackend::Whitespace => text.split_whitespace().count(),
    }
}
