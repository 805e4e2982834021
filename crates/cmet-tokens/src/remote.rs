//! Remote-API (OpenAI) tokenizers backed by tiktoken

use std::sync::Arc;

use cmet_core::{Error, ModelSpec, Result};
use tracing::{info, warn};

use crate::{TokenizerBackend, TokenizerHandle};

/// Fallback when no limit is known for a remote model
pub const DEFAULT_REMOTE_MAX_LENGTH: usize = 8191;

/// Well-known input limits, checked before anything else
const KNOWN_MAX_TOKENS: &[(&str, usize)] = &[
    ("text-embedding-ada-002", 8191),
    ("gpt-4", 8192),
    ("gpt-3.5-turbo", 4096),
];

pub fn known_max_tokens(model: &str) -> Option<usize> {
    KNOWN_MAX_TOKENS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, limit)| *limit)
}

/// Resolve the tiktoken encoding for `base` (the model name without namespace)
///
/// Unknown models fall back to the GPT-2 encoding.
pub fn resolve_remote(spec: &ModelSpec, base: &str) -> Result<TokenizerHandle> {
    let bpe = match tiktoken_rs::get_bpe_from_model(base) {
        Ok(bpe) => bpe,
        Err(e) => {
            warn!(
                "No tiktoken encoding for {} ({}). Falling back to gpt2.",
                base, e
            );
            tiktoken_rs::r50k_base().map_err(|e| Error::tokenizer_unavailable(spec.as_str(), e))?
        }
    };

    Ok(
        TokenizerHandle::new(spec.as_str(), TokenizerBackend::Bpe(Arc::new(bpe)))
            .with_max_length(Some(remote_max_length(spec, base))),
    )
}

/// Known-limits table, then tiktoken's context size, then the default
///
/// tiktoken encodings carry no `model_max_length` of their own.
fn remote_max_length(spec: &ModelSpec, base: &str) -> usize {
    known_max_tokens(base)
        .or_else(|| context_length(base))
        .unwrap_or_else(|| {
            info!(
                "Could not determine max length for {}, defaulting to {}",
                spec, DEFAULT_REMOTE_MAX_LENGTH
            );
            DEFAULT_REMOTE_MAX_LENGTH
        })
}

/// Context window tiktoken reports, only for models it recognises
fn context_length(base: &str) -> Option<usize> {
    tiktoken_rs::tokenizer::get_tokenizer(base)?;
    Some(tiktoken_rs::model::get_context_size(base)).filter(|&n| n > 0)
}
