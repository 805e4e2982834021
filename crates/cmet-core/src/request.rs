//! Evaluation request: the pair of texts a metric compares

use crate::{Error, Result};

/// A pair of texts to compare
///
/// Exactly one pair is carried. For `Response` the reference answer is
/// treated as the first text and the response as the second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationRequest {
    Compression { original: String, compressed: String },
    Response { llm_response: String, reference: String },
}

impl EvaluationRequest {
    pub fn compression(original: impl Into<String>, compressed: impl Into<String>) -> Self {
        Self::Compression {
            original: original.into(),
            compressed: compressed.into(),
        }
    }

    pub fn response(llm_response: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::Response {
            llm_response: llm_response.into(),
            reference: reference.into(),
        }
    }

    /// Build a request from optional fields
    ///
    /// A complete original/compressed pair takes precedence over a complete
    /// response/reference pair. Anything else is a `MalformedRequest`.
    pub fn from_parts(
        original: Option<&str>,
        compressed: Option<&str>,
        llm_response: Option<&str>,
        reference: Option<&str>,
    ) -> Result<Self> {
        match (original, compressed, llm_response, reference) {
            (Some(original), Some(compressed), _, _) => Ok(Self::compression(original, compressed)),
            (_, _, Some(response), Some(reference)) => Ok(Self::response(response, reference)),
            _ => Err(Error::MalformedRequest(
                "requires original/compressed texts or response/reference texts".to_string(),
            )),
        }
    }

    /// The two texts in comparison order
    pub fn texts(&self) -> (&str, &str) {
        match self {
            Self::Compression {
                original,
                compressed,
            } => (original, compressed),
            Self::Response {
                llm_response,
                reference,
            } => (reference, llm_response),
        }
    }

    /// True when either side is empty and no meaningful score exists
    pub fn is_empty(&self) -> bool {
        let (a, b) = self.texts();
        a.is_empty() || b.is_empty()
    }
}
