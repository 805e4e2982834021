//! Uniform output of every compression engine

use serde::{Deserialize, Serialize};

/// Text produced by an engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedText {
    pub text: String,
    pub engine_id: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// One step recorded while compressing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step: String,
    pub input_words: usize,
    pub output_words: usize,
}

/// Record of how an engine arrived at its output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionTrace {
    pub engine_id: String,
    pub budget_tokens: Option<usize>,
    pub steps: Vec<TraceStep>,
}

/// Result of `CompressionEngine::compress`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionOutput {
    pub compressed: CompressedText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<CompressionTrace>,
}

impl CompressionOutput {
    pub fn new(engine_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            compressed: CompressedText {
                text: text.into(),
                engine_id: engine_id.into(),
                metadata: serde_json::Value::Null,
            },
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: CompressionTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.compressed.metadata = metadata;
        self
    }

    pub fn text(&self) -> &str {
        &self.compressed.text
    }

    pub fn into_text(self) -> String {
        self.compressed.text
    }
}
