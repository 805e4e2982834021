use cmet_core::{CompressionOutput, CompressionTrace, Result, TraceStep};

use crate::{CompressionEngine, words};

/// Baseline engine: returns the text as-is, truncated only when a budget is given
pub struct NoCompressionEngine;

impl NoCompressionEngine {
    pub const ID: &'static str = "none";
}

impl CompressionEngine for NoCompressionEngine {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn compress(&self, text: &str, budget: Option<usize>) -> Result<CompressionOutput> {
        let input_words = words::count(text);

        let output = match budget {
            Some(limit) if input_words > limit => {
                let kept = words::split(text);
                words::join(&kept[..limit])
            }
            _ => text.to_string(),
        };

        let trace = CompressionTrace {
            engine_id: Self::ID.to_string(),
            budget_tokens: budget,
            steps: vec![TraceStep {
                step: "truncate".to_string(),
                input_words,
                output_words: words::count(&output),
            }],
        };

        Ok(CompressionOutput::new(Self::ID, output).with_trace(trace))
    }
}
