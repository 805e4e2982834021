use cmet_core::{CompressionOutput, CompressionTrace, Result, TraceStep};

use crate::{CompressionEngine, words};

/// Keeps the first and last words of the text within the budget
///
/// With a budget of `n` words the first `ceil(n / 2)` and the last
/// `floor(n / 2)` words are kept, joined by single spaces.
pub struct FirstLastEngine;

impl FirstLastEngine {
    pub const ID: &'static str = "first_last";
}

impl CompressionEngine for FirstLastEngine {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn compress(&self, text: &str, budget: Option<usize>) -> Result<CompressionOutput> {
        let tokens = words::split(text);

        let output = match budget {
            Some(limit) if tokens.len() > limit => {
                let head = limit.div_ceil(2);
                let tail = limit - head;
                let mut kept = tokens[..head].to_vec();
                kept.extend_from_slice(&tokens[tokens.len() - tail..]);
                words::join(&kept)
            }
            _ => text.to_string(),
        };

        let trace = CompressionTrace {
            engine_id: Self::ID.to_string(),
            budget_tokens: budget,
            steps: vec![TraceStep {
                step: "first_last".to_string(),
                input_words: tokens.len(),
                output_words: words::count(&output),
            }],
        };

        Ok(CompressionOutput::new(Self::ID, output).with_trace(trace))
    }
}
