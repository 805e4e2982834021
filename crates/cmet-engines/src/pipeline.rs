use cmet_core::{CompressionOutput, CompressionTrace, Result};
use tracing::debug;

use crate::CompressionEngine;

/// Runs a fixed sequence of engines, feeding each stage's text to the next
///
/// Every stage gets the same budget. An empty pipeline returns the input.
pub struct PipelineEngine {
    stages: Vec<Box<dyn CompressionEngine>>,
}

impl PipelineEngine {
    pub const ID: &'static str = "pipeline";

    pub fn new(stages: Vec<Box<dyn CompressionEngine>>) -> Self {
        Self { stages }
    }

    pub fn stage_ids(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.id()).collect()
    }
}

impl CompressionEngine for PipelineEngine {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn compress(&self, text: &str, budget: Option<usize>) -> Result<CompressionOutput> {
        let mut current = text.to_string();
        let mut steps = Vec::new();

        for stage in &self.stages {
            debug!("Pipeline stage {}", stage.id());
            let output = stage.compress(&current, budget)?;
            if let Some(trace) = output.trace.as_ref() {
                steps.extend(trace.steps.iter().cloned());
            }
            current = output.into_text();
        }

        let trace = CompressionTrace {
            engine_id: Self::ID.to_string(),
            budget_tokens: budget,
            steps,
        };

        Ok(CompressionOutput::new(Self::ID, current)
            .with_metadata(serde_json::json!({ "stages": self.stage_ids() }))
            .with_trace(trace))
    }
}
