//! Runs every registered engine over a sample and collects its metrics

use std::path::Path;

use cmet_core::{EngineMetrics, EvaluationRequest, MetricsReport, ModelSpec, Result, SimilarityReport};
use cmet_engines::{
    CompressionEngine, EngineRegistry, FirstLastEngine, NoCompressionEngine, PipelineEngine,
};
use tracing::{info, warn};

use crate::{LegacyMultiEvaluator, MultiModelEvaluator, compression_ratio};

/// Engine compressed without a budget to give an uncompressed reference
pub const BASELINE_ENGINE: &str = NoCompressionEngine::ID;

/// Which multi-model similarity goes into the report, with the models it scores
pub enum SimilarityMetric {
    PerModel {
        evaluator: MultiModelEvaluator,
        models: Vec<ModelSpec>,
    },
    Legacy(LegacyMultiEvaluator),
}

impl SimilarityMetric {
    pub fn per_model(evaluator: MultiModelEvaluator, models: Vec<ModelSpec>) -> Self {
        Self::PerModel { evaluator, models }
    }

    pub fn models(&self) -> &[ModelSpec] {
        match self {
            Self::PerModel { models, .. } => models,
            Self::Legacy(evaluator) => evaluator.models(),
        }
    }
}

pub struct MetricsCollectionDriver {
    similarity: SimilarityMetric,
    budget_tokens: usize,
}

impl MetricsCollectionDriver {
    pub fn new(similarity: SimilarityMetric, budget_tokens: usize) -> Self {
        Self {
            similarity,
            budget_tokens,
        }
    }

    pub fn models(&self) -> &[ModelSpec] {
        self.similarity.models()
    }

    /// Construct an engine by id
    ///
    /// `pipeline` is wired as first_last followed by none.
    pub fn instantiate(registry: &EngineRegistry, id: &str) -> Result<Box<dyn CompressionEngine>> {
        if id == PipelineEngine::ID && registry.contains(id) {
            return Ok(Box::new(PipelineEngine::new(vec![
                Box::new(FirstLastEngine),
                Box::new(NoCompressionEngine),
            ])));
        }
        registry.create(id)
    }

    /// Metrics for every engine that succeeds; failing engines are logged and left out
    pub async fn collect(&self, registry: &EngineRegistry, sample_text: &str) -> MetricsReport {
        let mut report = MetricsReport::new();

        for id in registry.ids() {
            match self.collect_engine(registry, &id, sample_text).await {
                Ok(metrics) => {
                    info!(
                        "{}: compression ratio {:.3}",
                        id, metrics.compression_ratio
                    );
                    report.insert(id, metrics);
                }
                Err(e) => warn!("Engine {} failed, leaving it out of the report: {}", id, e),
            }
        }

        report
    }

    /// Persist a collected report as pretty JSON
    pub fn write_report(report: &MetricsReport, path: &Path) -> Result<()> {
        info!("Writing metrics report to {}", path.display());
        report.write_to(path)
    }

    async fn collect_engine(
        &self,
        registry: &EngineRegistry,
        id: &str,
        sample_text: &str,
    ) -> Result<EngineMetrics> {
        let engine = Self::instantiate(registry, id)?;
        let budget = (id != BASELINE_ENGINE).then_some(self.budget_tokens);

        let compressed = engine.compress(sample_text, budget)?.into_text();
        let compression_ratio = compression_ratio(sample_text, &compressed);

        let request = EvaluationRequest::compression(sample_text, compressed);
        let embedding_similarity_multi = match &self.similarity {
            SimilarityMetric::PerModel { evaluator, models } => {
                SimilarityReport::PerModel(evaluator.evaluate(&request, models).await)
            }
            SimilarityMetric::Legacy(evaluator) => {
                SimilarityReport::Legacy(evaluator.evaluate(&request).await)
            }
        };

        Ok(EngineMetrics {
            compression_ratio,
            embedding_similarity_multi,
        })
    }
}
