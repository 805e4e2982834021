//! The persisted metrics report

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::{Result, SimilarityReport};

/// Metrics recorded for one engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineMetrics {
    pub compression_ratio: f64,
    pub embedding_similarity_multi: SimilarityReport,
}

/// Engine id -> metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricsReport {
    engines: BTreeMap<String, EngineMetrics>,
}

impl MetricsReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, engine_id: impl Into<String>, metrics: EngineMetrics) {
        self.engines.insert(engine_id.into(), metrics);
    }

    pub fn get(&self, engine_id: &str) -> Option<&EngineMetrics> {
        self.engines.get(engine_id)
    }

    pub fn engine_ids(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ModelScore, ModelSpec, SimilarityResult};

    #[test]
    fn test_report_shape() {
        let mut scores = SimilarityResult::new();
        scores.insert(
            ModelSpec::from("all-MiniLM-L6-v2"),
            ModelScore {
                token_count: 9,
                similarity: 1.0,
            },
        );

        let mut report = MetricsReport::new();
        report.insert(
            "none",
            EngineMetrics {
                compression_ratio: 1.0,
                embedding_similarity_multi: SimilarityReport::PerModel(scores),
            },
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "none": {
                    "compression_ratio": 1.0,
                    "embedding_similarity_multi": {
                        "all-MiniLM-L6-v2": { "token_count": 9, "similarity": 1.0 }
                    }
                }
            })
        );
    }

    #[test]
    fn test_write_to_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("engine_metrics.json");

        MetricsReport::new().write_to(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
