//! Metric evaluators and the engine metrics collection driver

pub mod driver;
pub mod legacy;
pub mod metric;
pub mod multi;
pub mod ratio;
pub mod single;

pub use driver::{BASELINE_ENGINE, MetricsCollectionDriver, SimilarityMetric};
pub use legacy::LegacyMultiEvaluator;
pub use metric::MetricKind;
pub use multi::{MultiModelEvaluator, MultiModelOutcome};
pub use ratio::compression_ratio;
pub use single::{SemanticSimilarity, SingleModelEvaluator};
