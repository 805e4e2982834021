//! Core domain models for cmet
//!
//! This crate contains:
//! - Evaluation requests and model identifiers
//! - Similarity results and skip reasons
//! - Engine output and the persisted metrics report
//! - The shared error taxonomy

pub mod compression;
pub mod error;
pub mod model;
pub mod report;
pub mod request;
pub mod similarity;

pub use compression::{CompressedText, CompressionOutput, CompressionTrace, TraceStep};
pub use error::{Error, Result};
pub use model::ModelSpec;
pub use report::{EngineMetrics, MetricsReport};
pub use request::EvaluationRequest;
pub use similarity::{LegacyScores, ModelScore, SimilarityReport, SimilarityResult, SkipReason};
