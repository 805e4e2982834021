mod common;

use cmet_core::{CompressionOutput, Error, Result, SimilarityReport};
use cmet_embed::MockEmbedder;
use cmet_engines::{
    CompressionEngine, EngineRegistry, FirstLastEngine, NoCompressionEngine,
};
use cmet_eval::{
    LegacyMultiEvaluator, MetricsCollectionDriver, MultiModelEvaluator, SimilarityMetric,
};

use common::{StubLoader, models, resolver, scorer};

const SAMPLE: &str = "Apollo 11 landed on the Moon in 1969.";

struct ExplodingEngine;

impl CompressionEngine for ExplodingEngine {
    fn id(&self) -> &'static str {
        "exploding"
    }

    fn compress(&self, _text: &str, _budget: Option<usize>) -> Result<CompressionOutput> {
        Err(Error::engine("exploding", "model weights missing"))
    }
}

fn driver(budget_tokens: usize) -> MetricsCollectionDriver {
    let evaluator = MultiModelEvaluator::new(
        resolver(StubLoader::default().with_model("mini", Some(512))),
        scorer(MockEmbedder::default()),
    );
    MetricsCollectionDriver::new(
        SimilarityMetric::per_model(evaluator, models(&["mini"])),
        budget_tokens,
    )
}

fn registry(ids: &[&str]) -> EngineRegistry {
    let mut registry = EngineRegistry::empty();
    for id in ids {
        match *id {
            "none" => registry.register("none", || Box::new(NoCompressionEngine)),
            "first_last" => registry.register("first_last", || Box::new(FirstLastEngine)),
            "exploding" => registry.register("exploding", || Box::new(ExplodingEngine)),
            other => panic!("no test engine {other}"),
        }
    }
    registry
}

#[tokio::test]
async fn test_none_and_first_last() {
    let report = driver(4)
        .collect(&registry(&["none", "first_last"]), SAMPLE)
        .await;

    assert_eq!(report.len(), 2);

    let none = report.get("none").unwrap();
    assert_eq!(none.compression_ratio, 1.0);
    match &none.embedding_similarity_multi {
        SimilarityReport::PerModel(scores) => {
            let mini = scores.get("mini").unwrap();
            assert!((mini.similarity - 1.0).abs() < 1e-6);
            assert_eq!(mini.token_count, 8);
        }
        other => panic!("unexpected similarity shape: {other:?}"),
    }

    let first_last = report.get("first_last").unwrap();
    assert!(first_last.compression_ratio > 1.0);
    let expected = SAMPLE.chars().count() as f64 / "Apollo 11 in 1969.".chars().count() as f64;
    assert!((first_last.compression_ratio - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_baseline_ignores_budget() {
    let report = driver(2).collect(&registry(&["none"]), SAMPLE).await;
    assert_eq!(report.get("none").unwrap().compression_ratio, 1.0);
}

#[tokio::test]
async fn test_failing_engine_is_isolated() {
    let driver = driver(4);

    let healthy = driver.collect(&registry(&["none", "first_last"]), SAMPLE).await;
    let with_failure = driver
        .collect(&registry(&["none", "exploding", "first_last"]), SAMPLE)
        .await;

    assert_eq!(with_failure.len(), 2);
    assert!(with_failure.get("exploding").is_none());
    assert_eq!(healthy, with_failure);
}

#[tokio::test]
async fn test_pipeline_is_wired_with_stages() {
    let report = driver(4).collect(&EngineRegistry::new(), SAMPLE).await;

    let ids: Vec<&str> = report.engine_ids().collect();
    assert_eq!(ids, vec!["first_last", "none", "pipeline"]);
    assert_eq!(
        report.get("pipeline").unwrap().compression_ratio,
        report.get("first_last").unwrap().compression_ratio
    );
}

#[tokio::test]
async fn test_unknown_engine_cannot_be_instantiated() {
    let result = MetricsCollectionDriver::instantiate(&registry(&["none"]), "pipeline");
    assert!(matches!(result, Err(Error::UnknownEngine(_))));
}

#[tokio::test]
async fn test_legacy_similarity_shape() {
    let evaluator = LegacyMultiEvaluator::new(
        resolver(StubLoader::default()),
        scorer(MockEmbedder::default()),
        models(&["mini"]),
        8192,
    );
    let driver = MetricsCollectionDriver::new(SimilarityMetric::Legacy(evaluator), 4);
    assert_eq!(driver.models(), models(&["mini"]).as_slice());

    let report = driver.collect(&registry(&["none"]), SAMPLE).await;
    let json = serde_json::to_value(&report).unwrap();

    let similarity = &json["none"]["embedding_similarity_multi"];
    assert_eq!(similarity["token_count"], 16.0);
    assert!((similarity["mini"].as_f64().unwrap() - 1.0).abs() < 1e-6);
    assert!(similarity.get("semantic_similarity").is_some());
}

#[tokio::test]
async fn test_report_written_as_json() {
    let report = driver(4)
        .collect(&registry(&["none", "first_last"]), SAMPLE)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine_metrics.json");
    MetricsCollectionDriver::write_report(&report, &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["none"]["compression_ratio"], 1.0);
    assert!(json["first_last"]["embedding_similarity_multi"]["mini"]["similarity"].is_number());
    assert_eq!(
        json["first_last"]["embedding_similarity_multi"]["mini"]["token_count"],
        4
    );
}
