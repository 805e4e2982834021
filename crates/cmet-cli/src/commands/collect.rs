use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cmet_config::Config;
use cmet_core::ModelSpec;
use cmet_embed::{EmbedOptions, Embedder, HttpEmbedder, MockEmbedder, SimilarityScorer};
use cmet_engines::EngineRegistry;
use cmet_eval::{
    LegacyMultiEvaluator, MetricKind, MetricsCollectionDriver, MultiModelEvaluator,
    SimilarityMetric,
};
use cmet_tokens::resolver::default_loader;
use cmet_tokens::{CachingTokenizerLoader, TokenizerLoader, TokenizerResolver, WhitespaceTokenizerLoader};
use tracing::{info, warn};

use crate::cli::CollectArgs;

const SAMPLE_TEXT: &str = include_str!("../sample/moon_landing.txt");

pub async fn handle(args: CollectArgs, config: &Config) -> Result<()> {
    let models: Vec<ModelSpec> = if args.models.is_empty() {
        config.models.iter().map(|m| ModelSpec::from(m.as_str())).collect()
    } else {
        args.models.into_iter().map(ModelSpec::from).collect()
    };

    let sample = match &args.sample {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sample text {}", path.display()))?,
        None => SAMPLE_TEXT.to_string(),
    };

    let (loader, embedder): (Arc<dyn TokenizerLoader>, Arc<dyn Embedder>) = if args.use_mock {
        info!("Using mock embeddings and whitespace tokenizers");
        (
            Arc::new(WhitespaceTokenizerLoader::new(None)),
            Arc::new(MockEmbedder::new(config.embedding.mock_dimension)),
        )
    } else {
        let loader: Arc<dyn TokenizerLoader> = Arc::new(CachingTokenizerLoader::new(Arc::new(
            default_loader(
                config.tokenizers.cache_dir.clone(),
                config.tokenizers.local_dir.clone(),
            ),
        )));
        prefetch(loader.as_ref(), &models).await;
        (
            loader,
            Arc::new(HttpEmbedder::new(
                config.embedding.endpoint.clone(),
                config.api_key(),
            )),
        )
    };

    let resolver = Arc::new(TokenizerResolver::new(loader));
    let scorer = Arc::new(SimilarityScorer::new(embedder).with_options(EmbedOptions {
        batch_size: config.embedding.batch_size,
    }));

    let metric = if args.legacy {
        MetricKind::EmbeddingSimilarityMulti
    } else {
        MetricKind::from_id(&config.similarity_metric)?
    };
    let similarity = similarity_metric(
        metric,
        resolver,
        scorer,
        models,
        config.legacy.max_tokens,
    )?;

    let budget = args.tokens.unwrap_or(config.budget_tokens);
    let driver = MetricsCollectionDriver::new(similarity, budget);
    let report = driver.collect(&EngineRegistry::new(), &sample).await;

    MetricsCollectionDriver::write_report(&report, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "✓ Wrote metrics for {} engines to {}",
        report.len(),
        args.output.display()
    );

    Ok(())
}

fn similarity_metric(
    metric: MetricKind,
    resolver: Arc<TokenizerResolver>,
    scorer: Arc<SimilarityScorer>,
    models: Vec<ModelSpec>,
    legacy_max_tokens: usize,
) -> Result<SimilarityMetric> {
    match metric {
        MetricKind::MultiModelEmbeddingSimilarity => Ok(SimilarityMetric::per_model(
            MultiModelEvaluator::new(resolver, scorer),
            models,
        )),
        MetricKind::EmbeddingSimilarityMulti => Ok(SimilarityMetric::Legacy(
            LegacyMultiEvaluator::new(resolver, scorer, models, legacy_max_tokens),
        )),
        other => bail!("{} is not a multi-model similarity metric", other),
    }
}

/// Download tokenizers up front; failures only warn
async fn prefetch(loader: &dyn TokenizerLoader, models: &[ModelSpec]) {
    for model in models.iter().filter(|m| !m.is_remote()) {
        if let Err(e) = loader.load(model.as_str()).await {
            warn!("Unable to download {}: {}", model, e);
        }
    }
}
