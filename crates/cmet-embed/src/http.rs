//! OpenAI-compatible `/embeddings` client

use async_trait::async_trait;
use cmet_core::{Error, ModelSpec, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{EmbedOptions, Embedder, normalize};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

/// Embedder calling an OpenAI-compatible embeddings endpoint
///
/// Works against OpenAI itself or a local server (text-embeddings-inference,
/// Ollama, ...) hosting sentence-transformers models. The `openai/` namespace
/// is stripped from model ids before sending.
pub struct HttpEmbedder {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpEmbedder {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn url(&self) -> String {
        format!("{}/embeddings", self.endpoint)
    }

    async fn embed_batch(&self, batch: &[&str], model: &ModelSpec) -> Result<Vec<Vec<f32>>> {
        let model_name = model.remote_model().unwrap_or(model.as_str());
        let fail = |reason: String| Error::embedding_failure(model.as_str(), reason);

        let mut request = self.client.post(self.url()).json(&EmbeddingRequest {
            model: model_name,
            input: batch,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| fail(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fail(format!("HTTP {}: {}", status, body)));
        }

        let mut parsed: EmbeddingResponse =
            response.json().await.map_err(|e| fail(e.to_string()))?;
        if parsed.data.len() != batch.len() {
            return Err(fail(format!(
                "expected {} embeddings, got {}",
                batch.len(),
                parsed.data.len()
            )));
        }

        parsed.data.sort_by_key(|d| d.index);
        if let Some((position, data)) = parsed
            .data
            .iter()
            .enumerate()
            .find(|(position, d)| d.index != *position)
        {
            return Err(fail(format!(
                "embedding indices must be 0..{}, found {} at position {}",
                batch.len(),
                data.index,
                position
            )));
        }

        Ok(parsed
            .data
            .into_iter()
            .map(|d| {
                let mut vector = d.embedding;
                normalize(&mut vector);
                vector
            })
            .collect())
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn embed(
        &self,
        texts: &[&str],
        model: &ModelSpec,
        options: &EmbedOptions,
    ) -> Result<Vec<Vec<f32>>> {
        let batch_size = options.batch_size.filter(|&n| n > 0).unwrap_or(texts.len().max(1));
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(batch_size) {
            debug!("Embedding {} texts with {} via {}", batch.len(), model, self.endpoint);
            vectors.extend(self.embed_batch(batch, model).await?);
        }

        Ok(vectors)
    }
}
