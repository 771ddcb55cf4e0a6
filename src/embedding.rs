//! Embedding provider abstraction and implementations.
//!
//! Defines the [`EmbeddingProvider`] trait and two concrete providers:
//! - **[`DisabledProvider`]** — returns errors; the configured default, so
//!   chunk inspection works without credentials.
//! - **[`OpenAiProvider`]** — calls the OpenAI embeddings API with retry
//!   and backoff.
//!
//! Also provides [`cosine_similarity`], the metric the vector index ranks
//! with.
//!
//! # Contract
//!
//! `embed` returns one vector per input text, in input order, every vector
//! of the provider's fixed dimension. A batch fails atomically: either all
//! vectors are returned or an [`EmbeddingError`] is — partial sequences are
//! never produced. Vectors are not guaranteed bit-identical across provider
//! versions, so callers must not assume repeatability across upgrades.
//!
//! # Retry Strategy
//!
//! The OpenAI provider retries transient failures with exponential backoff:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors and timeouts → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::config::EmbeddingConfig;

/// Provider-side embedding failure. The whole batch call fails atomically.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding provider is disabled")]
    Disabled,
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("embedding request timed out after {0}s")]
    Timeout(u64),
    #[error("embedding provider error: {0}")]
    Provider(String),
    #[error("malformed embedding response: {0}")]
    InvalidResponse(String),
}

/// An external capability mapping a batch of texts to fixed-dimension
/// vectors.
///
/// Implementations are stateless collaborators: no per-call state, safe to
/// share across concurrent pipeline runs.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier (e.g. `"text-embedding-3-small"`).
    fn model_name(&self) -> &str;

    /// Returns the embedding vector dimensionality (e.g. `1536`).
    fn dims(&self) -> usize;

    /// Embed a batch of texts, one vector per input, in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Embed a single query text.
///
/// Convenience wrapper around [`EmbeddingProvider::embed`] for search-time
/// use.
pub async fn embed_query(
    provider: &dyn EmbeddingProvider,
    text: &str,
) -> Result<Vec<f32>, EmbeddingError> {
    let vectors = provider.embed(&[text.to_string()]).await?;
    vectors
        .into_iter()
        .next()
        .ok_or_else(|| EmbeddingError::InvalidResponse("empty embedding response".to_string()))
}

/// Create the appropriate [`EmbeddingProvider`] for the configuration.
pub fn create_provider(
    config: &EmbeddingConfig,
) -> Result<Box<dyn EmbeddingProvider>, EmbeddingError> {
    match config.provider.as_str() {
        "disabled" => Ok(Box::new(DisabledProvider)),
        "openai" => Ok(Box::new(OpenAiProvider::new(config)?)),
        other => Err(EmbeddingError::Provider(format!(
            "unknown embedding provider: {other}"
        ))),
    }
}

// ============ Disabled Provider ============

/// A no-op provider that always returns [`EmbeddingError::Disabled`].
pub struct DisabledProvider;

#[async_trait]
impl EmbeddingProvider for DisabledProvider {
    fn model_name(&self) -> &str {
        "disabled"
    }

    fn dims(&self) -> usize {
        0
    }

    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::Disabled)
    }
}

// ============ OpenAI Provider ============

/// Embedding provider backed by `POST /v1/embeddings`.
///
/// Requires the `OPENAI_API_KEY` environment variable. The request timeout
/// and retry count come from [`EmbeddingConfig`].
pub struct OpenAiProvider {
    model: String,
    dims: usize,
    max_retries: u32,
    timeout_secs: u64,
}

impl OpenAiProvider {
    /// Create a provider from configuration.
    ///
    /// # Errors
    ///
    /// Fails when `model` or `dims` is missing from the config, or when
    /// `OPENAI_API_KEY` is not in the environment.
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let model = config
            .model
            .clone()
            .ok_or_else(|| EmbeddingError::Provider("embedding.model required".to_string()))?;
        let dims = config
            .dims
            .ok_or_else(|| EmbeddingError::Provider("embedding.dims required".to_string()))?;

        if std::env::var("OPENAI_API_KEY").is_err() {
            return Err(EmbeddingError::MissingApiKey);
        }

        Ok(Self {
            model,
            dims,
            max_retries: config.max_retries,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn dims(&self) -> usize {
        self.dims
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| EmbeddingError::MissingApiKey)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::Provider(e.to_string()))?;

        let body = serde_json::json!({
            "model": self.model,
            "input": texts,
        });

        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                debug!(attempt, ?delay, "retrying embedding request");
                tokio::time::sleep(delay).await;
            }

            let resp = client
                .post("https://api.openai.com/v1/embeddings")
                .header("Authorization", format!("Bearer {api_key}"))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let json: serde_json::Value = response
                            .json()
                            .await
                            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;
                        let vectors = parse_embeddings_response(&json)?;
                        check_batch_shape(&vectors, texts.len(), self.dims)?;
                        return Ok(vectors);
                    }

                    // Rate limited or server error — retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        last_err = Some(EmbeddingError::Provider(format!(
                            "OpenAI API error {status}: {body_text}"
                        )));
                        continue;
                    }

                    // Client error (not 429) — don't retry
                    let body_text = response.text().await.unwrap_or_default();
                    return Err(EmbeddingError::Provider(format!(
                        "OpenAI API error {status}: {body_text}"
                    )));
                }
                Err(e) if e.is_timeout() => {
                    last_err = Some(EmbeddingError::Timeout(self.timeout_secs));
                    continue;
                }
                Err(e) => {
                    last_err = Some(EmbeddingError::Provider(e.to_string()));
                    continue;
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| EmbeddingError::Provider("embedding failed after retries".into())))
    }
}

/// Parse the embeddings API response, honoring the per-item `index` field
/// so the output order matches the input order.
fn parse_embeddings_response(json: &serde_json::Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let data = json
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| EmbeddingError::InvalidResponse("missing data array".to_string()))?;

    let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());

    for (position, item) in data.iter().enumerate() {
        let embedding = item
            .get("embedding")
            .and_then(|e| e.as_array())
            .ok_or_else(|| EmbeddingError::InvalidResponse("missing embedding".to_string()))?;

        let vec: Vec<f32> = embedding
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();

        let index = item
            .get("index")
            .and_then(|i| i.as_u64())
            .map(|i| i as usize)
            .unwrap_or(position);

        indexed.push((index, vec));
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, vec)| vec).collect())
}

/// Enforce the batch contract: one vector per input, all of the expected
/// dimension.
fn check_batch_shape(
    vectors: &[Vec<f32>],
    expected_count: usize,
    expected_dims: usize,
) -> Result<(), EmbeddingError> {
    if vectors.len() != expected_count {
        return Err(EmbeddingError::InvalidResponse(format!(
            "{} vectors returned for {} inputs",
            vectors.len(),
            expected_count
        )));
    }
    if let Some(bad) = vectors.iter().find(|v| v.len() != expected_dims) {
        return Err(EmbeddingError::InvalidResponse(format!(
            "vector of dimension {} where {} expected",
            bad.len(),
            expected_dims
        )));
    }
    Ok(())
}

// ============ Similarity ============

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`; `0.0` for empty, zero-magnitude, or
/// length-mismatched vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_empty_and_mismatched() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn cosine_zero_magnitude() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[tokio::test]
    async fn disabled_provider_always_errors() {
        let provider = DisabledProvider;
        let err = provider.embed(&["text".to_string()]).await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Disabled));
    }

    #[test]
    fn parse_honors_index_field() {
        let json = serde_json::json!({
            "data": [
                { "index": 1, "embedding": [2.0, 2.0] },
                { "index": 0, "embedding": [1.0, 1.0] },
            ]
        });
        let vectors = parse_embeddings_response(&json).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 1.0], vec![2.0, 2.0]]);
    }

    #[test]
    fn parse_rejects_missing_data() {
        let json = serde_json::json!({ "error": "nope" });
        assert!(matches!(
            parse_embeddings_response(&json),
            Err(EmbeddingError::InvalidResponse(_))
        ));
    }

    #[test]
    fn batch_shape_enforced() {
        let vectors = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert!(check_batch_shape(&vectors, 2, 2).is_ok());
        assert!(check_batch_shape(&vectors, 3, 2).is_err());
        assert!(check_batch_shape(&vectors, 2, 3).is_err());
    }
}
