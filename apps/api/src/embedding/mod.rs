/// Embedding Client — the single point of entry for all OpenAI embedding calls.
///
/// ARCHITECTURAL RULE: No other module may call the embeddings API directly.
/// All embedding interactions MUST go through this module.
///
/// Model: text-embedding-3-small (hardcoded — scores are only comparable
/// within one model, so making it configurable would silently break them)
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
/// The embedding model used for all similarity scoring.
pub const MODEL: &str = "text-embedding-3-small";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("API response contained no embedding")]
    EmptyEmbedding,
}

impl EmbeddingError {
    /// True when the upstream refused the call for rate-limiting reasons,
    /// i.e. the caller may succeed by retrying later.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            EmbeddingError::RateLimited { .. } | EmbeddingError::Api { status: 429, .. }
        )
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: [&'a str; 1],
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The single embedding client shared by all request handlers.
/// Wraps the OpenAI embeddings API with a bounded timeout and retry logic.
#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    api_key: String,
}

impl EmbeddingClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Embeds one text and returns the model's vector.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    ///
    /// Callers must not pass an empty string; the handler rejects documents
    /// with no extractable text before reaching this client.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request_body = EmbeddingRequest {
            input: [text],
            model: MODEL,
        };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(OPENAI_EMBEDDINGS_URL)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse the structured error message
                let message = serde_json::from_str::<OpenAiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: EmbeddingResponse = response.json().await?;
            let vector = parsed
                .data
                .into_iter()
                .next()
                .map(|d| d.embedding)
                .ok_or(EmbeddingError::EmptyEmbedding)?;

            if vector.is_empty() {
                return Err(EmbeddingError::EmptyEmbedding);
            }

            debug!("Embedding call succeeded: dimension={}", vector.len());

            return Ok(vector);
        }

        Err(last_error.unwrap_or(EmbeddingError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}
