use crate::config::Config;
use crate::embedding::EmbeddingClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Cloned per request; no cross-request mutable state.
#[derive(Clone)]
pub struct AppState {
    pub embeddings: EmbeddingClient,
    pub config: Config,
}
