use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::Stream;

/// Lazy, single-consumer sequence of reply fragments.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send>>;

#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Opens a reply stream for `prompt`. Fragments are non-empty and their
    /// concatenation is the full reply. An `Err` item ends the request.
    async fn generate(&self, prompt: &str) -> Result<FragmentStream, GenerationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("request timed out")]
    Timeout,
}
