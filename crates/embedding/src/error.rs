use thiserror::Error;

/// Errors surfaced by [`embed`](crate::embed) and [`embed_batch`](crate::embed_batch).
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Configuration is inconsistent (e.g., api mode without an api_url).
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),
    /// The provider could not be reached or refused the request. Failed
    /// calls are not retried.
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),
    /// The provider answered, but the body did not contain usable vectors.
    #[error("embedding response malformed: {0}")]
    Response(String),
    /// An empty input slice was passed to the batch entry point.
    #[error("no input texts to embed")]
    EmptyInput,
}
