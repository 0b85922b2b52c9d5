use std::io;
use thiserror::Error;

use catalog::CatalogError;
use embedding::EmbedError;

/// Errors from reading or writing the durable embedding cache artifact.
///
/// In the request path these are demoted to warnings: an unreadable cache
/// triggers a rebuild and an unwritable cache still serves the in-memory
/// set. They only surface to callers of the explicit cache functions.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache file could not be read or written.
    #[error("cache io failure: {0}")]
    Io(#[from] io::Error),
    /// The embedding set could not be encoded for persistence.
    #[error("cache encode failure: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    /// The cache file exists but does not decode as an embedding set.
    #[error("cache decode failure: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Errors surfaced by the [`Recommender`](crate::Recommender) service.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The catalog snapshot could not be read; fatal to the request.
    #[error("catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),
    /// The embedding provider failed; fatal to the request.
    #[error("embedding provider failed: {0}")]
    Embedding(#[from] EmbedError),
    /// Cache read/write failure, surfaced only from explicit cache APIs.
    #[error("embedding cache failure: {0}")]
    Cache(#[from] CacheError),
    /// Service configuration is inconsistent.
    #[error("invalid recommender config: {0}")]
    InvalidConfig(String),
    /// The query was empty or whitespace-only. Callers may equally skip the
    /// call for empty input instead of relying on this guard.
    #[error("query must not be empty")]
    EmptyQuery,
}
