//! Workspace umbrella crate for the mediarec recommendation engine.
//!
//! This crate stitches together the catalog snapshot loader, the embedding
//! provider boundary, and the cache-plus-ranker service so callers can
//! depend on `mediarec` alone. The surrounding web application constructs
//! one [`Recommender`] at startup and calls [`Recommender::recommend`] per
//! user query; everything else here is plumbing for that path.

pub use catalog::{load_catalog, snapshot_fingerprint, CatalogError, CatalogItem};
pub use embedding::{embed, embed_batch, EmbedConfig, EmbedError};
pub use recommend::{
    cosine_similarity, rank, read_cache, write_cache, CacheError, EmbeddingSet, RecommendConfig,
    RecommendError, Recommendation, Recommender, CACHE_SCHEMA_VERSION, FALLBACK_MESSAGE,
};

/// One-shot convenience wrapper: build a transient [`Recommender`] from
/// `cfg` and answer a single query.
///
/// Long-lived callers should construct the service once and reuse it — the
/// memoized embedding set lives on the service handle, so a transient
/// service re-reads the cache artifact on every call.
pub async fn recommend_media(
    query: &str,
    cfg: RecommendConfig,
) -> Result<Vec<String>, RecommendError> {
    Recommender::new(cfg)?.recommend(query).await
}
