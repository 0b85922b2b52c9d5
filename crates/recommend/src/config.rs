use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use embedding::EmbedConfig;

use crate::error::RecommendError;

/// Configuration for a [`Recommender`](crate::Recommender) service.
///
/// Cheap to clone and serde-friendly so deployments can load it from a
/// config file. The embedded [`EmbedConfig`] is used for both the cache
/// build and query encoding, which keeps the two in the same vector space
/// by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendConfig {
    /// Path of the catalog snapshot (JSON item array).
    pub catalog_path: PathBuf,
    /// Path of the durable embedding cache artifact.
    pub cache_path: PathBuf,
    /// Maximum number of recommendations returned per query.
    #[serde(default = "RecommendConfig::default_top_k")]
    pub top_k: usize,
    /// Minimum cosine similarity for an item to count as a match.
    #[serde(default = "RecommendConfig::default_threshold")]
    pub threshold: f32,
    /// Embedding provider settings shared by cache build and query encoding.
    #[serde(default)]
    pub embed: EmbedConfig,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/catalog.json"),
            cache_path: PathBuf::from("data/media_embeddings.bin"),
            top_k: Self::default_top_k(),
            threshold: Self::default_threshold(),
            embed: EmbedConfig::default(),
        }
    }
}

impl RecommendConfig {
    pub(crate) fn default_top_k() -> usize {
        3
    }

    pub(crate) fn default_threshold() -> f32 {
        0.3
    }

    /// Validate the configuration before constructing a service from it.
    pub fn validate(&self) -> Result<(), RecommendError> {
        if self.top_k == 0 {
            return Err(RecommendError::InvalidConfig(
                "top_k must be greater than zero".into(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.threshold) {
            return Err(RecommendError::InvalidConfig(
                "threshold must lie in [-1.0, 1.0]".into(),
            ));
        }
        Ok(())
    }
}
