use serde::{Deserialize, Serialize};

/// Bump this value whenever the on-disk [`EmbeddingSet`] layout changes.
pub const CACHE_SCHEMA_VERSION: u16 = 1;

/// The durable embedding cache payload: one vector per catalog item, in
/// catalog order, as parallel `titles`/`vectors` arrays.
///
/// `model_name` and `catalog_fingerprint` stamp which model and which
/// snapshot produced the vectors; a set is only served when both, plus the
/// vector length, still match the live configuration, otherwise it is
/// rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingSet {
    /// Schema version for backward compatibility when deserializing.
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    /// Embedding model that produced the vectors.
    pub model_name: String,
    /// Content fingerprint of the catalog snapshot the vectors were built from.
    pub catalog_fingerprint: u64,
    /// Item titles, in catalog order.
    pub titles: Vec<String>,
    /// Item embedding vectors, parallel to `titles`.
    pub vectors: Vec<Vec<f32>>,
}

const fn default_schema_version() -> u16 {
    CACHE_SCHEMA_VERSION
}

impl EmbeddingSet {
    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// True when the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Whether this set can serve requests for the given model, catalog
    /// snapshot, and vector length. The model name is a free-form label, so
    /// the vector length is checked independently: a provider reconfigured to
    /// a different output size must invalidate the cache even when the name
    /// did not change. Also rejects sets whose parallel arrays have drifted
    /// apart.
    pub fn is_current(&self, model_name: &str, catalog_fingerprint: u64, dimension: usize) -> bool {
        self.schema_version == CACHE_SCHEMA_VERSION
            && self.model_name == model_name
            && self.catalog_fingerprint == catalog_fingerprint
            && self.titles.len() == self.vectors.len()
            && self.vectors.iter().all(|v| v.len() == dimension)
    }
}

/// One ranked result: a catalog item title and its cosine similarity to the
/// query, in [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub score: f32,
}
