//! mediarec recommendation engine: durable embedding cache + query ranker.
//!
//! This crate owns the one genuinely algorithmic path in the workspace.
//! Given a catalog snapshot and an embedding provider, it keeps a reusable
//! set of per-item vectors on disk (model inference is the expensive part,
//! so it runs once per snapshot, not once per request) and answers free-text
//! queries by cosine-ranking the cached vectors against the encoded query.
//!
//! The entry point is [`Recommender`], a service object constructed once at
//! startup and handed by reference to whatever layer fields user requests.
//! There is no global state; the embedding set is memoized per service
//! handle, and concurrent first requests perform exactly one build.
//!
//! Cache validity is explicit: the artifact records the schema version, the
//! model name, and a content fingerprint of the snapshot that built it, and
//! is rebuilt whenever any of them (or the vector length the provider is
//! configured for) stops matching. A cache that fails to
//! write is logged and ignored — the freshly built set still serves the
//! current process.
//!
//! ## Quick example
//!
//! ```no_run
//! use recommend::{Recommender, RecommendConfig};
//!
//! # async fn run() -> Result<(), recommend::RecommendError> {
//! let service = Recommender::new(RecommendConfig::default())?;
//! for line in service.recommend("mind-bending sci-fi dream heist").await? {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use catalog::{load_catalog, snapshot_fingerprint, CatalogItem};
use embedding::{embed, embed_batch};

mod cache;
mod config;
mod error;
mod ranker;
mod types;

pub use crate::cache::{read_cache, write_cache};
pub use crate::config::RecommendConfig;
pub use crate::error::{CacheError, RecommendError};
pub use crate::ranker::{cosine_similarity, rank};
pub use crate::types::{EmbeddingSet, Recommendation, CACHE_SCHEMA_VERSION};

/// Returned as the sole recommendation when no catalog item clears the
/// similarity threshold. The surrounding application displays this string
/// verbatim.
pub const FALLBACK_MESSAGE: &str = "I don't know. Consult the reception.";

/// Recommendation service: catalog + embedding cache + ranker behind one
/// injectable handle.
pub struct Recommender {
    cfg: RecommendConfig,
    set: OnceCell<Arc<EmbeddingSet>>,
}

impl Recommender {
    /// Construct a service from a validated configuration. No IO happens
    /// here; the catalog is read and the cache built or loaded lazily on
    /// first use.
    pub fn new(cfg: RecommendConfig) -> Result<Self, RecommendError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            set: OnceCell::new(),
        })
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &RecommendConfig {
        &self.cfg
    }

    /// Get the embedding set, building it on first use.
    ///
    /// The durable cache is accepted only when its schema version, model
    /// name, catalog fingerprint, and vector length all match the live
    /// configuration; anything else (including an unreadable or corrupt
    /// file) triggers a rebuild.
    /// Concurrent callers on one handle are serialized through the memoizing
    /// cell, so the provider is invoked at most once per process.
    pub async fn embedding_set(&self) -> Result<Arc<EmbeddingSet>, RecommendError> {
        self.set
            .get_or_try_init(|| async { self.load_or_build().await.map(Arc::new) })
            .await
            .cloned()
    }

    async fn load_or_build(&self) -> Result<EmbeddingSet, RecommendError> {
        let items = load_catalog(&self.cfg.catalog_path)?;
        let fingerprint = snapshot_fingerprint(&items);

        let dimension = self.cfg.embed.dimension;
        match read_cache(&self.cfg.cache_path) {
            Ok(Some(set))
                if set.is_current(&self.cfg.embed.model_name, fingerprint, dimension) =>
            {
                info!(
                    path = %self.cfg.cache_path.display(),
                    entries = set.len(),
                    "embedding_cache_loaded"
                );
                return Ok(set);
            }
            Ok(Some(set)) => {
                warn!(
                    path = %self.cfg.cache_path.display(),
                    cached_model = %set.model_name,
                    cached_fingerprint = set.catalog_fingerprint,
                    catalog_fingerprint = fingerprint,
                    cached_dimension = set.vectors.first().map_or(0, Vec::len),
                    expected_dimension = dimension,
                    "embedding_cache_stale"
                );
            }
            Ok(None) => {}
            Err(err) => {
                warn!(
                    path = %self.cfg.cache_path.display(),
                    error = %err,
                    "embedding_cache_unreadable"
                );
            }
        }

        self.build(&items, fingerprint).await
    }

    /// Encode every catalog item and persist the result best-effort. A
    /// persistence failure is logged and swallowed: the in-memory set is
    /// complete and must still serve the request that triggered the build.
    async fn build(
        &self,
        items: &[CatalogItem],
        fingerprint: u64,
    ) -> Result<EmbeddingSet, RecommendError> {
        let start = Instant::now();
        let texts: Vec<String> = items.iter().map(CatalogItem::embedding_text).collect();
        let vectors = embed_batch(&texts, &self.cfg.embed).await?;

        let set = EmbeddingSet {
            schema_version: CACHE_SCHEMA_VERSION,
            model_name: self.cfg.embed.model_name.clone(),
            catalog_fingerprint: fingerprint,
            titles: items.iter().map(|item| item.title.clone()).collect(),
            vectors,
        };

        info!(
            entries = set.len(),
            elapsed_millis = start.elapsed().as_millis(),
            "embedding_set_built"
        );

        if let Err(err) = write_cache(&self.cfg.cache_path, &set) {
            warn!(
                path = %self.cfg.cache_path.display(),
                error = %err,
                "embedding_cache_write_failed"
            );
        }

        Ok(set)
    }

    /// Rank the catalog against a free-text query. Returns at most `top_k`
    /// items, all scoring at least `threshold`, best first; may be empty.
    pub async fn rank(&self, query: &str) -> Result<Vec<Recommendation>, RecommendError> {
        if query.trim().is_empty() {
            return Err(RecommendError::EmptyQuery);
        }

        let set = self.embedding_set().await?;
        let query_vector = embed(query, &self.cfg.embed).await?;
        Ok(rank(&query_vector, &set, self.cfg.top_k, self.cfg.threshold))
    }

    /// Caller-facing entry point: ranked matches rendered as
    /// `"<title> (score: <two-decimal>)"` lines, or the single
    /// [`FALLBACK_MESSAGE`] when nothing clears the threshold.
    pub async fn recommend(&self, query: &str) -> Result<Vec<String>, RecommendError> {
        let hits = self.rank(query).await?;
        if hits.is_empty() {
            return Ok(vec![FALLBACK_MESSAGE.to_string()]);
        }

        Ok(hits
            .iter()
            .map(|hit| format!("{} (score: {:.2})", hit.title, hit.score))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn sample_items() -> Vec<CatalogItem> {
        vec![
            CatalogItem {
                title: "Inception".into(),
                creator: "Christopher Nolan".into(),
                genre: "Sci-Fi".into(),
                description: Some("A thief steals secrets through dream infiltration".into()),
            },
            CatalogItem {
                title: "The Matrix".into(),
                creator: "The Wachowskis".into(),
                genre: "Action".into(),
                description: Some("A hacker discovers reality is a simulation".into()),
            },
            CatalogItem {
                title: "Interstellar".into(),
                creator: "Christopher Nolan".into(),
                genre: "Sci-Fi".into(),
                description: Some("Astronauts cross a wormhole near a black hole".into()),
            },
            CatalogItem {
                title: "The Lion King".into(),
                creator: "Walt Disney Pictures".into(),
                genre: "Animation".into(),
                description: Some("A lion cub reclaims his father's throne".into()),
            },
        ]
    }

    fn write_snapshot(dir: &Path, items: &[CatalogItem]) -> std::path::PathBuf {
        let path = dir.join("catalog.json");
        fs::write(&path, serde_json::to_string(items).unwrap()).unwrap();
        path
    }

    fn service_in(dir: &Path) -> Recommender {
        let cfg = RecommendConfig {
            catalog_path: write_snapshot(dir, &sample_items()),
            cache_path: dir.join("media_embeddings.bin"),
            ..Default::default()
        };
        Recommender::new(cfg).unwrap()
    }

    #[tokio::test]
    async fn build_covers_every_item_in_catalog_order() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        let set = service.embedding_set().await.unwrap();
        let expected: Vec<String> = sample_items().iter().map(|i| i.title.clone()).collect();
        assert_eq!(set.titles, expected);
        assert_eq!(set.vectors.len(), expected.len());
        let dim = service.config().embed.dimension;
        assert!(set.vectors.iter().all(|v| v.len() == dim));
    }

    #[tokio::test]
    async fn first_use_persists_the_cache_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        assert!(!service.config().cache_path.exists());
        service.embedding_set().await.unwrap();
        assert!(service.config().cache_path.exists());
    }

    #[tokio::test]
    async fn self_similar_query_ranks_first_with_score_near_one() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        let query = sample_items()[2].embedding_text();
        let hits = service.rank(&query).await.unwrap();

        assert_eq!(hits[0].title, "Interstellar");
        assert!((hits[0].score - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn recommend_formats_scores_to_two_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        let query = sample_items()[0].embedding_text();
        let lines = service.recommend(&query).await.unwrap();

        assert_eq!(lines[0], "Inception (score: 1.00)");
    }

    #[tokio::test]
    async fn recommend_never_exceeds_top_k() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RecommendConfig {
            catalog_path: write_snapshot(dir.path(), &sample_items()),
            cache_path: dir.path().join("cache.bin"),
            threshold: -1.0,
            ..Default::default()
        };
        let service = Recommender::new(cfg).unwrap();

        let hits = service.rank("anything at all").await.unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn fallback_is_sole_element_when_nothing_clears_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RecommendConfig {
            catalog_path: write_snapshot(dir.path(), &sample_items()),
            cache_path: dir.path().join("cache.bin"),
            threshold: 1.0,
            ..Default::default()
        };
        let service = Recommender::new(cfg).unwrap();

        let lines = service
            .recommend("completely unrelated query text")
            .await
            .unwrap();
        assert_eq!(lines, vec![FALLBACK_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn returned_scores_respect_the_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        let query = sample_items()[1].embedding_text();
        let hits = service.rank(&query).await.unwrap();

        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.score >= service.config().threshold));
    }

    #[tokio::test]
    async fn empty_and_whitespace_queries_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        for query in ["", "   ", "\n\t"] {
            let err = service.recommend(query).await.unwrap_err();
            assert!(matches!(err, RecommendError::EmptyQuery));
        }
    }

    #[tokio::test]
    async fn repeated_queries_return_identical_results() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        let first = service.recommend("dream heist sci-fi").await.unwrap();
        let second = service.recommend("dream heist sci-fi").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unwritable_cache_still_serves_results() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"a file where a directory should be").unwrap();

        let cfg = RecommendConfig {
            catalog_path: write_snapshot(dir.path(), &sample_items()),
            cache_path: blocker.join("cache.bin"),
            ..Default::default()
        };
        let service = Recommender::new(cfg).unwrap();

        let query = sample_items()[0].embedding_text();
        let hits = service.rank(&query).await.unwrap();
        assert_eq!(hits[0].title, "Inception");
    }

    #[tokio::test]
    async fn missing_catalog_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RecommendConfig {
            catalog_path: dir.path().join("no_such_catalog.json"),
            cache_path: dir.path().join("cache.bin"),
            ..Default::default()
        };
        let service = Recommender::new(cfg).unwrap();

        let err = service.recommend("any query").await.unwrap_err();
        assert!(matches!(err, RecommendError::Catalog(_)));
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_at_construction() {
        let cfg = RecommendConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(matches!(
            Recommender::new(cfg),
            Err(RecommendError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_first_requests_build_once() {
        let dir = tempfile::tempdir().unwrap();
        let service = std::sync::Arc::new(service_in(dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.embedding_set().await.unwrap() })
            })
            .collect();

        let mut sets = Vec::new();
        for handle in handles {
            sets.push(handle.await.unwrap());
        }

        // All callers observe the same memoized set.
        for set in &sets[1..] {
            assert!(Arc::ptr_eq(&sets[0], set));
        }
    }
}
