//! Catalog snapshot loading for the mediarec pipeline.
//!
//! This is where catalog data enters the system. A snapshot is a JSON array
//! of media records (title, creator, genre, optional description) read whole
//! from disk; downstream stages treat the returned item list as immutable
//! for the duration of a ranking operation.
//!
//! Besides parsing, this crate owns two contracts the rest of the workspace
//! leans on:
//!
//! - [`CatalogItem::embedding_text`] — the exact text concatenation the
//!   embedding model sees per item.
//! - [`snapshot_fingerprint`] — a stable content hash over those texts, in
//!   order. The embedding cache stamps itself with this value so a changed
//!   snapshot invalidates the cache instead of silently serving stale
//!   vectors.

use std::fs;
use std::hash::Hasher;
use std::path::Path;
use std::time::Instant;

use fxhash::FxHasher64;
use tracing::{info, warn};

mod error;
mod types;

pub use crate::error::CatalogError;
pub use crate::types::CatalogItem;

/// Read and parse a catalog snapshot from `path`.
///
/// The file is read whole; there is no streaming or partial access. An empty
/// item array is rejected so the embedding cache never persists a zero-entry
/// set.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<CatalogItem>, CatalogError> {
    let path = path.as_ref();
    let start = Instant::now();

    let result = fs::read_to_string(path)
        .map_err(CatalogError::from)
        .and_then(|raw| serde_json::from_str::<Vec<CatalogItem>>(&raw).map_err(CatalogError::from))
        .and_then(|items| {
            if items.is_empty() {
                Err(CatalogError::Empty)
            } else {
                Ok(items)
            }
        });

    let elapsed_micros = start.elapsed().as_micros();
    match &result {
        Ok(items) => {
            info!(
                path = %path.display(),
                items = items.len(),
                elapsed_micros,
                "catalog_loaded"
            );
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, elapsed_micros, "catalog_load_failed");
        }
    }

    result
}

/// Stable content hash over every item's embedding text, in snapshot order.
///
/// Two snapshots fingerprint equal exactly when they would produce the same
/// embedding inputs in the same order; reordering, editing, adding, or
/// removing items all change the value. Item boundaries are hashed
/// explicitly so `["ab", "c"]` and `["a", "bc"]` stay distinct.
pub fn snapshot_fingerprint(items: &[CatalogItem]) -> u64 {
    let mut hasher = FxHasher64::default();
    for item in items {
        let text = item.embedding_text();
        hasher.write_usize(text.len());
        hasher.write(text.as_bytes());
    }
    hasher.finish()
}
