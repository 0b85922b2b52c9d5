use std::fs;
use std::path::Path;

use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};

use crate::error::CacheError;
use crate::types::EmbeddingSet;

/// Read the durable embedding set from `path`, whole.
///
/// Returns `Ok(None)` when no cache file exists. Decode failures (truncated
/// file, foreign format) surface as errors; the service layer treats them as
/// an absent cache and rebuilds.
pub fn read_cache(path: impl AsRef<Path>) -> Result<Option<EmbeddingSet>, CacheError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path)?;
    let (set, _) = decode_from_slice::<EmbeddingSet, _>(&bytes, standard())?;
    Ok(Some(set))
}

/// Persist the embedding set to `path`, whole, creating parent directories
/// as needed. Last writer wins when separate processes race on a cold start.
pub fn write_cache(path: impl AsRef<Path>, set: &EmbeddingSet) -> Result<(), CacheError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let bytes = encode_to_vec(set, standard())?;
    fs::write(path, bytes)?;
    Ok(())
}
