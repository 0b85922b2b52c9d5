use std::io;
use thiserror::Error;

/// Errors surfaced while reading a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The snapshot file could not be read.
    #[error("catalog snapshot unreadable: {0}")]
    Io(#[from] io::Error),
    /// The snapshot was read but is not a valid JSON item array.
    #[error("catalog snapshot malformed: {0}")]
    Parse(#[from] serde_json::Error),
    /// The snapshot parsed cleanly but contains zero items.
    #[error("catalog snapshot is empty")]
    Empty,
}
