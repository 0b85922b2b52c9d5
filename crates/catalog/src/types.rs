use serde::{Deserialize, Serialize};

/// One media record from the catalog snapshot.
///
/// The title doubles as the unique identifier: the snapshot source keys its
/// records by title and the recommendation layer reports matches by title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Unique title of the media item.
    pub title: String,
    /// Author, director, studio, or other creator credit.
    pub creator: String,
    /// Primary genre label.
    pub genre: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogItem {
    /// The text handed to the embedding model for this item: title, creator,
    /// genre, and description joined by single spaces. A missing description
    /// contributes an empty string, so `"A B C"` becomes `"A B C "`.
    ///
    /// Query-side encoding must use the same rule when reproducing an item's
    /// full descriptive text; the trailing space for description-less items
    /// is part of the contract.
    pub fn embedding_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.creator,
            self.genre,
            self.description.as_deref().unwrap_or("")
        )
    }
}
