use std::cmp::Ordering;

use crate::types::{EmbeddingSet, Recommendation};

/// Cosine similarity between two vectors: `dot(a, b) / (||a|| * ||b||)`.
/// A zero-norm vector on either side scores 0.0 instead of dividing by zero.
///
/// Both vectors must have the same length; scores over mixed-length vectors
/// are meaningless. The service path upholds this via the cache validity
/// check, which rejects cached sets whose vector length differs from the
/// configured provider dimension.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Score every cached item against the query vector, sort descending, drop
/// entries under `threshold`, and keep the first `top_k`.
///
/// The sort is stable, so equal scores keep the cache's item order.
pub fn rank(
    query: &[f32],
    set: &EmbeddingSet,
    top_k: usize,
    threshold: f32,
) -> Vec<Recommendation> {
    let mut hits: Vec<Recommendation> = set
        .titles
        .iter()
        .zip(set.vectors.iter())
        .map(|(title, vector)| Recommendation {
            title: title.clone(),
            score: cosine_similarity(query, vector),
        })
        .collect();

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.retain(|hit| hit.score >= threshold);
    hits.truncate(top_k);
    hits
}
