// Similarity ranker - top-K trip ids by cosine similarity
//
// Both the query vector and the stored vectors are unit-norm, so the dot
// product IS the cosine similarity, in [-1, 1]. The sort is stable: equal
// scores keep original storage order (first-inserted wins), which downstream
// aggregation relies on for reproducible top-K membership.

use crate::snapshot::EmbeddingSnapshot;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankError {
    #[error("query vector dimension {actual} does not match snapshot dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Score every stored vector against the query and return the first `k`
/// trip ids by descending similarity. Returns everything when the snapshot
/// holds fewer than `k` entries. Duplicate trip ids come back verbatim -
/// one row per stored vector, no dedup at this stage.
pub fn top_k(
    query: &[f32],
    snapshot: &EmbeddingSnapshot,
    k: usize,
) -> Result<Vec<String>, RankError> {
    if snapshot.is_empty() {
        return Ok(Vec::new());
    }

    // never truncate or pad a mismatched query - that is a data integrity bug
    if query.len() != snapshot.dimension {
        return Err(RankError::DimensionMismatch {
            expected: snapshot.dimension,
            actual: query.len(),
        });
    }

    let mut scored: Vec<(usize, f32)> = snapshot
        .vectors
        .iter()
        .enumerate()
        .map(|(i, v)| (i, dot(query, v)))
        .collect();

    // stable sort descending - ties keep storage index order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    Ok(scored
        .into_iter()
        .take(k)
        .map(|(i, _)| snapshot.trip_ids[i].clone())
        .collect())
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
