use super::{cosine_similarity, Neighbor, Record};
use crate::error::{NewsError, Result};
use std::cmp::Ordering;

/// Rank `candidates` by cosine similarity to `query` and keep the best `k`.
///
/// The record whose id equals `exclude_id` is skipped. Equal scores keep
/// their input order. `k == 0` is rejected rather than silently replaced by
/// a default; callers that want a default pick it before calling.
pub fn top_k<'a, M>(
    query: &[f32],
    candidates: &'a [Record<M>],
    k: usize,
    exclude_id: Option<&str>,
) -> Result<Vec<Neighbor<'a, M>>> {
    if k == 0 {
        return Err(NewsError::invalid("k", "must be greater than zero"));
    }

    let mut results = candidates
        .iter()
        .filter(|record| exclude_id != Some(record.id.as_str()))
        .map(|record| {
            let similarity = cosine_similarity(query, &record.vector)?;
            Ok(Neighbor::scored(record, similarity))
        })
        .collect::<Result<Vec<_>>>()?;

    // Stable sort, descending
    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    results.truncate(k);

    Ok(results)
}

/// Find the `k` records most similar to the record with id `id`, excluding
/// that record itself.
pub fn similar_to<'a, M>(
    id: &str,
    candidates: &'a [Record<M>],
    k: usize,
) -> Result<(&'a Record<M>, Vec<Neighbor<'a, M>>)> {
    let reference = candidates
        .iter()
        .find(|record| record.id == id)
        .ok_or_else(|| NewsError::UnknownId(id.to_string()))?;

    let ranked = top_k(&reference.vector, candidates, k, Some(&reference.id))?;
    Ok((reference, ranked))
}
