pub mod cluster;
pub mod provider;
pub mod search;
pub mod store;

use crate::error::{NewsError, Result};

pub use cluster::{find_clusters, Cluster, DenseClusterFinder};
pub use provider::EmbeddingProvider;
pub use search::{similar_to, top_k};
pub use store::{NewsMetadata, RecordCache};

/// An embedded item: opaque id, embedding vector and a payload the
/// similarity code never looks at.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record<M> {
    pub id: String,
    pub vector: Vec<f32>,
    pub metadata: M,
}

impl<M> Record<M> {
    pub fn new(id: impl Into<String>, vector: Vec<f32>, metadata: M) -> Self {
        Self {
            id: id.into(),
            vector,
            metadata,
        }
    }
}

/// A record scored against a query or cluster seed.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Neighbor<'a, M> {
    pub record: &'a Record<M>,
    pub similarity: f32,
    pub distance: f32,
}

impl<'a, M> Neighbor<'a, M> {
    fn scored(record: &'a Record<M>, similarity: f32) -> Self {
        Self {
            record,
            similarity,
            distance: 1.0 - similarity,
        }
    }
}

/// Cosine similarity between two vectors of equal, non-zero length.
///
/// NaN or infinite components are rejected with `InvalidParameter`.
///
/// Sums are accumulated in f64. When either vector has zero norm the
/// denominator is replaced by `f64::EPSILON`, so a zero vector scores 0
/// against everything instead of producing NaN. That is a guard against
/// degenerate input, not a meaningful similarity.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() || a.is_empty() {
        return Err(NewsError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut magnitude_a = 0.0f64;
    let mut magnitude_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        magnitude_a += x * x;
        magnitude_b += y * y;
    }

    // f32 squares always fit in f64, so a non-finite sum means a non-finite input
    if !magnitude_a.is_finite() || !magnitude_b.is_finite() {
        return Err(non_finite());
    }

    let mut denominator = magnitude_a.sqrt() * magnitude_b.sqrt();
    if denominator == 0.0 {
        denominator = f64::EPSILON;
    }

    Ok((dot / denominator) as f32)
}

/// `1 - cosine_similarity`. Not a true metric: rounding can push it a hair
/// below zero for near-identical vectors.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f32> {
    Ok(1.0 - cosine_similarity(a, b)?)
}

pub fn is_finite_vector(v: &[f32]) -> bool {
    v.iter().all(|x| x.is_finite())
}

fn non_finite() -> NewsError {
    NewsError::invalid("vector", "contains NaN or infinite components")
}

/// Fail fast if the records do not all share one non-zero dimension, or if
/// any vector holds a non-finite component.
pub fn ensure_uniform_dimension<M>(records: &[Record<M>]) -> Result<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    let dim = first.vector.len();
    if dim == 0 {
        return Err(NewsError::DimensionMismatch { left: 0, right: 0 });
    }
    if let Some(odd) = records.iter().find(|r| r.vector.len() != dim) {
        return Err(NewsError::DimensionMismatch {
            left: dim,
            right: odd.vector.len(),
        });
    }
    if records.iter().any(|r| !is_finite_vector(&r.vector)) {
        return Err(non_finite());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_identical_vectors_score_one() {
        let a = [0.3, -1.2, 4.0, 0.5];
        let sim = cosine_similarity(&a, &a).unwrap();
        assert!((sim - 1.0).abs() < EPS, "got {}", sim);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < EPS);
        let dist = cosine_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!((dist - 1.0).abs() < EPS);
    }

    #[test]
    fn test_opposite_vectors_score_minus_one() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((sim + 1.0).abs() < EPS);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = [0.9, 0.1, 0.4];
        let b = [0.2, 0.7, 0.3];
        assert_eq!(
            cosine_similarity(&a, &b).unwrap(),
            cosine_similarity(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_zero_vector_scores_zero_not_nan() {
        let sim = cosine_similarity(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(sim, 0.0);
        let sim = cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let err = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            NewsError::DimensionMismatch { left: 2, right: 3 }
        ));
    }

    #[test]
    fn test_empty_vectors_are_an_error() {
        let err = cosine_similarity(&[], &[]).unwrap_err();
        assert!(matches!(err, NewsError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_non_finite_components_are_rejected() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = cosine_similarity(&[bad, 0.0], &[1.0, 0.0]).unwrap_err();
            assert!(matches!(
                err,
                NewsError::InvalidParameter { name: "vector", .. }
            ));
            let err = cosine_similarity(&[1.0, 0.0], &[0.5, bad]).unwrap_err();
            assert!(matches!(err, NewsError::InvalidParameter { .. }));
        }
        // Largest finite f32 still scores normally
        let sim = cosine_similarity(&[f32::MAX, 0.0], &[f32::MAX, 0.0]).unwrap();
        assert!((sim - 1.0).abs() < EPS);
    }

    #[test]
    fn test_uniform_dimension_rejects_non_finite() {
        let records = vec![
            Record::new("a", vec![1.0, 0.0], ()),
            Record::new("b", vec![f32::INFINITY, 0.0], ()),
        ];
        assert!(matches!(
            ensure_uniform_dimension(&records),
            Err(NewsError::InvalidParameter { name: "vector", .. })
        ));
    }

    #[test]
    fn test_uniform_dimension_check() {
        let ok = vec![
            Record::new("a", vec![1.0, 0.0], ()),
            Record::new("b", vec![0.0, 1.0], ()),
        ];
        assert!(ensure_uniform_dimension(&ok).is_ok());
        assert!(ensure_uniform_dimension::<()>(&[]).is_ok());

        let bad = vec![
            Record::new("a", vec![1.0, 0.0], ()),
            Record::new("b", vec![0.0, 1.0, 0.0], ()),
        ];
        assert!(matches!(
            ensure_uniform_dimension(&bad),
            Err(NewsError::DimensionMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn test_neighbor_distance_is_complement() {
        let record = Record::new("x", vec![1.0], ());
        let n = Neighbor::scored(&record, 0.75);
        assert!((n.distance - 0.25).abs() < EPS);
    }
}
