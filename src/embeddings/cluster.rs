//! Dense-neighborhood clustering.
//!
//! A single greedy pass over the candidates, in input order: the first
//! unassigned record with at least `min_neighbors` unassigned records within
//! `max_distance` becomes a seed and claims all of them. Claimed records are
//! never considered again, neither as seeds nor as neighbors. Because of
//! this the result depends on input order, and a record visited early can
//! take points that would have formed a larger cluster around a later seed.
//! The same input order always yields the same clusters.

use super::{cosine_similarity, ensure_uniform_dimension, Neighbor, Record};
use crate::error::{NewsError, Result};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Instant;

/// A seed record plus every record it claimed, closest first.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Cluster<'a, M> {
    pub seed: &'a Record<M>,
    pub neighbors: Vec<Neighbor<'a, M>>,
    pub count: usize,
}

impl<'a, M> Cluster<'a, M> {
    /// Seed first, then neighbors in distance order.
    pub fn members(&self) -> impl Iterator<Item = &'a Record<M>> + '_ {
        std::iter::once(self.seed).chain(self.neighbors.iter().map(|n| n.record))
    }
}

#[derive(Debug, Clone)]
pub struct DenseClusterFinder {
    max_distance: f32,
    min_neighbors: usize,
    deadline: Option<Instant>,
}

impl DenseClusterFinder {
    pub fn new(max_distance: f32, min_neighbors: usize) -> Result<Self> {
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(NewsError::invalid(
                "max_distance",
                format!("must be a finite number > 0, got {}", max_distance),
            ));
        }
        if min_neighbors == 0 {
            return Err(NewsError::invalid(
                "min_neighbors",
                "must be greater than zero",
            ));
        }
        Ok(Self {
            max_distance,
            min_neighbors,
            deadline: None,
        })
    }

    /// Abort with `DeadlineExceeded` if a seed is still being considered
    /// after `deadline`. Checked between seeds only.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn min_neighbors(&self) -> usize {
        self.min_neighbors
    }

    pub fn find<'a, M: Sync>(&self, candidates: &'a [Record<M>]) -> Result<Vec<Cluster<'a, M>>> {
        ensure_uniform_dimension(candidates)?;

        let mut assigned: HashSet<&'a str> = HashSet::new();
        let mut clusters = Vec::new();

        for (i, seed) in candidates.iter().enumerate() {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    return Err(NewsError::DeadlineExceeded(i));
                }
            }
            if assigned.contains(seed.id.as_str()) {
                continue;
            }

            let mut neighbors = self.scan(i, seed, candidates, &assigned)?;
            if neighbors.len() < self.min_neighbors {
                continue;
            }

            neighbors.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));

            assigned.insert(seed.id.as_str());
            assigned.extend(neighbors.iter().map(|n| n.record.id.as_str()));

            clusters.push(Cluster {
                seed,
                count: neighbors.len(),
                neighbors,
            });
        }

        // Stable: equal counts keep emission order
        clusters.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(clusters)
    }

    /// Unassigned records within `max_distance` of the seed at `seed_index`,
    /// in input order.
    fn scan<'a, M: Sync>(
        &self,
        seed_index: usize,
        seed: &'a Record<M>,
        candidates: &'a [Record<M>],
        assigned: &HashSet<&'a str>,
    ) -> Result<Vec<Neighbor<'a, M>>> {
        let scored = candidates
            .par_iter()
            .enumerate()
            .filter(|(j, candidate)| *j != seed_index && !assigned.contains(candidate.id.as_str()))
            .map(|(_, candidate)| {
                let similarity = cosine_similarity(&seed.vector, &candidate.vector)?;
                Ok(Neighbor::scored(candidate, similarity))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(scored
            .into_iter()
            .filter(|n| n.distance <= self.max_distance)
            .collect())
    }
}

/// Convenience wrapper: validate parameters and cluster in one call.
pub fn find_clusters<M: Sync>(
    candidates: &[Record<M>],
    max_distance: f32,
    min_neighbors: usize,
) -> Result<Vec<Cluster<'_, M>>> {
    DenseClusterFinder::new(max_distance, min_neighbors)?.find(candidates)
}
