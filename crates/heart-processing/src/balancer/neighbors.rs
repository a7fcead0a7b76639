//! Nearest-neighbor search over in-memory feature rows.
//!
//! The balancer only ever asks for neighbors within one class, so the index
//! is built per class over a dense row matrix. Ordering is fully
//! deterministic: ties in distance are broken by row index.

/// Precomputed k-nearest-neighbor lists for a fixed set of rows.
pub struct NeighborIndex {
    neighbors: Vec<Vec<usize>>,
}

impl NeighborIndex {
    /// Build neighbor lists for every row, nearest first, self excluded,
    /// truncated to `k` entries.
    ///
    /// `k` must be at most `rows.len() - 1`; the caller caps it.
    pub fn build(rows: &[Vec<f64>], k: usize) -> Self {
        let neighbors = (0..rows.len())
            .map(|row_idx| {
                let mut distances: Vec<(usize, f64)> = rows
                    .iter()
                    .enumerate()
                    .filter(|(other_idx, _)| *other_idx != row_idx)
                    .map(|(other_idx, other)| (other_idx, euclidean(&rows[row_idx], other)))
                    .collect();

                distances.sort_by(|a, b| {
                    a.1.partial_cmp(&b.1)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.0.cmp(&b.0))
                });

                distances.into_iter().take(k).map(|(idx, _)| idx).collect()
            })
            .collect();

        Self { neighbors }
    }

    /// Nearest neighbors of `row`, nearest first.
    pub fn of(&self, row: usize) -> &[usize] {
        &self.neighbors[row]
    }
}

/// Euclidean distance between two rows of equal arity.
fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum::<f64>()
        .sqrt()
}
