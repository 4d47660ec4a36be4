// --- File: attraction.rs ---
// --- Cross-species attraction ---

use crate::error::{PhysarumError, Result};
use crate::grid::PheromoneGrid;
use rand::Rng;

/// Square matrix of weights; row `i` says how strongly species `i` senses each
/// species' trail. Negative weights repel, weights above 1 amplify.
#[derive(Debug, Clone, PartialEq)]
pub struct AttractionMatrix {
    size: usize,
    weights: Vec<f32>, // row-major, size * size
}

impl AttractionMatrix {
    /// Every species senses only its own trail.
    pub fn identity(size: usize) -> Self {
        let mut weights = vec![0.0; size * size];
        for i in 0..size {
            weights[i * size + i] = 1.0;
        }
        Self { size, weights }
    }

    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let size = rows.len();
        let mut weights = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(PhysarumError::RaggedAttraction {
                    row,
                    expected: size,
                    actual: values.len(),
                });
            }
            weights.extend(values);
        }
        Ok(Self { size, weights })
    }

    /// Self-attraction of 1 on the diagonal, uniform [-1, 1) elsewhere.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut weights = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                weights.push(if i == j { 1.0 } else { rng.gen_range(-1.0..1.0) });
            }
        }
        Self { size, weights }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.weights[i * self.size + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.weights[i * self.size..(i + 1) * self.size]
    }

    /// Fills `out` with `sum_j self[species][j] * grids[j].data`.
    pub fn combine_into(&self, species: usize, grids: &[PheromoneGrid], out: &mut [f32]) {
        out.fill(0.0);
        for (&factor, other) in self.row(species).iter().zip(grids) {
            if factor == 0.0 {
                continue;
            }
            for (o, &v) in out.iter_mut().zip(other.data()) {
                *o += v * factor;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = AttractionMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.5]]).unwrap_err();
        assert_eq!(
            err,
            PhysarumError::RaggedAttraction {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rows_and_entries_are_row_major() {
        let m = AttractionMatrix::from_rows(vec![vec![1.0, -0.5], vec![2.0, 1.0]]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(0, 1), -0.5);
        assert_eq!(m.row(1), &[2.0f32, 1.0]);
        assert_eq!(AttractionMatrix::identity(2).row(1), &[0.0f32, 1.0]);
    }

    #[test]
    fn random_matrix_keeps_unit_diagonal() {
        let mut rng = StdRng::seed_from_u64(4);
        let m = AttractionMatrix::random(4, &mut rng);
        for i in 0..4 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..4 {
                assert!((-1.0..=1.0).contains(&m.get(i, j)));
            }
        }
    }

    #[test]
    fn combine_weights_every_species() {
        let mut a = PheromoneGrid::new(2, 1);
        let mut b = PheromoneGrid::new(2, 1);
        a.deposit(0.0, 0.0, 2.0);
        b.deposit(0.0, 0.0, 1.0);
        b.deposit(1.0, 0.0, 4.0);
        let grids = vec![a, b];
        let m = AttractionMatrix::from_rows(vec![vec![1.0, -1.0], vec![0.5, 2.0]]).unwrap();

        let mut out = vec![99.0; 2];
        m.combine_into(0, &grids, &mut out);
        assert_eq!(out, vec![1.0, -4.0]);
        m.combine_into(1, &grids, &mut out);
        assert_eq!(out, vec![3.0, 8.0]);
    }
}
