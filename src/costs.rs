use super::*;
use rayon::prelude::*;

/// Square N × N cost matrix for the balanced assignment problem.
///
/// Row i is point X[i]; column j is slot j, owned by centroid `j mod k`.
/// Entry (i, j) holds ||X[i] − C[j mod k]||². Stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Costs {
    n: usize,
    values: Vec<Energy>,
}

impl Costs {
    /// Builds D from the point set and the current centroids.
    ///
    /// Rows are independent and computed in parallel. Each row computes its
    /// k distinct distances once and replicates them across the slots. Fails
    /// unless `1 ≤ k ≤ N`, every centroid matches the dataset's dimension,
    /// and every entry is finite.
    pub fn build(dataset: &Dataset, centroids: &[Point]) -> Result<Self, BalanceError> {
        let n = dataset.n();
        let k = centroids.len();
        if k == 0 || k > n {
            return Err(BalanceError::InvalidArgument(format!(
                "{} centroids for N = {} points",
                k, n
            )));
        }
        if let Some(c) = centroids.iter().position(|c| c.d() != dataset.d()) {
            return Err(BalanceError::InvalidArgument(format!(
                "centroid {} has {} coordinates, expected {}",
                c,
                centroids[c].d(),
                dataset.d()
            )));
        }
        let mut values = vec![0.; n * n];
        values
            .par_chunks_mut(n)
            .zip(dataset.points().par_iter())
            .for_each(|(row, x)| {
                let distances = centroids.iter().map(|c| x.distance(c)).collect::<Vec<_>>();
                row.iter_mut()
                    .enumerate()
                    .for_each(|(j, d)| *d = distances[j % k]);
            });
        if values.par_iter().any(|x| !x.is_finite()) {
            return Err(BalanceError::InvalidArgument(
                "squared distance overflows to infinity".into(),
            ));
        }
        Ok(Self { n, values })
    }
    /// Side length of the matrix.
    pub fn n(&self) -> usize {
        self.n
    }
    pub fn get(&self, i: usize, j: usize) -> Energy {
        self.values[i * self.n + j]
    }
    pub fn row(&self, i: usize) -> &[Energy] {
        &self.values[i * self.n..(i + 1) * self.n]
    }
    /// Σ D[i][σ(i)] for an assignment σ.
    pub fn objective(&self, assignment: &[usize]) -> Energy {
        assignment
            .iter()
            .enumerate()
            .map(|(i, &j)| self.get(i, j))
            .sum()
    }
}

impl TryFrom<Vec<Vec<Energy>>> for Costs {
    type Error = BalanceError;
    fn try_from(rows: Vec<Vec<Energy>>) -> Result<Self, Self::Error> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return Err(BalanceError::InvalidArgument(format!(
                "cost matrix with {} rows is not square",
                n
            )));
        }
        if rows.iter().flatten().any(|x| !x.is_finite() || *x < 0.) {
            return Err(BalanceError::InvalidArgument(
                "cost matrix entries must be finite and non-negative".into(),
            ));
        }
        Ok(Self {
            n,
            values: rows.into_iter().flatten().collect(),
        })
    }
}
