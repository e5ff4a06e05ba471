use super::*;

/// Replicated-slot arithmetic for N points split into k clusters.
///
/// The assignment problem is square: N points against N slots. Slot j is
/// owned by centroid `j mod k`, so centroid c owns ⌈N/k⌉ slots when
/// `c < N mod k` and ⌊N/k⌋ slots otherwise. A perfect matching therefore
/// fills every cluster to exactly its target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    n: usize,
    k: usize,
}

impl Balance {
    /// Number of points (and slots).
    pub fn n(&self) -> usize {
        self.n
    }
    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }
    /// The centroid owning slot j.
    pub fn owner(&self, slot: usize) -> usize {
        slot % self.k
    }
    /// Number of clusters that hold one extra point.
    pub fn full(&self) -> usize {
        self.n % self.k
    }
    /// Fixed size of cluster c.
    pub fn target(&self, cluster: usize) -> usize {
        if cluster < self.full() {
            self.n.div_ceil(self.k)
        } else {
            self.n / self.k
        }
    }
    /// Target sizes of all clusters, indexed by cluster.
    pub fn targets(&self) -> Vec<usize> {
        (0..self.k).map(|c| self.target(c)).collect()
    }
}

impl TryFrom<(usize, usize)> for Balance {
    type Error = BalanceError;
    fn try_from((n, k): (usize, usize)) -> Result<Self, Self::Error> {
        match (n, k) {
            (0, _) => Err(BalanceError::InvalidArgument("empty point set".into())),
            (_, 0) => Err(BalanceError::InvalidArgument("k must be at least 1".into())),
            (n, k) if k > n => Err(BalanceError::InvalidArgument(format!(
                "k = {} exceeds the number of points N = {}",
                k, n
            ))),
            (n, k) => Ok(Self { n, k }),
        }
    }
}
