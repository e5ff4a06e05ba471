use super::*;
use serde::Deserialize;
use serde::Serialize;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// centroids moved by no more than the tolerance
    Converged,
    /// the iteration ceiling was reached first
    Exhausted,
}

/// Result of a balanced k-means run.
///
/// Cluster c holds exactly ⌈N/k⌉ points when `c < N mod k` and ⌊N/k⌋
/// points otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    centroids: Vec<Point>,
    labels: Vec<usize>,
    cost: Energy,
    iterations: usize,
    termination: Termination,
    seed: u64,
}

impl Clustering {
    pub(crate) fn new(
        dataset: &Dataset,
        step: Step,
        iterations: usize,
        termination: Termination,
        seed: u64,
    ) -> Self {
        let (centroids, labels) = step.into_parts();
        let cost = labels
            .iter()
            .zip(dataset.points())
            .map(|(&c, x)| x.distance(&centroids[c]))
            .sum::<Energy>();
        Self {
            centroids,
            labels,
            cost,
            iterations,
            termination,
            seed,
        }
    }
    /// Counts the iterations of earlier descents this one continued from.
    pub(crate) fn after(mut self, prior: usize) -> Self {
        self.iterations += prior;
        self
    }
    /// Final centroid set, indexed by cluster.
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }
    /// Cluster of every input point, in input order.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
    /// Σ ||X[i] − C[label i]||² against the final centroids.
    pub fn cost(&self) -> Energy {
        self.cost
    }
    /// Update steps performed, including the final confirming one.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    pub fn termination(&self) -> Termination {
        self.termination
    }
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
    /// Seed of the run that produced this clustering.
    pub fn seed(&self) -> u64 {
        self.seed
    }
    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.centroids.len()
    }
    /// Point count per cluster.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        self.labels.iter().for_each(|&c| sizes[c] += 1);
        sizes
    }
    /// Indices of the points in cluster c.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == cluster)
            .map(|(i, _)| i)
            .collect()
    }
}

impl std::fmt::Display for Clustering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (c, centroid) in self.centroids.iter().enumerate() {
            writeln!(f, "{:>3} {:<6} {}", c, self.members(c).len(), centroid)?;
        }
        write!(
            f,
            "cost {:.6} after {} iterations ({:?})",
            self.cost, self.iterations, self.termination
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separated() -> Clustering {
        let dataset = Fixture::scenario();
        let balance = Balance::try_from((5, 2)).unwrap();
        let centroids = vec![Point::from(vec![1., 3.]), Point::from(vec![9., 5.5])];
        let step = Step::next(&dataset, &Hungarian, balance, &centroids).unwrap();
        Clustering::new(&dataset, step, 1, Termination::Converged, 0)
    }

    #[test]
    fn members_and_sizes() {
        let clustering = separated();
        assert_eq!(clustering.k(), 2);
        assert_eq!(clustering.sizes(), vec![3, 2]);
        assert_eq!(clustering.members(0), vec![0, 1, 2]);
        assert_eq!(clustering.members(1), vec![3, 4]);
        assert_eq!(clustering.cost(), 2.5);
        assert!(clustering.converged());
    }
    #[test]
    fn earlier_descents_add_iterations() {
        let clustering = separated().after(3);
        assert_eq!(clustering.iterations(), 4);
    }
    #[test]
    fn display_lists_clusters() {
        assert_eq!(
            separated().to_string(),
            "  0 3      [1, 3]\n  1 2      [9, 5.5]\ncost 2.500000 after 1 iterations (Converged)"
        );
    }
}
