use super::*;

/// One iteration of the balanced k-means loop.
///
/// A step is computed from the previous centroid set and never mutates it:
/// the prior centroids go in by reference, a fresh `Step` comes out, and the
/// caller decides whether to continue from `step.centroids()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    centroids: Vec<Point>,
    labels: Vec<usize>,
    cost: Energy,
    drift: Energy,
}

impl Step {
    /// Costs → assignment → update, starting from `centroids`.
    pub fn next<A>(
        dataset: &Dataset,
        solver: &A,
        balance: Balance,
        centroids: &[Point],
    ) -> Result<Self, BalanceError>
    where
        A: Assignment + ?Sized,
    {
        if dataset.n() != balance.n() || centroids.len() != balance.k() {
            return Err(BalanceError::InvalidArgument(format!(
                "{} points and {} centroids do not fit N = {}, k = {}",
                dataset.n(),
                centroids.len(),
                balance.n(),
                balance.k()
            )));
        }
        let ref costs = Costs::build(dataset, centroids)?;
        let ref assignment = solver.solve(costs);
        let update = Update::apply(dataset, balance, assignment)?;
        let cost = costs.objective(assignment);
        let drift = update
            .centroids()
            .iter()
            .zip(centroids.iter())
            .map(|(new, old)| new.drift(old))
            .fold(0., Energy::max);
        let (centroids, labels) = update.into_parts();
        Ok(Self {
            centroids,
            labels,
            cost,
            drift,
        })
    }
    /// Centroids recomputed by this step.
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }
    /// Cluster label per point, in [0, k).
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
    /// Σ ||X[i] − C[label i]||² against the centroids this step started from.
    pub fn cost(&self) -> Energy {
        self.cost
    }
    /// Largest component-wise centroid movement during this step.
    pub fn drift(&self) -> Energy {
        self.drift
    }
    pub fn into_parts(self) -> (Vec<Point>, Vec<usize>) {
        (self.centroids, self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_from_column_bottoms() {
        let dataset = Fixture::scenario();
        let balance = Balance::try_from((5, 2)).unwrap();
        let centroids = vec![Point::from(vec![1., 2.]), Point::from(vec![9., 5.])];
        let step = Step::next(&dataset, &Hungarian, balance, &centroids).unwrap();
        assert_eq!(step.labels(), &[0, 0, 0, 1, 1]);
        assert_eq!(step.centroids()[0], Point::from(vec![1., 3.]));
        assert_eq!(step.centroids()[1], Point::from(vec![9., 5.5]));
        // 0 + 1 + 4 on the left, 0 + 1 on the right
        assert_eq!(step.cost(), 6.);
        assert_eq!(step.drift(), 1.);
    }
    #[test]
    fn mismatched_centroid_count_is_rejected() {
        let dataset = Fixture::scenario();
        let balance = Balance::try_from((5, 2)).unwrap();
        let three = vec![Point::from(vec![0., 0.]); 3];
        assert!(matches!(
            Step::next(&dataset, &Hungarian, balance, &three),
            Err(BalanceError::InvalidArgument(_))
        ));
        let other = Balance::try_from((4, 2)).unwrap();
        let two = vec![Point::from(vec![0., 0.]); 2];
        assert!(matches!(
            Step::next(&dataset, &Hungarian, other, &two),
            Err(BalanceError::InvalidArgument(_))
        ));
    }
}
