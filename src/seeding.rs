use super::*;
use rand::Rng;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;

/// Strategy for picking the k initial centroids.
///
/// Both strategies bind every centroid to a distinct source point index.
/// Neither claims global optimality of the final clustering: different seeds
/// may settle into different local optima.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Seeding {
    /// uniformly random without replacement
    #[default]
    Random,
    /// k-means++: weight by squared distance to the nearest chosen centroid
    PlusPlus,
}

impl Seeding {
    /// Picks k distinct point indices.
    pub fn indices(
        &self,
        dataset: &Dataset,
        k: usize,
        seed: u64,
    ) -> Result<Vec<usize>, BalanceError> {
        let balance = Balance::try_from((dataset.n(), k))?;
        let ref mut rng = SmallRng::seed_from_u64(seed);
        Ok(match self {
            Self::Random => rand::seq::index::sample(rng, balance.n(), balance.k()).into_vec(),
            Self::PlusPlus => Self::plusplus(dataset, balance.k(), rng),
        })
    }

    /// Picks k initial centroids, each a copy of a distinct point.
    pub fn centroids(
        &self,
        dataset: &Dataset,
        k: usize,
        seed: u64,
    ) -> Result<Vec<Point>, BalanceError> {
        Ok(self
            .indices(dataset, k, seed)?
            .into_iter()
            .map(|i| dataset.point(i).clone())
            .collect())
    }

    /// kmeans++ initialization
    /// 1. choose 1st centroid uniformly from the dataset
    /// 2. choose each next centroid with probability proportional to the
    ///    squared distance to its nearest chosen centroid
    /// 3. chosen indices carry zero weight, so they are never drawn twice
    fn plusplus(dataset: &Dataset, k: usize, rng: &mut SmallRng) -> Vec<usize> {
        use rayon::iter::IntoParallelRefIterator;
        use rayon::iter::ParallelIterator;
        let n = dataset.n();
        let mut potentials = vec![Energy::INFINITY; n];
        let mut chosen = Vec::with_capacity(k);
        while chosen.len() < k {
            let i = match chosen.is_empty() {
                true => rng.random_range(0..n),
                false => match WeightedIndex::new(potentials.iter()) {
                    Ok(weights) => weights.sample(rng),
                    Err(_) => Self::leftover(&chosen, n, rng),
                },
            };
            chosen.push(i);
            let x = dataset.point(i);
            potentials = dataset
                .points()
                .par_iter()
                .map(|p| p.distance(x))
                .collect::<Vec<Energy>>()
                .iter()
                .zip(potentials.iter())
                .map(|(d0, d1)| Energy::min(*d0, *d1))
                .collect::<Vec<Energy>>();
            chosen.iter().for_each(|&c| potentials[c] = 0.);
        }
        chosen
    }

    /// uniform draw among unchosen indices, used once every remaining point
    /// coincides with a chosen centroid
    fn leftover(chosen: &[usize], n: usize, rng: &mut SmallRng) -> usize {
        let remaining = (0..n).filter(|i| !chosen.contains(i)).collect::<Vec<_>>();
        remaining[rng.random_range(0..remaining.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_indices_are_distinct() {
        let dataset = Fixture::blobs(4, 10, 3, 7);
        for seed in 0..20 {
            let indices = Seeding::Random.indices(&dataset, 17, seed).unwrap();
            assert_eq!(indices.len(), 17);
            assert_eq!(indices.iter().collect::<HashSet<_>>().len(), 17);
            assert!(indices.iter().all(|&i| i < dataset.n()));
        }
    }
    #[test]
    fn plusplus_indices_are_distinct_with_duplicates() {
        let dataset = Dataset::try_from(vec![vec![1., 1.]; 6]).unwrap();
        for seed in 0..20 {
            let indices = Seeding::PlusPlus.indices(&dataset, 6, seed).unwrap();
            assert_eq!(indices.iter().collect::<HashSet<_>>().len(), 6);
        }
    }
    #[test]
    fn same_seed_same_centroids() {
        let dataset = Fixture::blobs(3, 8, 2, 1);
        for seeding in [Seeding::Random, Seeding::PlusPlus] {
            let a = seeding.centroids(&dataset, 5, 42).unwrap();
            let b = seeding.centroids(&dataset, 5, 42).unwrap();
            assert_eq!(a, b);
        }
    }
    #[test]
    fn centroids_are_points_of_the_dataset() {
        let dataset = Fixture::scenario();
        let centroids = Seeding::Random.centroids(&dataset, 2, 3).unwrap();
        assert!(centroids.iter().all(|c| dataset.points().contains(c)));
    }
    #[test]
    fn rejects_invalid_k() {
        let dataset = Fixture::scenario();
        assert!(matches!(
            Seeding::Random.indices(&dataset, 0, 0),
            Err(BalanceError::InvalidArgument(_))
        ));
        assert!(matches!(
            Seeding::PlusPlus.indices(&dataset, 6, 0),
            Err(BalanceError::InvalidArgument(_))
        ));
    }
}
