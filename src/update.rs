use super::*;

/// Centroids and labels recomputed from one solved assignment.
///
/// Each point is absorbed into the bucket of its slot's owner, then every
/// bucket is divided by the cluster's fixed target size rather than by the
/// count that happened to land in it. The two agree whenever the solver
/// returned a perfect matching; when they do not, the update fails instead of
/// quietly averaging an unbalanced cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    centroids: Vec<Point>,
    labels: Vec<usize>,
}

impl Update {
    /// Applies an assignment σ (slot per point) to the point set.
    pub fn apply(
        dataset: &Dataset,
        balance: Balance,
        assignment: &[usize],
    ) -> Result<Self, BalanceError> {
        Self::validate(balance, assignment)?;
        let labels = assignment
            .iter()
            .map(|&slot| balance.owner(slot))
            .collect::<Vec<usize>>();
        let centroids = (0..balance.k())
            .map(|c| {
                labels
                    .iter()
                    .zip(dataset.points())
                    .filter(|(label, _)| **label == c)
                    .map(|(_, point)| point)
                    .fold(Point::zeros(dataset.d()), Point::absorb)
                    .divide(balance.target(c) as Coordinate)
            })
            .collect::<Vec<Point>>();
        if let Some(c) = centroids.iter().position(|c| !c.is_finite()) {
            return Err(BalanceError::InvalidArgument(format!(
                "centroid {} overflows to a non-finite value",
                c
            )));
        }
        Ok(Self { centroids, labels })
    }
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
    pub fn into_parts(self) -> (Vec<Point>, Vec<usize>) {
        (self.centroids, self.labels)
    }

    /// Checks, in order: one in-range slot per point, every cluster at its
    /// target size, no slot used twice.
    fn validate(balance: Balance, assignment: &[usize]) -> Result<(), BalanceError> {
        let n = balance.n();
        if assignment.len() != n {
            return Err(BalanceError::InvalidAssignment(format!(
                "{} slots for {} points",
                assignment.len(),
                n
            )));
        }
        if let Some(slot) = assignment.iter().find(|&&slot| slot >= n) {
            return Err(BalanceError::InvalidAssignment(format!(
                "slot {} out of range for N = {}",
                slot, n
            )));
        }
        let mut counts = vec![0; balance.k()];
        assignment
            .iter()
            .for_each(|&slot| counts[balance.owner(slot)] += 1);
        if let Some((cluster, &found)) = counts
            .iter()
            .enumerate()
            .find(|(c, found)| **found != balance.target(*c))
        {
            return Err(BalanceError::BalanceInvariantViolation {
                cluster,
                expected: balance.target(cluster),
                found,
            });
        }
        let mut seen = vec![false; n];
        for &slot in assignment {
            if std::mem::replace(&mut seen[slot], true) {
                return Err(BalanceError::InvalidAssignment(format!(
                    "slot {} assigned twice",
                    slot
                )));
            }
        }
        Ok(())
    }
}
