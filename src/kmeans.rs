use super::*;
use rayon::prelude::*;

/// Configuration and entry point for balanced k-means.
///
/// ```
/// use balanced_kmeans::*;
/// let dataset = Dataset::try_from(vec![
///     vec![1., 2.],
///     vec![1., 3.],
///     vec![1., 4.],
///     vec![9., 5.],
///     vec![9., 6.],
/// ])
/// .unwrap();
/// let clustering = BalancedKMeans::new(2).seed(7).fit(&dataset, &Hungarian).unwrap();
/// assert_eq!(clustering.labels()[0], clustering.labels()[2]);
/// assert_ne!(clustering.labels()[0], clustering.labels()[4]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedKMeans {
    k: usize,
    tolerance: Energy,
    iterations: usize,
    restarts: usize,
    exchange: bool,
    seeding: Seeding,
    seed: Option<u64>,
}

impl BalancedKMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            tolerance: KMEANS_TOLERANCE,
            iterations: KMEANS_MAX_ITERATIONS,
            restarts: KMEANS_RESTARTS,
            exchange: KMEANS_EXCHANGE,
            seeding: Seeding::default(),
            seed: None,
        }
    }
    /// Largest centroid movement still treated as converged.
    pub fn tolerance(mut self, tolerance: Energy) -> Self {
        self.tolerance = tolerance;
        self
    }
    /// Iteration ceiling per descent.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
    /// Independent runs with seeds `seed, seed + 1, ...`; the lowest cost wins.
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }
    /// Whether to try handing the extra slots to other clusters after
    /// convergence. Only matters when k does not divide N.
    pub fn exchange(mut self, exchange: bool) -> Self {
        self.exchange = exchange;
        self
    }
    pub fn seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn k(&self) -> usize {
        self.k
    }

    /// Explicit seed, else the `BKMEANS_SEED` environment variable, else random.
    fn resolve_seed(&self) -> u64 {
        Self::seed_from(self.seed, std::env::var(KMEANS_SEED_VAR).ok())
            .unwrap_or_else(rand::random)
    }
    /// Unparseable variables are ignored.
    fn seed_from(explicit: Option<u64>, variable: Option<String>) -> Option<u64> {
        explicit.or_else(|| variable.and_then(|s| s.trim().parse().ok()))
    }

    /// Rejects bad parameters before anything is computed.
    fn validate(&self, dataset: &Dataset) -> Result<Balance, BalanceError> {
        if !(self.tolerance >= 0.) {
            return Err(BalanceError::InvalidArgument(format!(
                "tolerance {} must be non-negative",
                self.tolerance
            )));
        }
        if self.iterations == 0 {
            return Err(BalanceError::InvalidArgument(
                "iteration ceiling must be at least 1".into(),
            ));
        }
        if self.restarts == 0 {
            return Err(BalanceError::InvalidArgument(
                "restarts must be at least 1".into(),
            ));
        }
        Balance::try_from((dataset.n(), self.k))
    }

    /// Seeds centroids and returns the lazy iteration sequence.
    pub fn trajectory<'a, A>(
        &self,
        dataset: &'a Dataset,
        solver: &'a A,
    ) -> Result<Trajectory<'a, A>, BalanceError>
    where
        A: Assignment + ?Sized,
    {
        let balance = self.validate(dataset)?;
        let centroids = self.seeding.centroids(dataset, self.k, self.resolve_seed())?;
        Ok(Trajectory::new(self, dataset, solver, balance, centroids))
    }

    /// Continues iterating from caller-supplied centroids.
    pub fn resume<'a, A>(
        &self,
        dataset: &'a Dataset,
        solver: &'a A,
        centroids: Vec<Point>,
    ) -> Result<Trajectory<'a, A>, BalanceError>
    where
        A: Assignment + ?Sized,
    {
        let balance = self.validate(dataset)?;
        if centroids.len() != self.k {
            return Err(BalanceError::InvalidArgument(format!(
                "{} centroids for k = {}",
                centroids.len(),
                self.k
            )));
        }
        if let Some(c) = centroids
            .iter()
            .position(|c| c.d() != dataset.d() || !c.is_finite())
        {
            return Err(BalanceError::InvalidArgument(format!(
                "centroid {} is not a finite point of dimension {}",
                c,
                dataset.d()
            )));
        }
        Ok(Trajectory::new(self, dataset, solver, balance, centroids))
    }

    /// Runs to convergence (or the iteration ceiling) and returns the
    /// lowest-cost clustering over all restarts.
    pub fn fit<A>(&self, dataset: &Dataset, solver: &A) -> Result<Clustering, BalanceError>
    where
        A: Assignment + ?Sized,
    {
        let balance = self.validate(dataset)?;
        let seed = self.resolve_seed();
        log::info!(
            "{:<32}{:<32}",
            "kmeans balancing",
            format!("N={} k={} d={}", dataset.n(), self.k, dataset.d())
        );
        log::info!("{:<32}{:<32}", "kmeans seeding", seed);
        (0..self.restarts as u64)
            .into_par_iter()
            .map(|r| self.run(dataset, solver, balance, seed.wrapping_add(r)))
            .collect::<Result<Vec<Clustering>, BalanceError>>()?
            .into_iter()
            .min_by(|a, b| a.cost().total_cmp(&b.cost()))
            .ok_or_else(|| BalanceError::InvalidArgument("restarts must be at least 1".into()))
    }

    /// One seeded run: descend, then exchange until nothing improves.
    fn run<A>(
        &self,
        dataset: &Dataset,
        solver: &A,
        balance: Balance,
        seed: u64,
    ) -> Result<Clustering, BalanceError>
    where
        A: Assignment + ?Sized,
    {
        let centroids = self.seeding.centroids(dataset, self.k, seed)?;
        let mut best = self.descend(dataset, solver, balance, centroids, seed)?;
        while let Some(better) = self.exchanged(dataset, solver, balance, &best)? {
            best = better;
        }
        log::info!(
            "{:<32}{:<32}",
            format!("kmeans {:?}", best.termination()).to_lowercase(),
            format!("seed {} cost {:.6}", seed, best.cost())
        );
        Ok(best)
    }

    /// Follows one trajectory to its end.
    fn descend<A>(
        &self,
        dataset: &Dataset,
        solver: &A,
        balance: Balance,
        centroids: Vec<Point>,
        seed: u64,
    ) -> Result<Clustering, BalanceError>
    where
        A: Assignment + ?Sized,
    {
        let mut trajectory = Trajectory::new(self, dataset, solver, balance, centroids);
        let mut last = None;
        while let Some(step) = trajectory.next() {
            let step = step?;
            log::debug!(
                "{:<32}{:<32}",
                format!("kmeans iteration {:>4}", trajectory.t()),
                format!("cost {:.6} drift {:.3e}", step.cost(), step.drift())
            );
            last = Some(step);
        }
        let termination = trajectory.termination();
        if termination == Termination::Exhausted {
            log::warn!(
                "{:<32}{:<32}",
                "kmeans exhausted",
                format!("seed {} after {} iterations", seed, trajectory.t())
            );
        }
        let last = last.ok_or_else(|| {
            BalanceError::InvalidArgument("iteration ceiling must be at least 1".into())
        })?;
        Ok(Clustering::new(dataset, last, trajectory.t(), termination, seed))
    }

    /// Which clusters receive the extra ⌈N/k⌉ slot is fixed by centroid
    /// order, so a converged run can be stuck with the extra slots on the
    /// wrong side. Swaps each full cluster's centroid with each short
    /// cluster's centroid, descends again, and returns the first strictly
    /// cheaper clustering.
    fn exchanged<A>(
        &self,
        dataset: &Dataset,
        solver: &A,
        balance: Balance,
        current: &Clustering,
    ) -> Result<Option<Clustering>, BalanceError>
    where
        A: Assignment + ?Sized,
    {
        if !self.exchange || balance.full() == 0 {
            return Ok(None);
        }
        for a in 0..balance.full() {
            for b in balance.full()..balance.k() {
                let mut centroids = current.centroids().to_vec();
                centroids.swap(a, b);
                let seed = current.seed();
                let candidate = self.descend(dataset, solver, balance, centroids, seed)?;
                if candidate.cost() < current.cost() {
                    log::debug!(
                        "{:<32}{:<32}",
                        format!("kmeans exchange {} <> {}", a, b),
                        format!("cost {:.6} -> {:.6}", current.cost(), candidate.cost())
                    );
                    return Ok(Some(candidate.after(current.iterations())));
                }
            }
        }
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Iterating,
    Converged,
    Exhausted,
    Failed,
}

/// The sequence of steps from the seeded centroids to convergence.
///
/// Yields one [`Step`] per iteration. Ends after the first step whose
/// centroids moved by no more than the tolerance, after the iteration
/// ceiling, or after the first error.
pub struct Trajectory<'a, A>
where
    A: Assignment + ?Sized,
{
    dataset: &'a Dataset,
    solver: &'a A,
    balance: Balance,
    centroids: Vec<Point>,
    tolerance: Energy,
    ceiling: usize,
    t: usize,
    state: State,
}

impl<'a, A> Trajectory<'a, A>
where
    A: Assignment + ?Sized,
{
    fn new(
        config: &BalancedKMeans,
        dataset: &'a Dataset,
        solver: &'a A,
        balance: Balance,
        centroids: Vec<Point>,
    ) -> Self {
        Self {
            dataset,
            solver,
            balance,
            centroids,
            tolerance: config.tolerance,
            ceiling: config.iterations,
            t: 0,
            state: State::Iterating,
        }
    }
    /// Centroids the next step will start from.
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }
    /// Steps taken so far.
    pub fn t(&self) -> usize {
        self.t
    }
    /// `Converged` once a step stayed within tolerance, `Exhausted` otherwise.
    pub fn termination(&self) -> Termination {
        match self.state {
            State::Converged => Termination::Converged,
            _ => Termination::Exhausted,
        }
    }
}

impl<A> Iterator for Trajectory<'_, A>
where
    A: Assignment + ?Sized,
{
    type Item = Result<Step, BalanceError>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Iterating {
            return None;
        }
        if self.t >= self.ceiling {
            self.state = State::Exhausted;
            return None;
        }
        match Step::next(self.dataset, self.solver, self.balance, &self.centroids) {
            Err(e) => {
                self.state = State::Failed;
                Some(Err(e))
            }
            Ok(step) => {
                self.t += 1;
                self.centroids = step.centroids().to_vec();
                if step.drift() <= self.tolerance {
                    self.state = State::Converged;
                }
                Some(Ok(step))
            }
        }
    }
}
