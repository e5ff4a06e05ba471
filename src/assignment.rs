use super::*;

/// Minimum-cost perfect matching on a square cost matrix.
///
/// Given an N × N matrix of finite, non-negative costs, `solve` returns a
/// permutation σ of 0..N (row i is matched to column σ(i)) minimizing
/// Σ D[i][σ(i)]. The clustering loop only relies on this contract, so any
/// exact algorithm (Hungarian, Jonker-Volgenant, network simplex) can be
/// plugged in. A solver that returns something other than a permutation is
/// caught by [`Update`] and surfaces as a fatal error.
///
/// Closures of the right shape implement the trait directly.
pub trait Assignment: Sync {
    fn solve(&self, costs: &Costs) -> Vec<usize>;
}

impl<F> Assignment for F
where
    F: Fn(&Costs) -> Vec<usize> + Sync,
{
    fn solve(&self, costs: &Costs) -> Vec<usize> {
        self(costs)
    }
}
