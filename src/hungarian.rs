use super::*;

/// Exact assignment solver.
///
/// Shortest augmenting path formulation of the Hungarian algorithm
/// (Kuhn 1955, Munkres 1957; in the form popularized by Jonker & Volgenant).
/// Rows are inserted one at a time; each insertion runs a Dijkstra-like search
/// over reduced costs `D[i][j] − u[i] − v[j]` and augments along the cheapest
/// alternating path, keeping the dual potentials feasible throughout.
///
/// # Complexity
///
/// O(N³) time, O(N) extra memory on top of the cost matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hungarian;

impl Assignment for Hungarian {
    fn solve(&self, costs: &Costs) -> Vec<usize> {
        let n = costs.n();
        // index 0 is a sentinel column; rows and columns are shifted by one
        let mut u = vec![0.; n + 1];
        let mut v = vec![0.; n + 1];
        let mut matched = vec![0usize; n + 1];
        let mut way = vec![0usize; n + 1];
        for i in 1..=n {
            matched[0] = i;
            let mut j0 = 0;
            let mut minv = vec![Energy::INFINITY; n + 1];
            let mut used = vec![false; n + 1];
            loop {
                used[j0] = true;
                let i0 = matched[j0];
                let row = costs.row(i0 - 1);
                let mut delta = Energy::INFINITY;
                let mut j1 = 0;
                for j in 1..=n {
                    if used[j] {
                        continue;
                    }
                    let reduced = row[j - 1] - u[i0] - v[j];
                    if reduced < minv[j] {
                        minv[j] = reduced;
                        way[j] = j0;
                    }
                    if minv[j] < delta {
                        delta = minv[j];
                        j1 = j;
                    }
                }
                // potentials overflowed; the partial matching is rejected downstream
                if !delta.is_finite() {
                    break;
                }
                for j in 0..=n {
                    if used[j] {
                        u[matched[j]] += delta;
                        v[j] -= delta;
                    } else {
                        minv[j] -= delta;
                    }
                }
                j0 = j1;
                if matched[j0] == 0 {
                    break;
                }
            }
            // augment along the alternating path back to the sentinel
            loop {
                let j1 = way[j0];
                matched[j0] = matched[j1];
                j0 = j1;
                if j0 == 0 {
                    break;
                }
            }
        }
        let mut assignment = vec![0; n];
        (1..=n)
            .filter(|&j| matched[j] != 0)
            .for_each(|j| assignment[matched[j] - 1] = j - 1);
        assignment
    }
}
