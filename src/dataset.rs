use super::*;

/// The point set X: N points of a common dimension d.
///
/// Construction rejects empty input, zero-dimensional or ragged rows, and
/// non-finite coordinates, so every later stage can assume a well-formed,
/// finite N × d array.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    /// Number of points.
    pub fn n(&self) -> usize {
        self.points.len()
    }
    /// Dimension of every point.
    pub fn d(&self) -> usize {
        self.points[0].d()
    }
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn point(&self, i: usize) -> &Point {
        &self.points[i]
    }
    /// Mean of all points.
    pub fn mean(&self) -> Point {
        self.points
            .iter()
            .fold(Point::zeros(self.d()), Point::absorb)
            .divide(self.n() as Coordinate)
    }
}

impl TryFrom<Vec<Point>> for Dataset {
    type Error = BalanceError;
    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let d = points
            .first()
            .map(Point::d)
            .ok_or_else(|| BalanceError::InvalidArgument("empty point set".into()))?;
        if d == 0 {
            return Err(BalanceError::InvalidArgument(
                "points must have at least one coordinate".into(),
            ));
        }
        if let Some((i, p)) = points.iter().enumerate().find(|(_, p)| p.d() != d) {
            return Err(BalanceError::InvalidArgument(format!(
                "point {} has {} coordinates, expected {}",
                i,
                p.d(),
                d
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(BalanceError::InvalidArgument(format!(
                "point {} has a non-finite coordinate",
                i
            )));
        }
        if !Self::bounded(&points, d) {
            return Err(BalanceError::InvalidArgument(
                "coordinates span too wide a range for finite squared distances".into(),
            ));
        }
        Ok(Self { points })
    }
}

impl Dataset {
    /// Cluster sums need N·max|x| finite on every axis. Costs and the
    /// solver's potentials need N·diameter² finite, with headroom.
    fn bounded(points: &[Point], d: usize) -> bool {
        let n = points.len() as Energy;
        let mut diameter = 0.;
        for j in 0..d {
            let (lo, hi) = points
                .iter()
                .map(|p| p.coordinates()[j])
                .fold((Coordinate::INFINITY, Coordinate::NEG_INFINITY), |(lo, hi), x| {
                    (lo.min(x), hi.max(x))
                });
            if !(n * lo.abs().max(hi.abs())).is_finite() {
                return false;
            }
            diameter += (hi - lo) * (hi - lo);
        }
        (4. * n * diameter).is_finite()
    }
}

impl TryFrom<Vec<Vec<Coordinate>>> for Dataset {
    type Error = BalanceError;
    fn try_from(rows: Vec<Vec<Coordinate>>) -> Result<Self, Self::Error> {
        Self::try_from(rows.into_iter().map(Point::from).collect::<Vec<_>>())
    }
}

impl TryFrom<&[&[Coordinate]]> for Dataset {
    type Error = BalanceError;
    fn try_from(rows: &[&[Coordinate]]) -> Result<Self, Self::Error> {
        Self::try_from(rows.iter().copied().map(Point::from).collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn rejects_empty() {
        let rows: Vec<Vec<Coordinate>> = vec![];
        assert!(matches!(
            Dataset::try_from(rows),
            Err(BalanceError::InvalidArgument(_))
        ));
    }
    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![vec![1., 2.], vec![3.]];
        assert!(matches!(
            Dataset::try_from(rows),
            Err(BalanceError::InvalidArgument(_))
        ));
    }
    #[test]
    fn rejects_zero_dimension() {
        let rows: Vec<Vec<Coordinate>> = vec![vec![], vec![]];
        assert!(matches!(
            Dataset::try_from(rows),
            Err(BalanceError::InvalidArgument(_))
        ));
    }
    #[test]
    fn rejects_non_finite() {
        let rows = vec![vec![1., 2.], vec![Coordinate::NAN, 0.]];
        assert!(matches!(
            Dataset::try_from(rows),
            Err(BalanceError::InvalidArgument(_))
        ));
    }
    #[test]
    fn mean_of_points() {
        let dataset = Dataset::try_from(vec![vec![0., 0.], vec![2., 4.], vec![4., 2.]]).unwrap();
        assert_eq!(dataset.n(), 3);
        assert_eq!(dataset.d(), 2);
        assert_eq!(dataset.mean(), Point::from(vec![2., 2.]));
    }
    #[test]
    fn rejects_overflowing_spread() {
        let rows = vec![vec![1e200], vec![-1e200], vec![0.]];
        assert!(matches!(
            Dataset::try_from(rows),
            Err(BalanceError::InvalidArgument(_))
        ));
    }
    #[test]
    fn rejects_overflowing_sums() {
        let rows = vec![vec![1e308], vec![1e308]];
        assert!(matches!(
            Dataset::try_from(rows),
            Err(BalanceError::InvalidArgument(_))
        ));
    }
    #[test]
    fn accepts_large_but_safe_coordinates() {
        let rows = vec![vec![1e100, -3.], vec![-1e100, 4.]];
        assert!(Dataset::try_from(rows).is_ok());
    }
}
