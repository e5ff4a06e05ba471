use super::*;
use serde::Deserialize;
use serde::Serialize;

/// A single vector in d-dimensional Euclidean space.
///
/// Points double as centroids: the clustering loop only ever needs the
/// squared distance between two points, their sum, and division by a
/// constant (see [`Absorb`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point(Vec<Coordinate>);

impl Point {
    /// The zero vector in d dimensions.
    pub fn zeros(d: usize) -> Self {
        Self(vec![0.; d])
    }
    /// Number of coordinates.
    pub fn d(&self) -> usize {
        self.0.len()
    }
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }
    /// ||self - other||². Both points must share a dimension.
    pub fn distance(&self, other: &Self) -> Energy {
        debug_assert!(self.d() == other.d());
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a - b)
            .map(|x| x * x)
            .sum::<Energy>()
    }
    /// max |self_i - other_i|, used as the convergence measure.
    pub fn drift(&self, other: &Self) -> Energy {
        debug_assert!(self.d() == other.d());
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0., Energy::max)
    }
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

impl Absorb for Point {
    fn identity(&self) -> Self {
        Self::zeros(self.d())
    }
    fn absorb(mut self, other: &Self) -> Self {
        debug_assert!(self.d() == other.d());
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a += b);
        self
    }
    fn divide(mut self, divisor: Coordinate) -> Self {
        self.0.iter_mut().for_each(|a| *a /= divisor);
        self
    }
}

impl From<Vec<Coordinate>> for Point {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }
}
impl From<&[Coordinate]> for Point {
    fn from(coordinates: &[Coordinate]) -> Self {
        Self(coordinates.to_vec())
    }
}
impl From<Point> for Vec<Coordinate> {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn squared_distance() {
        let a = Point::from(vec![1., 2.]);
        let b = Point::from(vec![4., 6.]);
        assert_eq!(a.distance(&b), 25.);
        assert_eq!(b.distance(&a), 25.);
        assert_eq!(a.distance(&a), 0.);
    }
    #[test]
    fn drift_is_max_component() {
        let a = Point::from(vec![1., 2., 3.]);
        let b = Point::from(vec![1.5, 0., 3.]);
        assert_eq!(a.drift(&b), 2.);
    }
    #[test]
    fn absorb_then_divide_is_mean() {
        let a = Point::from(vec![1., 2.]);
        let b = Point::from(vec![3., 6.]);
        let mean = a.identity().absorb(&a).absorb(&b).divide(2.);
        assert_eq!(mean, Point::from(vec![2., 4.]));
    }
    #[test]
    fn display_lists_coordinates() {
        assert_eq!(Point::from(vec![1., 2.5]).to_string(), "[1, 2.5]");
    }
}
