/// Trait for k-means centroid computation via incremental aggregation.
///
/// Balanced centroids are never averaged by observed counts: points are
/// folded into a running sum with [`Absorb::absorb`] and the sum is divided
/// by the cluster's fixed target size afterwards.
///
/// # Required Methods
///
/// - `identity()` — Returns the neutral element for absorption
/// - `absorb()` — Combines two points into one (associative, commutative)
/// - `divide()` — Divides every coordinate by a constant
pub trait Absorb: Sized {
    /// Returns the identity element (the zero vector of matching dimension).
    fn identity(&self) -> Self;
    /// Combines this point with another, producing their sum.
    fn absorb(self, other: &Self) -> Self;
    /// Divides by a scalar.
    fn divide(self, divisor: crate::Coordinate) -> Self;
}
