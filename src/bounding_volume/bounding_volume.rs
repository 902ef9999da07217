use crate::math::Real;

/// Operations shared by the bounding volumes of the trees.
///
/// Octree nodes are bounded by an [`Aabb`](crate::bounding_volume::Aabb) and M-tree nodes by a
/// [`BoundingSphere`](crate::bounding_volume::BoundingSphere). Both are updated in place when
/// an element is inserted below them.
pub trait BoundingVolume {
    /// Do this bounding volume and `other` share at least one point?
    fn intersects(&self, other: &Self) -> bool;

    /// Is `other` entirely inside of this bounding volume? Boundaries may touch.
    fn contains(&self, other: &Self) -> bool;

    /// Grows this bounding volume so it also encloses `other`.
    fn merge(&mut self, other: &Self);

    /// The smallest bounding volume of this kind enclosing both `self` and `other`, or an
    /// approximation of it.
    fn merged(&self, other: &Self) -> Self;

    /// A copy of this bounding volume enlarged by `amount` in every direction.
    ///
    /// Used to absorb rounding errors in inclusion tests.
    fn loosened(&self, amount: Real) -> Self;
}
