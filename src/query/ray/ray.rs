//! Traits and structure needed to cast rays.

use crate::math::{Point, Real, Vector};

/// A ray for ray-casting queries.
///
/// A ray is a half-infinite line starting at an origin point and extending
/// infinitely in a direction. The direction does not need to be normalized.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxtrees3d::query::Ray;
/// use nalgebra::{Point3, Vector3};
///
/// let ray = Ray::new(Point3::new(0.0, 10.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
/// assert_eq!(ray.point_at(4.0), Point3::new(0.0, 6.0, 0.0));
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray starting from `origin` and with the direction `dir`.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// The same ray, starting from another point.
    ///
    /// Used when a traversal continues from the point where the ray entered a node.
    #[inline]
    pub fn with_origin(&self, origin: Point<Real>) -> Ray {
        Ray {
            origin,
            dir: self.dir,
        }
    }

    /// Computes the point at the given parameter on this ray.
    ///
    /// This is the same as `self.origin + self.dir * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}
