//! Bounding sphere.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real};
use crate::utils;
use na;

/// A Bounding Sphere.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingSphere {
    /// The center of the sphere.
    pub center: Point<Real>,
    /// The radius of the sphere.
    pub radius: Real,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    pub fn new(center: Point<Real>, radius: Real) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// The bounding sphere center.
    #[inline]
    pub fn center(&self) -> &Point<Real> {
        &self.center
    }

    /// The bounding sphere radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Is `point` strictly inside of this sphere?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        utils::sqr_metric(point, &self.center) < self.radius * self.radius
    }

    /// Grows this sphere so that it encloses `other` too.
    ///
    /// If `self` already contains `other` it is left untouched. If `other` contains `self`
    /// it replaces `self`. Otherwise the result is the smallest sphere enclosing both: its
    /// radius is `(r1 + r2 + d) / 2` and its center lies on the segment joining both
    /// centers.
    ///
    /// Returns `true` if `self` was modified.
    pub fn enclose(&mut self, other: &BoundingSphere) -> bool {
        let dist = na::distance(&self.center, &other.center);

        if dist == 0.0 {
            if other.radius > self.radius {
                self.radius = other.radius;
                return true;
            }

            return false;
        }

        // Position of the new center on the segment [other.center, self.center].
        let crit = (1.0 + (self.radius - other.radius) / dist) / 2.0;

        if crit < 0.0 {
            *self = *other;
            true
        } else if crit < 1.0 {
            self.radius = (self.radius + other.radius + dist) / 2.0;
            self.center = other.center + (self.center - other.center) * crit;
            true
        } else {
            false
        }
    }
}

impl BoundingVolume for BoundingSphere {
    #[inline]
    fn intersects(&self, other: &BoundingSphere) -> bool {
        let delta_pos = other.center - self.center;
        let distance_squared = delta_pos.norm_squared();
        let sum_radius = self.radius + other.radius;

        distance_squared <= sum_radius * sum_radius
    }

    #[inline]
    fn contains(&self, other: &BoundingSphere) -> bool {
        let delta_pos = other.center - self.center;
        let distance = delta_pos.norm();

        distance + other.radius <= self.radius
    }

    #[inline]
    fn merge(&mut self, other: &BoundingSphere) {
        let _ = self.enclose(other);
    }

    #[inline]
    fn merged(&self, other: &BoundingSphere) -> BoundingSphere {
        let mut res = *self;
        let _ = res.enclose(other);
        res
    }

    #[inline]
    fn loosened(&self, amount: Real) -> BoundingSphere {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        BoundingSphere::new(self.center, self.radius + amount)
    }
}
