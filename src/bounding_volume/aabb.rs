//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, Vector, DIM};
use na;
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners. Octree nodes store the AABB
/// exactly bounding the cells of their voxels, and a voxel cell is itself the AABB
/// `[voxel, voxel + voxel_size]`.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxtrees3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
///
/// assert!(aabb.contains_local_point(&Point3::new(2.0, 1.0, 0.0)));
/// assert!(!aabb.contains_voxel(&Point3::new(2.0, 1.0, 0.0)));
/// assert_eq!(aabb.center(), Point3::new(1.0, 1.0, 1.0));
/// # }
/// ```
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::MAX` and `maxs`components set to `-Real::MAX`.
    ///
    /// This is often used as the initial values of some AABB merging algorithms.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The volume of this AABB.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// Does this AABB contains a point expressed in the same coordinate frame as `self`?
    ///
    /// Points on the boundary are contained.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Does this AABB contain the cell whose minimal corner is `voxel`?
    ///
    /// This is a half-open test: `mins <= voxel < maxs` on every axis, so a voxel lying on the
    /// maximum faces belongs to the neighboring box.
    #[inline]
    pub fn contains_voxel(&self, voxel: &Point<Real>) -> bool {
        for i in 0..DIM {
            if voxel[i] < self.mins[i] || voxel[i] >= self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Clamps `point` into this AABB.
    ///
    /// Returns the clamped point and `true` if no clamping occurred.
    #[inline]
    pub fn fit_point(&self, point: &Point<Real>) -> (Point<Real>, bool) {
        let mut res = *point;
        let mut inside = true;

        for i in 0..DIM {
            if point[i] < self.mins[i] {
                res[i] = self.mins[i];
                inside = false;
            } else if point[i] > self.maxs[i] {
                res[i] = self.maxs[i];
                inside = false;
            }
        }

        (res, inside)
    }

    /// The part of this AABB lying in the octant `subspace` around `center`.
    ///
    /// Bit `i` of `subspace` selects the side `>= center[i]` of axis `i`. Returns `None` if
    /// this AABB does not reach that octant.
    pub fn subspace_box(&self, center: &Point<Real>, subspace: u8) -> Option<Aabb> {
        let mut res = *self;

        for i in 0..DIM {
            if subspace & (1 << i) != 0 {
                res.mins[i] = res.mins[i].max(center[i]);
            } else {
                res.maxs[i] = res.maxs[i].min(center[i]);
            }

            if res.mins[i] > res.maxs[i] {
                return None;
            }
        }

        Some(res)
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Aabb {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }
}
