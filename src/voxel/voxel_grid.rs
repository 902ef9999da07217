use crate::bounding_volume::details::point_cloud_voxel_aabb;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use na;

/// Relative tolerance under which a coordinate is considered to lie on a grid plane.
///
/// Coordinates computed as `i * size` may not divide back exactly to `i`.
const SNAP_TOLERANCE: Real = 1.0e-4;

/// A regular grid of voxels.
///
/// The grid has one corner at the origin and cells of size [`VoxelGrid::size`]. A voxel is
/// identified by the minimal corner of its cell. All the points stored in a tree are
/// expressed in the canonical form `i * size` (component-wise, with `i` an integer) produced
/// by [`VoxelGrid::snap_down`], so that voxels can be compared exactly.
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxtrees3d::voxel::VoxelGrid;
/// use nalgebra::{Point3, Vector3};
///
/// let grid = VoxelGrid::new(Vector3::new(1.0, 2.0, 0.5));
///
/// assert_eq!(grid.snap_down(&Point3::new(1.5, 3.9, -0.2)), Point3::new(1.0, 2.0, -0.5));
/// assert_eq!(grid.snap_up(&Point3::new(1.5, 3.9, -0.2)), Point3::new(2.0, 4.0, 0.0));
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelGrid {
    size: Vector<Real>,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new(Vector::repeat(1.0))
    }
}

impl VoxelGrid {
    /// Creates a grid with cells of the given size.
    ///
    /// # Panics
    ///
    /// Panics if a component of `size` is not strictly positive.
    pub fn new(size: Vector<Real>) -> Self {
        assert!(
            size.iter().all(|s| *s > 0.0),
            "The voxel size must be strictly positive."
        );
        Self { size }
    }

    /// The size of a voxel.
    #[inline]
    pub fn size(&self) -> &Vector<Real> {
        &self.size
    }

    /// The volume of a single voxel.
    #[inline]
    pub fn cell_volume(&self) -> Real {
        self.size.x * self.size.y * self.size.z
    }

    /// The minimal corner of the cell containing `point`.
    #[inline]
    pub fn snap_down(&self, point: &Point<Real>) -> Point<Real> {
        point
            .coords
            .zip_map(&self.size, |x, s| grid_floor(x / s) * s)
            .into()
    }

    /// The smallest grid point greater than or equal to `point` on each axis.
    #[inline]
    pub fn snap_up(&self, point: &Point<Real>) -> Point<Real> {
        point
            .coords
            .zip_map(&self.size, |x, s| grid_ceil(x / s) * s)
            .into()
    }

    /// The minimal corner of the cell following `voxel` on every axis.
    #[inline]
    pub fn next_corner(&self, voxel: &Point<Real>) -> Point<Real> {
        voxel
            .coords
            .zip_map(&self.size, |x, s| (grid_floor(x / s) + 1.0) * s)
            .into()
    }

    /// The cell whose minimal corner is `voxel`.
    #[inline]
    pub fn cell(&self, voxel: &Point<Real>) -> Aabb {
        Aabb::new(*voxel, self.next_corner(voxel))
    }

    /// The AABB covering the cells of all the given voxels.
    ///
    /// The set of voxels must not be empty.
    pub fn voxels_aabb<'a, I>(&self, voxels: I) -> Aabb
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut aabb = point_cloud_voxel_aabb(voxels, &self.size);
        debug_assert!(na::partial_le(&aabb.mins, &aabb.maxs), "Empty set of voxels.");
        aabb.maxs = self.snap_down(&aabb.maxs);
        aabb
    }

    /// The number of cells along each axis of a grid-aligned AABB.
    #[inline]
    pub fn cell_dims(&self, aabb: &Aabb) -> [u64; DIM] {
        let mut res = [0; DIM];

        for (i, dim) in res.iter_mut().enumerate() {
            let cells = (aabb.maxs[i] - aabb.mins[i]) / self.size[i];
            debug_assert!(
                (cells - cells.round()).abs() < SNAP_TOLERANCE * cells.max(1.0),
                "The AABB is not aligned on the voxel grid."
            );
            *dim = cells.round().max(0.0) as u64;
        }

        res
    }

    /// The number of cells of a grid-aligned AABB.
    #[inline]
    pub fn cell_count(&self, aabb: &Aabb) -> u64 {
        self.cell_dims(aabb).iter().product()
    }

    /// Are `n` distinct voxels enough to fill every cell of `aabb`?
    #[inline]
    pub fn is_dense(&self, aabb: &Aabb, n: u64) -> bool {
        self.cell_count(aabb) == n
    }

    /// The ratio between the volume of `n` voxels and the volume of `aabb`.
    pub fn fill_ratio(&self, aabb: &Aabb, n: u64) -> Real {
        n as Real * self.cell_volume() / aabb.volume()
    }

    /// Lists every voxel of a grid-aligned AABB, in canonical form.
    pub fn voxels_in(&self, aabb: &Aabb) -> Vec<Point<Real>> {
        let dims = self.cell_dims(aabb);
        let first = aabb.mins.coords.zip_map(&self.size, |x, s| grid_floor(x / s));
        let mut res = Vec::with_capacity(dims.iter().product::<u64>() as usize);

        for i in 0..dims[0] {
            for j in 0..dims[1] {
                for k in 0..dims[2] {
                    let index = first + Vector::new(i as Real, j as Real, k as Real);
                    res.push(index.component_mul(&self.size).into());
                }
            }
        }

        res
    }
}

/// Rounds `q` down to an integer, treating values within tolerance of an integer as equal to it.
#[inline]
fn grid_floor(q: Real) -> Real {
    let r = q.round();

    if (q - r).abs() < SNAP_TOLERANCE {
        r
    } else {
        q.floor()
    }
}

#[inline]
fn grid_ceil(q: Real) -> Real {
    let r = q.round();

    if (q - r).abs() < SNAP_TOLERANCE {
        r
    } else {
        q.ceil()
    }
}
