
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// Computes the AABB of a set of points.
///
/// An empty set yields [`Aabb::new_invalid`].
pub fn local_point_cloud_aabb<I>(pts: I) -> Aabb
where
    I: IntoIterator<Item = Point<Real>>,
{
    pts.into_iter().fold(Aabb::new_invalid(), |mut aabb, pt| {
        aabb.take_point(pt);
        aabb
    })
}

/// Computes the AABB covering the cells of a set of voxels.
///
/// Voxels are minimal cell corners, so the maximum corner of the point cloud AABB is padded
/// by `voxel_size`.
pub fn point_cloud_voxel_aabb<'a, I>(pts: I, voxel_size: &Vector<Real>) -> Aabb
where
    I: IntoIterator<Item = &'a Point<Real>>,
{
    let mut aabb = local_point_cloud_aabb(pts.into_iter().copied());
    aabb.maxs += *voxel_size;
    aabb
}
