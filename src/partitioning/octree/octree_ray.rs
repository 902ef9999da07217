use super::{InnerNode, Octree, OctreeNode, MAX_DEPTH};
use crate::math::{Point, Real, DIM};
use crate::query::{self, Ray};
use crate::utils;
use crate::voxel::VoxelGrid;
use arrayvec::ArrayVec;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A root-to-leaf path recorded by a ray cast.
pub(super) type OctreePath<'a> = SmallVec<[&'a OctreeNode; MAX_DEPTH]>;

/// Options of an octree ray cast.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RayCastOptions {
    /// If set, the traversal stops at this depth (the root having depth 0) and reports the
    /// point where the ray enters the AABB of the node reached there.
    ///
    /// This trades precision for speed, for example for low-resolution previews.
    pub level_of_detail: Option<u32>,
}

impl RayCastOptions {
    /// Options stopping the traversal at the given depth.
    pub fn with_level_of_detail(level_of_detail: u32) -> Self {
        Self {
            level_of_detail: Some(level_of_detail),
        }
    }
}

/// The result of an octree ray cast.
#[derive(Copy, Clone, Debug)]
pub struct OctreeRayHit<'a> {
    /// The first point of the ray lying on an occupied cell.
    pub point: Point<Real>,
    /// The node where the hit was found.
    ///
    /// This is a leaf, unless the traversal was stopped by a level of detail.
    pub leaf: &'a OctreeNode,
}

impl Octree {
    /// Casts a ray on this tree.
    ///
    /// Returns the first point along the ray lying on the cell of a voxel of this tree.
    pub fn cast_ray(&self, ray: &Ray) -> Option<Point<Real>> {
        self.cast_ray_with_options(ray, &RayCastOptions::default())
    }

    /// Casts a ray on this tree with the given options.
    pub fn cast_ray_with_options(
        &self,
        ray: &Ray,
        options: &RayCastOptions,
    ) -> Option<Point<Real>> {
        self.cast_ray_and_get_leaf(ray, options).map(|hit| hit.point)
    }

    /// Casts a ray on this tree and also returns the node containing the hit.
    pub fn cast_ray_and_get_leaf(
        &self,
        ray: &Ray,
        options: &RayCastOptions,
    ) -> Option<OctreeRayHit<'_>> {
        let mut path = OctreePath::new();
        cast_ray_from(&self.grid, &self.root, 0, ray, options, &mut path)
    }
}

#[cfg(feature = "parallel")]
impl Octree {
    /// Casts a batch of rays on this tree, in parallel.
    ///
    /// The result at index `i` is the hit of `rays[i]`.
    pub fn cast_rays_parallel(
        &self,
        rays: &[Ray],
        options: &RayCastOptions,
    ) -> Vec<Option<Point<Real>>> {
        rays.par_iter()
            .map(|ray| self.cast_ray_with_options(ray, options))
            .collect()
    }
}

/// Casts a ray on the subtree rooted at `node`, lying at the given `depth` of the tree.
///
/// The nodes from `node` to the node containing the hit are appended to `path`. On a miss
/// `path` is left unchanged.
pub(super) fn cast_ray_from<'a>(
    grid: &VoxelGrid,
    node: &'a OctreeNode,
    depth: u32,
    ray: &Ray,
    options: &RayCastOptions,
    path: &mut OctreePath<'a>,
) -> Option<OctreeRayHit<'a>> {
    let len = path.len();
    path.push(node);

    let hit = cast_ray_on_node(grid, node, depth, ray, options, path);

    if hit.is_none() {
        path.truncate(len);
    }

    hit
}

fn cast_ray_on_node<'a>(
    grid: &VoxelGrid,
    node: &'a OctreeNode,
    depth: u32,
    ray: &Ray,
    options: &RayCastOptions,
    path: &mut OctreePath<'a>,
) -> Option<OctreeRayHit<'a>> {
    let entry = query::hit_box(node.aabb()?, ray)?;

    if options.level_of_detail.is_some_and(|lod| depth >= lod) {
        return Some(OctreeRayHit {
            point: entry,
            leaf: node,
        });
    }

    match node {
        OctreeNode::Empty => None,
        OctreeNode::DenseLeaf { .. } => Some(OctreeRayHit {
            point: entry,
            leaf: node,
        }),
        OctreeNode::SparseLeaf { voxels, .. } => {
            // Keep the hit closest to the ray origin.
            let mut closest: Option<(Real, Point<Real>)> = None;

            for voxel in voxels {
                if let Some(hit) = query::hit_box(&grid.cell(voxel), ray) {
                    let dist = utils::abs_metric(&ray.origin, &hit);

                    if closest.map_or(true, |(best, _)| dist < best) {
                        closest = Some((dist, hit));
                    }
                }
            }

            closest.map(|(_, point)| OctreeRayHit { point, leaf: node })
        }
        OctreeNode::Inner(inner) => {
            let entry_ray = ray.with_origin(entry);
            let subspace = utils::ray_subspace_index(&inner.center, &entry, &ray.dir);
            let touched = utils::touched_planes(&inner.center, &entry);

            // Try first the octants where the ray enters the node.
            if let Some(hit) = cast_ray_on_octants(
                grid,
                inner,
                subspace,
                touched,
                depth + 1,
                &entry_ray,
                options,
                path,
            ) {
                return Some(hit);
            }

            // Then follow the octants crossed by the ray, in the order the dividing planes
            // are crossed.
            let mut planes: ArrayVec<(Real, usize, Point<Real>), DIM> = ArrayVec::new();

            for axis in 0..DIM {
                if let Some(pt) =
                    query::hit_plane_within_box(&entry_ray, &inner.center, axis, &inner.aabb)
                {
                    planes.push((utils::abs_metric(&entry, &pt), axis, pt));
                }
            }

            planes.sort_by_key(|(dist, _, _)| OrderedFloat(*dist));

            for (_, axis, pt) in planes {
                let subspace = utils::ray_subspace_index(&inner.center, &pt, &ray.dir);
                // The octant behind the crossed plane was already tried.
                let touched = utils::touched_planes(&inner.center, &pt) & !(1 << axis);

                if let Some(hit) = cast_ray_on_octants(
                    grid,
                    inner,
                    subspace,
                    touched,
                    depth + 1,
                    &ray.with_origin(pt),
                    options,
                    path,
                ) {
                    return Some(hit);
                }
            }

            None
        }
    }
}

/// Casts a ray on the children of `inner` whose closure contains the ray origin.
///
/// `subspace` is the octant the ray heads to. For each bit of `touched`, the ray origin lies
/// on the corresponding dividing plane and the octant on the other side is tried as well:
/// its cells may touch the ray there, or all along the plane if the ray runs on it. The hit
/// closest to the ray origin wins.
#[allow(clippy::too_many_arguments)]
fn cast_ray_on_octants<'a>(
    grid: &VoxelGrid,
    inner: &'a InnerNode,
    subspace: u8,
    touched: u8,
    depth: u32,
    ray: &Ray,
    options: &RayCastOptions,
    path: &mut OctreePath<'a>,
) -> Option<OctreeRayHit<'a>> {
    if touched == 0 {
        return cast_ray_from(
            grid,
            &inner.children[subspace as usize],
            depth,
            ray,
            options,
            path,
        );
    }

    let mut closest: Option<(Real, OctreeRayHit<'a>, OctreePath<'a>)> = None;
    let mut flip: u8 = 0;

    // Enumerates the subsets of `touched`, starting with the empty one.
    loop {
        let mut sub_path = OctreePath::new();
        let child = &inner.children[(subspace ^ flip) as usize];

        if let Some(hit) = cast_ray_from(grid, child, depth, ray, options, &mut sub_path) {
            let dist = utils::abs_metric(&ray.origin, &hit.point);

            if closest.as_ref().map_or(true, |(best, _, _)| dist < *best) {
                closest = Some((dist, hit, sub_path));
            }
        }

        flip = flip.wrapping_sub(touched) & touched;

        if flip == 0 {
            break;
        }
    }

    closest.map(|(_, hit, sub_path)| {
        path.extend(sub_path);
        hit
    })
}
