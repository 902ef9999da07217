use super::octree_build::build_node;
use super::octree_insert::LARGE_DENSE_BLOCK;
use super::{Octree, OctreeNode, MAX_DOTS};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real};
use crate::utils;
use crate::voxel::VoxelGrid;

impl Octree {
    /// Removes the voxel containing `point` from this tree.
    ///
    /// Returns `false` if that voxel was not part of the tree, in which case the tree is left
    /// unchanged.
    pub fn remove(&mut self, point: &Point<Real>) -> bool {
        let voxel = self.grid.snap_down(point);
        remove_voxel(&self.grid, &mut self.root, &voxel)
    }
}

fn remove_voxel(grid: &VoxelGrid, node: &mut OctreeNode, voxel: &Point<Real>) -> bool {
    match node {
        OctreeNode::Empty => false,
        OctreeNode::SparseLeaf { voxels, .. } => {
            let Some(i) = voxels.iter().position(|v| v == voxel) else {
                return false;
            };

            let _ = voxels.swap_remove(i);
            // The remaining voxels may be empty, or dense.
            let mut remaining = voxels.clone();
            *node = build_node(grid, &mut remaining);
            true
        }
        OctreeNode::DenseLeaf { aabb } => {
            if !aabb.contains_voxel(voxel) {
                return false;
            }

            let mut points = grid.voxels_in(aabb);

            if points.len() > LARGE_DENSE_BLOCK {
                log::debug!(
                    "Expanding a dense block of {} voxels to remove {:?}.",
                    points.len(),
                    voxel
                );
            }

            points.retain(|v| v != voxel);
            *node = build_node(grid, &mut points);
            true
        }
        OctreeNode::Inner(inner) => {
            let subspace = utils::subspace_index(&inner.center, voxel) as usize;

            if !remove_voxel(grid, &mut inner.children[subspace], voxel) {
                return false;
            }

            inner.voxel_count -= 1;

            if inner.voxel_count <= MAX_DOTS as u64 {
                let mut points = Vec::with_capacity(MAX_DOTS);

                for child in &inner.children {
                    child.collect_voxels(grid, &mut points);
                }

                *node = build_node(grid, &mut points);
            } else {
                inner.aabb = inner
                    .children
                    .iter()
                    .filter_map(|child| child.aabb())
                    .fold(Aabb::new_invalid(), |acc, aabb| acc.merged(aabb));
            }

            true
        }
    }
}
