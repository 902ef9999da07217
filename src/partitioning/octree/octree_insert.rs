use super::octree_build::build_node;
use super::{Octree, OctreeNode};
use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real};
use crate::utils;
use crate::voxel::VoxelGrid;

/// Dense blocks with more voxels than this are logged when an insertion or a removal has to
/// expand them into an explicit subtree.
pub(super) const LARGE_DENSE_BLOCK: usize = 4096;

impl Octree {
    /// Inserts the voxel containing `point` into this tree.
    ///
    /// Returns `false` if that voxel was already part of the tree, in which case the tree is
    /// left unchanged.
    pub fn insert(&mut self, point: Point<Real>) -> bool {
        let voxel = self.grid.snap_down(&point);
        insert_voxel(&self.grid, &mut self.root, voxel)
    }
}

fn insert_voxel(grid: &VoxelGrid, node: &mut OctreeNode, voxel: Point<Real>) -> bool {
    match node {
        OctreeNode::Empty => {
            *node = OctreeNode::SparseLeaf {
                aabb: grid.cell(&voxel),
                voxels: core::iter::once(voxel).collect(),
            };
            true
        }
        OctreeNode::SparseLeaf { aabb, voxels } => {
            if voxels.contains(&voxel) {
                return false;
            }

            if voxels.try_push(voxel).is_ok() {
                aabb.merge(&grid.cell(&voxel));

                if grid.is_dense(aabb, voxels.len() as u64) {
                    *node = OctreeNode::DenseLeaf { aabb: *aabb };
                }
            } else {
                // The leaf is full, split it.
                let mut points = voxels.to_vec();
                points.push(voxel);
                *node = build_node(grid, &mut points);
            }

            true
        }
        OctreeNode::DenseLeaf { aabb } => {
            if aabb.contains_voxel(&voxel) {
                return false;
            }

            let merged = aabb.merged(&grid.cell(&voxel));

            if grid.is_dense(&merged, grid.cell_count(aabb) + 1) {
                *aabb = merged;
            } else {
                let mut points = grid.voxels_in(aabb);

                if points.len() > LARGE_DENSE_BLOCK {
                    log::debug!(
                        "Expanding a dense block of {} voxels to insert {:?}.",
                        points.len(),
                        voxel
                    );
                }

                points.push(voxel);
                *node = build_node(grid, &mut points);
            }

            true
        }
        OctreeNode::Inner(inner) => {
            let subspace = utils::subspace_index(&inner.center, &voxel) as usize;

            if !insert_voxel(grid, &mut inner.children[subspace], voxel) {
                return false;
            }

            inner.aabb.merge(&grid.cell(&voxel));
            inner.voxel_count += 1;
            true
        }
    }
}
