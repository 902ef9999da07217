use super::{Octree, OctreeNode, MAX_DOTS};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real};
use crate::utils;
use crate::voxel::VoxelGrid;

impl Octree {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if:
    /// - every voxel is expressed in canonical form on the grid and appears only once,
    /// - every non-empty node stores the exact AABB of its content,
    /// - sparse leaves hold between 1 and [`MAX_DOTS`] voxels and are not dense,
    /// - dense leaves are grid-aligned blocks of at least 2 voxels,
    /// - inner nodes have a center on the grid, more than [`MAX_DOTS`] voxels, an accurate
    ///   voxel count, and each child lies entirely in its own octant.
    ///
    /// This is mostly a utility for debugging and testing.
    pub fn assert_well_formed(&self) {
        let _ = assert_node_well_formed(&self.grid, &self.root);
    }
}

fn assert_canonical(grid: &VoxelGrid, pt: &Point<Real>) {
    assert_eq!(
        grid.snap_down(pt),
        *pt,
        "Point {pt:?} is not on the voxel grid."
    );
}

/// Checks the subtree rooted at `node` and returns its voxel count.
fn assert_node_well_formed(grid: &VoxelGrid, node: &OctreeNode) -> u64 {
    match node {
        OctreeNode::Empty => 0,
        OctreeNode::SparseLeaf { aabb, voxels } => {
            assert!(!voxels.is_empty(), "Empty sparse leaf.");

            for (i, voxel) in voxels.iter().enumerate() {
                assert_canonical(grid, voxel);
                assert!(
                    !voxels[i + 1..].contains(voxel),
                    "Voxel {voxel:?} stored twice."
                );
            }

            assert_eq!(*aabb, grid.voxels_aabb(voxels.iter()));

            if voxels.len() > 1 {
                assert!(
                    !grid.is_dense(aabb, voxels.len() as u64),
                    "Dense sparse leaf."
                );
            }

            voxels.len() as u64
        }
        OctreeNode::DenseLeaf { aabb } => {
            assert_canonical(grid, &aabb.mins);
            assert_canonical(grid, &aabb.maxs);
            let count = grid.cell_count(aabb);
            assert!(count > 1, "Dense leaf with {count} voxel.");
            count
        }
        OctreeNode::Inner(inner) => {
            assert_canonical(grid, &inner.center);

            let mut count = 0;
            let mut aabb = Aabb::new_invalid();

            for (subspace, child) in inner.children.iter().enumerate() {
                count += assert_node_well_formed(grid, child);

                if let Some(child_aabb) = child.aabb() {
                    let octant = inner
                        .aabb
                        .subspace_box(&inner.center, subspace as u8)
                        .expect("Non-empty child outside of the AABB of its parent.");
                    assert!(
                        octant.contains(child_aabb),
                        "Child {subspace} is not in its octant."
                    );
                    assert_eq!(
                        utils::subspace_index(&inner.center, &child_aabb.mins),
                        subspace as u8
                    );
                    aabb.merge(child_aabb);
                }
            }

            assert_eq!(count, inner.voxel_count);
            assert!(count > MAX_DOTS as u64, "Inner node with {count} voxels.");
            assert_eq!(aabb, inner.aabb);
            count
        }
    }
}
