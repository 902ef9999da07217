use super::{Octree, OctreeNode};
use crate::math::{Point, Real};
use crate::query;
use crate::utils;
use crate::voxel::VoxelGrid;

impl Octree {
    /// Is the voxel containing `point` part of this tree?
    pub fn contains_voxel(&self, point: &Point<Real>) -> bool {
        let voxel = self.grid.snap_down(point);
        contains_voxel(&self.root, &voxel)
    }

    /// Does any voxel cell of this tree intersect the ball with the given center and radius?
    ///
    /// A ball only touching a cell does not intersect it.
    pub fn intersects_ball(&self, center: &Point<Real>, radius: Real) -> bool {
        intersects_ball(&self.grid, &self.root, center, radius)
    }

    /// All the voxels of this tree, in no particular order.
    pub fn voxels(&self) -> Vec<Point<Real>> {
        let mut res = Vec::new();
        self.root.collect_voxels(&self.grid, &mut res);
        res
    }
}

fn contains_voxel(node: &OctreeNode, voxel: &Point<Real>) -> bool {
    match node {
        OctreeNode::Empty => false,
        OctreeNode::SparseLeaf { aabb, voxels } => {
            aabb.contains_voxel(voxel) && voxels.contains(voxel)
        }
        OctreeNode::DenseLeaf { aabb } => aabb.contains_voxel(voxel),
        OctreeNode::Inner(inner) => {
            inner.aabb.contains_voxel(voxel)
                && contains_voxel(
                    &inner.children[utils::subspace_index(&inner.center, voxel) as usize],
                    voxel,
                )
        }
    }
}

fn intersects_ball(
    grid: &VoxelGrid,
    node: &OctreeNode,
    center: &Point<Real>,
    radius: Real,
) -> bool {
    let Some(aabb) = node.aabb() else {
        return false;
    };

    if !query::intersection_test_aabb_ball(aabb, center, radius) {
        return false;
    }

    match node {
        OctreeNode::Empty => false,
        OctreeNode::DenseLeaf { .. } => true,
        OctreeNode::SparseLeaf { voxels, .. } => voxels
            .iter()
            .any(|v| query::intersection_test_aabb_ball(&grid.cell(v), center, radius)),
        OctreeNode::Inner(inner) => inner
            .children
            .iter()
            .any(|child| intersects_ball(grid, child, center, radius)),
    }
}
