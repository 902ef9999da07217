use super::{Octree, OctreeNode, MAX_DOTS};
use crate::math::{Real, NUM_SUBSPACES};
use crate::voxel::VoxelGrid;

impl Octree {
    /// The length of the longest path from the root to a non-empty leaf.
    ///
    /// A tree made of a single leaf has depth 0, an empty tree too.
    pub fn depth(&self) -> u32 {
        node_depth(&self.root)
    }

    /// The depth reached by descending, at each level `d`, into the child `d mod 8`.
    ///
    /// This samples a single root-to-leaf path in a cheap, deterministic way.
    pub fn inaccurate_depth(&self) -> u32 {
        let mut depth = 0;
        let mut node = &self.root;

        while let OctreeNode::Inner(inner) = node {
            node = &inner.children[depth as usize % NUM_SUBSPACES];
            depth += 1;
        }

        depth
    }

    /// An estimation of how well balanced this tree is.
    ///
    /// An ideal tree has all its leaves at the same depth, each holding `(1 + MAX_DOTS) / 2`
    /// voxels on average. The result is the ratio between [`Octree::inaccurate_depth`] and the
    /// depth of such an ideal tree with the same number of voxels: a balanced tree gives 1.
    /// Trees too small to be split give `None`.
    pub fn balanceness(&self) -> Option<Real> {
        let n = self.voxel_count() as f64;
        let ideal_leaves = 2.0 * n / (1 + MAX_DOTS) as f64;
        let expected = (ideal_leaves.ln() / (NUM_SUBSPACES as f64).ln()).ceil();

        if expected > 0.0 {
            Some(self.inaccurate_depth() as Real / expected as Real)
        } else {
            None
        }
    }

    /// The ratio between the volume of the voxels and the volume of the AABB of this tree.
    ///
    /// Returns zero for an empty tree.
    pub fn fill_ratio(&self) -> Real {
        self.aabb()
            .map(|aabb| self.grid.fill_ratio(&aabb, self.voxel_count()))
            .unwrap_or(0.0)
    }

    /// The number of sparse leaves, dense leaves, and inner nodes of this tree.
    pub fn node_counts(&self) -> NodeCounts {
        let mut counts = NodeCounts::default();
        count_nodes(&self.grid, &self.root, &mut counts);
        counts
    }
}

/// Numbers of nodes of each kind in an [`Octree`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeCounts {
    /// Number of leaves listing their voxels.
    pub sparse_leaves: usize,
    /// Number of leaves filled with voxels.
    pub dense_leaves: usize,
    /// Number of voxels stored in dense leaves.
    pub dense_voxels: u64,
    /// Number of inner nodes.
    pub inner_nodes: usize,
}

fn node_depth(node: &OctreeNode) -> u32 {
    match node {
        OctreeNode::Inner(inner) => 1 + inner.children.iter().map(node_depth).max().unwrap_or(0),
        _ => 0,
    }
}

fn count_nodes(grid: &VoxelGrid, node: &OctreeNode, counts: &mut NodeCounts) {
    match node {
        OctreeNode::Empty => {}
        OctreeNode::SparseLeaf { .. } => counts.sparse_leaves += 1,
        OctreeNode::DenseLeaf { aabb } => {
            counts.dense_leaves += 1;
            counts.dense_voxels += grid.cell_count(aabb);
        }
        OctreeNode::Inner(inner) => {
            counts.inner_nodes += 1;

            for child in &inner.children {
                count_nodes(grid, child, counts);
            }
        }
    }
}
