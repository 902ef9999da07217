use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, NUM_SUBSPACES};
use crate::voxel::VoxelGrid;
use arrayvec::ArrayVec;

/// Maximum number of voxels stored explicitly in a sparse leaf.
pub const MAX_DOTS: usize = 7;

/// Expected maximum depth of an octree.
///
/// This is the inline capacity of the root-to-leaf paths recorded by ray casts. Deeper trees
/// are supported, their paths just spill to the heap.
pub const MAX_DEPTH: usize = 15;

/// A node of an [`Octree`].
///
/// Every non-empty node stores the AABB exactly bounding the cells of its voxels.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum OctreeNode {
    /// A region without any voxel.
    #[default]
    Empty,
    /// A leaf storing up to [`MAX_DOTS`] voxels explicitly.
    SparseLeaf {
        /// The AABB of the cells of `voxels`.
        aabb: Aabb,
        /// The voxels of this leaf, in no particular order.
        voxels: ArrayVec<Point<Real>, MAX_DOTS>,
    },
    /// A leaf whose AABB is entirely filled with voxels.
    ///
    /// The voxels are implicit: one per grid cell of `aabb`.
    DenseLeaf {
        /// The grid-aligned AABB filled by this leaf.
        aabb: Aabb,
    },
    /// A node splitting its voxels into eight octants.
    Inner(Box<InnerNode>),
}

/// An inner node of an [`Octree`].
#[derive(Clone, Debug, PartialEq)]
pub struct InnerNode {
    /// The union of the AABBs of the non-empty children.
    pub aabb: Aabb,
    /// The split point. It lies on the voxel grid so no voxel cell straddles a dividing plane.
    pub center: Point<Real>,
    /// Total number of voxels in this subtree. Always greater than [`MAX_DOTS`].
    pub voxel_count: u64,
    /// Child `i` holds the voxels `v` such that `subspace_index(center, v) == i`.
    pub children: [OctreeNode; NUM_SUBSPACES],
}

impl OctreeNode {
    /// The AABB of this node, `None` if it is empty.
    #[inline]
    pub fn aabb(&self) -> Option<&Aabb> {
        match self {
            OctreeNode::Empty => None,
            OctreeNode::SparseLeaf { aabb, .. } | OctreeNode::DenseLeaf { aabb } => Some(aabb),
            OctreeNode::Inner(inner) => Some(&inner.aabb),
        }
    }

    /// Is this node empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, OctreeNode::Empty)
    }

    /// Is this node a sparse or a dense leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            OctreeNode::SparseLeaf { .. } | OctreeNode::DenseLeaf { .. }
        )
    }

    /// The children of this node if it is an inner node.
    #[inline]
    pub fn children(&self) -> Option<&[OctreeNode; NUM_SUBSPACES]> {
        match self {
            OctreeNode::Inner(inner) => Some(&inner.children),
            _ => None,
        }
    }

    /// The number of voxels in the subtree rooted at this node.
    ///
    /// The `grid` must be the one of the tree containing this node.
    pub fn voxel_count(&self, grid: &VoxelGrid) -> u64 {
        match self {
            OctreeNode::Empty => 0,
            OctreeNode::SparseLeaf { voxels, .. } => voxels.len() as u64,
            OctreeNode::DenseLeaf { aabb } => grid.cell_count(aabb),
            OctreeNode::Inner(inner) => inner.voxel_count,
        }
    }

    /// Appends every voxel of the subtree rooted at this node to `out`.
    pub fn collect_voxels(&self, grid: &VoxelGrid, out: &mut Vec<Point<Real>>) {
        match self {
            OctreeNode::Empty => {}
            OctreeNode::SparseLeaf { voxels, .. } => out.extend_from_slice(voxels),
            OctreeNode::DenseLeaf { aabb } => out.extend(grid.voxels_in(aabb)),
            OctreeNode::Inner(inner) => {
                for child in &inner.children {
                    child.collect_voxels(grid, out);
                }
            }
        }
    }
}

/// A sparse voxel octree.
///
/// The octree stores a set of occupied cells (voxels) of a regular [`VoxelGrid`]. Leaves
/// either list up to [`MAX_DOTS`] voxels explicitly, or represent a fully occupied
/// block implicitly. Inner nodes split their content into eight octants around a center
/// lying on the grid.
///
/// The grid is captured when the tree is created. Every point given to the tree is first
/// snapped down to the minimal corner of the cell containing it.
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxtrees3d::partitioning::Octree;
/// use voxtrees3d::query::Ray;
/// use voxtrees3d::voxel::VoxelGrid;
/// use nalgebra::{Point3, Vector3};
///
/// let points = (0..20).map(|i| Point3::new(i as f32, 0.0, 0.0)).collect();
/// let mut tree = Octree::new(VoxelGrid::default(), points);
///
/// assert_eq!(tree.voxel_count(), 20);
/// assert!(tree.contains_voxel(&Point3::new(3.5, 0.5, 0.2)));
/// assert!(!tree.insert(Point3::new(4.0, 0.0, 0.0)));
/// assert!(tree.remove(&Point3::new(4.0, 0.0, 0.0)));
///
/// let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(tree.cast_ray(&ray), Some(Point3::new(0.0, 0.5, 0.5)));
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Octree {
    pub(super) grid: VoxelGrid,
    pub(super) root: OctreeNode,
}

impl Octree {
    /// An octree without any voxel.
    pub fn empty(grid: VoxelGrid) -> Self {
        Self {
            grid,
            root: OctreeNode::Empty,
        }
    }

    /// The voxel grid of this tree.
    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// The root node of this tree.
    #[inline]
    pub fn root(&self) -> &OctreeNode {
        &self.root
    }

    /// Does this tree contain no voxel?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The number of voxels in this tree.
    #[inline]
    pub fn voxel_count(&self) -> u64 {
        self.root.voxel_count(&self.grid)
    }

    /// The AABB of the cells of all the voxels of this tree, `None` if it is empty.
    #[inline]
    pub fn aabb(&self) -> Option<Aabb> {
        self.root.aabb().copied()
    }
}
