use super::{InnerNode, Octree, OctreeNode, MAX_DOTS};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, DIM, NUM_SUBSPACES};
use crate::utils;
use crate::voxel::VoxelGrid;
use ordered_float::OrderedFloat;

impl Octree {
    /// Builds an octree containing the cells of all the given points.
    ///
    /// Every point is snapped down to the minimal corner of the cell containing it, and
    /// duplicates are discarded.
    pub fn new(grid: VoxelGrid, mut points: Vec<Point<Real>>) -> Self {
        for pt in points.iter_mut() {
            *pt = grid.snap_down(pt);
        }

        points.sort_unstable_by_key(|pt| {
            [OrderedFloat(pt.x), OrderedFloat(pt.y), OrderedFloat(pt.z)]
        });
        points.dedup();

        let root = build_node(&grid, &mut points);
        Self { grid, root }
    }

    /// Builds an octree made of a single block of voxels filling `aabb`.
    ///
    /// The AABB is enlarged to the smallest grid-aligned AABB containing it.
    pub fn from_dense_box(grid: VoxelGrid, aabb: &Aabb) -> Self {
        let aabb = Aabb::new(grid.snap_down(&aabb.mins), grid.snap_up(&aabb.maxs));
        let root = match grid.cell_count(&aabb) {
            0 => OctreeNode::Empty,
            1 => OctreeNode::SparseLeaf {
                aabb,
                voxels: core::iter::once(aabb.mins).collect(),
            },
            _ => OctreeNode::DenseLeaf { aabb },
        };

        Self { grid, root }
    }

    /// Builds a new octree from the voxels of this one.
    ///
    /// Incremental insertions and removals do not rebalance the tree. Rebuilding it after many
    /// modifications restores the layout of a bulk-built tree.
    pub fn rebuild(&self) -> Octree {
        let mut points = self.voxels();
        let root = build_node(&self.grid, &mut points);
        Octree {
            grid: self.grid,
            root,
        }
    }
}

/// Builds the subtree containing `points`.
///
/// The points must be distinct, and expressed in canonical form on `grid`. They are reordered
/// in-place.
pub(super) fn build_node(grid: &VoxelGrid, points: &mut [Point<Real>]) -> OctreeNode {
    let n = points.len();

    if n == 0 {
        return OctreeNode::Empty;
    }

    let aabb = grid.voxels_aabb(points.iter());

    if n > 1 && grid.is_dense(&aabb, n as u64) {
        return OctreeNode::DenseLeaf { aabb };
    }

    if n <= MAX_DOTS {
        return OctreeNode::SparseLeaf {
            aabb,
            voxels: points.iter().copied().collect(),
        };
    }

    let center = split_center(grid, &aabb, points);
    let mut children: [OctreeNode; NUM_SUBSPACES] = Default::default();
    let mut offset = 0;

    for (subspace, child) in children.iter_mut().enumerate() {
        let end = partition_subspace(points, offset, subspace as u8, &center);
        assert!(
            end - offset < n,
            "Octree subdivision did not split the voxels around {center:?}."
        );
        *child = build_node(grid, &mut points[offset..end]);
        offset = end;
    }

    OctreeNode::Inner(Box::new(InnerNode {
        aabb,
        center,
        voxel_count: n as u64,
        children,
    }))
}

/// The centroid of `points` rounded up to the grid.
///
/// On every axis where the points are not all equal, the center is clamped so that at least
/// one voxel lies on each side of the dividing plane.
fn split_center(grid: &VoxelGrid, aabb: &Aabb, points: &[Point<Real>]) -> Point<Real> {
    let mut center = grid.snap_up(&utils::center(points));
    let lowest = grid.next_corner(&aabb.mins);
    let highest = grid.snap_down(&(aabb.maxs - grid.size() * 0.5));

    for i in 0..DIM {
        if highest[i] >= lowest[i] {
            center[i] = center[i].max(lowest[i]).min(highest[i]);
        }
    }

    center
}

/// Moves the points of `points[offset..]` lying in `subspace` to the front of that range.
///
/// Returns the end of the moved range.
fn partition_subspace(
    points: &mut [Point<Real>],
    offset: usize,
    subspace: u8,
    center: &Point<Real>,
) -> usize {
    let mut counter = offset;

    for i in offset..points.len() {
        if utils::subspace_index(center, &points[i]) == subspace {
            points.swap(counter, i);
            counter += 1;
        }
    }

    counter
}
