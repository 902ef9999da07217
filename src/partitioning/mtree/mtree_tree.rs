use crate::bounding_volume::{BoundingSphere, BoundingVolume};
use crate::math::{Point, Real};
use crate::utils;
use arrayvec::ArrayVec;
use slab::Slab;

/// Maximum number of entries of an M-tree node.
pub const MTREE_MAX_CHILDREN: usize = 9;

/// Entries a node can hold: one more than [`MTREE_MAX_CHILDREN`] so an overflowing node can be
/// filled before being split.
pub(super) const NODE_CAPACITY: usize = MTREE_MAX_CHILDREN + 1;

/// Relative tolerance on the radius of bounding spheres when checking they contain a point.
///
/// Bounding spheres are merged incrementally and may lose a few ulps on the way.
const BOUNDING_TOLERANCE: Real = 1.0e-4;

/// A sphere stored in an [`MTree`], with some user data.
///
/// Two spheres are the same element of a tree if they have the same center and the same
/// radius. The data is not part of that identity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere<T = ()> {
    /// The center of the sphere.
    pub center: Point<Real>,
    /// The radius of the sphere.
    pub radius: Real,
    /// The user data associated to this sphere.
    pub data: T,
}

impl Sphere {
    /// A sphere without data.
    pub fn new(center: Point<Real>, radius: Real) -> Self {
        Self::with_data(center, radius, ())
    }
}

impl<T> Sphere<T> {
    /// A sphere carrying `data`.
    pub fn with_data(center: Point<Real>, radius: Real, data: T) -> Self {
        Self {
            center,
            radius,
            data,
        }
    }

    /// The bounding volume of this sphere, i.e., the sphere itself.
    #[inline]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center, self.radius)
    }

    /// Is `point` strictly inside of this sphere?
    #[inline]
    pub fn contains_point(&self, point: &Point<Real>) -> bool {
        utils::sqr_metric(point, &self.center) < self.radius * self.radius
    }

    /// Do `self` and `other` have the same center and radius?
    #[inline]
    pub fn coincides_with<U>(&self, other: &Sphere<U>) -> bool {
        self.center == other.center && self.radius == other.radius
    }
}

/// The entries of an [`MTreeNode`].
#[derive(Clone, Debug)]
pub enum MTreeNodeContent<T> {
    /// The spheres stored in a leaf.
    Leaf(ArrayVec<Sphere<T>, NODE_CAPACITY>),
    /// The indices of the children of an inner node.
    Inner(ArrayVec<usize, NODE_CAPACITY>),
}

impl<T> MTreeNodeContent<T> {
    /// The number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            MTreeNodeContent::Leaf(spheres) => spheres.len(),
            MTreeNodeContent::Inner(children) => children.len(),
        }
    }

    /// Is there no entry?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node of an [`MTree`].
#[derive(Clone, Debug)]
pub struct MTreeNode<T> {
    pub(super) parent: Option<usize>,
    pub(super) bounding_sphere: BoundingSphere,
    pub(super) content: MTreeNodeContent<T>,
}

impl<T> MTreeNode<T> {
    /// The index of the parent of this node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// A sphere enclosing all the entries of this node.
    #[inline]
    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounding_sphere
    }

    /// The entries of this node.
    #[inline]
    pub fn content(&self) -> &MTreeNodeContent<T> {
        &self.content
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, MTreeNodeContent::Leaf(_))
    }
}

/// A metric tree of spheres.
///
/// Every node holds up to [`MTREE_MAX_CHILDREN`] entries and a bounding sphere enclosing
/// them. Leaves hold the spheres themselves. The tree answers which spheres contain a given
/// point, for example to find the lights whose range reaches a surface point.
///
/// The nodes live in an arena and refer to each other by index.
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxtrees3d::partitioning::{MTree, Sphere};
/// use nalgebra::Point3;
///
/// let mut tree = MTree::new();
/// assert!(tree.insert(Sphere::with_data(Point3::new(0.0, 0.0, 0.0), 2.0, "red")));
/// assert!(tree.insert(Sphere::with_data(Point3::new(3.0, 0.0, 0.0), 2.0, "blue")));
///
/// let mut colors: Vec<_> = tree
///     .spheres_containing(&Point3::new(1.5, 0.0, 0.0))
///     .map(|s| s.data)
///     .collect();
/// colors.sort();
/// assert_eq!(colors, ["blue", "red"]);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct MTree<T = ()> {
    pub(super) nodes: Slab<MTreeNode<T>>,
    pub(super) root: Option<usize>,
    pub(super) len: usize,
}

impl<T> Default for MTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MTree<T> {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
            len: 0,
        }
    }

    /// The number of spheres in this tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Does this tree contain no sphere?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every sphere from this tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// The index of the root node.
    #[inline]
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// The node with the given index.
    #[inline]
    pub fn node(&self, id: usize) -> Option<&MTreeNode<T>> {
        self.nodes.get(id)
    }

    /// A sphere enclosing every sphere of this tree.
    pub fn root_bounding_sphere(&self) -> Option<BoundingSphere> {
        self.root.map(|root| self.nodes[root].bounding_sphere)
    }

    /// Iterates through all the spheres of this tree, in no particular order.
    pub fn spheres(&self) -> impl Iterator<Item = &Sphere<T>> {
        self.nodes
            .iter()
            .filter_map(|(_, node)| match &node.content {
                MTreeNodeContent::Leaf(spheres) => Some(spheres.iter()),
                MTreeNodeContent::Inner(_) => None,
            })
            .flatten()
    }

    /// Counts the spheres of this tree by walking all its leaves.
    ///
    /// This always equals [`MTree::len`] which is cached.
    pub fn count_items(&self) -> usize {
        self.root.map_or(0, |root| self.count_node_items(root))
    }

    fn count_node_items(&self, id: usize) -> usize {
        match &self.nodes[id].content {
            MTreeNodeContent::Leaf(spheres) => spheres.len(),
            MTreeNodeContent::Inner(children) => {
                children.iter().map(|c| self.count_node_items(*c)).sum()
            }
        }
    }

    /// The length of the longest path from the root to a leaf.
    ///
    /// Zero for an empty tree or a tree made of a single leaf.
    pub fn depth(&self) -> u32 {
        self.root.map_or(0, |root| self.node_depth(root))
    }

    fn node_depth(&self, id: usize) -> u32 {
        match &self.nodes[id].content {
            MTreeNodeContent::Leaf(_) => 0,
            MTreeNodeContent::Inner(children) => {
                1 + children
                    .iter()
                    .map(|c| self.node_depth(*c))
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// The bounding spheres of the entries of a node.
    pub(super) fn entry_spheres(&self, id: usize) -> ArrayVec<BoundingSphere, NODE_CAPACITY> {
        match &self.nodes[id].content {
            MTreeNodeContent::Leaf(spheres) => spheres.iter().map(Sphere::bounding_sphere).collect(),
            MTreeNodeContent::Inner(children) => children
                .iter()
                .map(|c| self.nodes[*c].bounding_sphere)
                .collect(),
        }
    }

    /// Recomputes the bounding sphere of a node from its entries.
    ///
    /// Returns `true` if it changed.
    pub(super) fn refresh_bounding_sphere(&mut self, id: usize) -> bool {
        let entries = self.entry_spheres(id);

        match enclosing_sphere(&entries) {
            Some(bs) if bs != self.nodes[id].bounding_sphere => {
                self.nodes[id].bounding_sphere = bs;
                true
            }
            _ => false,
        }
    }

    /// Refreshes the bounding spheres from the node `id` up to the root.
    ///
    /// Stops at the first node whose bounding sphere is left unchanged.
    pub(super) fn propagate_bounding_sphere_update(&mut self, mut id: usize) {
        while self.refresh_bounding_sphere(id) {
            match self.nodes[id].parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
    }
}

/// A sphere enclosing all `entries`, grown from the first one. `None` if there is no entry.
pub(super) fn enclosing_sphere(entries: &[BoundingSphere]) -> Option<BoundingSphere> {
    let (first, rest) = entries.split_first()?;
    let mut res = *first;

    for bs in rest {
        res.merge(bs);
    }

    Some(res)
}

/// Does the bounding sphere `bs` contain `point`, up to rounding errors?
#[inline]
pub(super) fn bounding_contains(bs: &BoundingSphere, point: &Point<Real>) -> bool {
    let radius = bs.radius + bounding_margin(bs);
    utils::sqr_metric(point, &bs.center) <= radius * radius
}

/// The rounding error tolerated on the radius of the bounding sphere `bs`.
#[inline]
pub(super) fn bounding_margin(bs: &BoundingSphere) -> Real {
    BOUNDING_TOLERANCE * bs.radius.max(1.0)
}
