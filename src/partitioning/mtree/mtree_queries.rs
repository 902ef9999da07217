use super::mtree_tree::bounding_contains;
use super::{MTree, MTreeNodeContent, Sphere};
use crate::math::{Point, Real};
use smallvec::SmallVec;

const TRAVERSAL_STACK_SIZE: usize = 32;

impl<T> MTree<T> {
    /// Is a sphere with the same center and radius as `sphere` part of this tree?
    pub fn contains_sphere<U>(&self, sphere: &Sphere<U>) -> bool {
        self.find_sphere(sphere).is_some()
    }

    /// The leaf containing `sphere` and the index of the sphere in that leaf.
    ///
    /// Only the subtrees whose bounding sphere contains the center of `sphere` are explored.
    pub(super) fn find_sphere<U>(&self, sphere: &Sphere<U>) -> Option<(usize, usize)> {
        self.root.and_then(|root| self.find_sphere_in(root, sphere))
    }

    fn find_sphere_in<U>(&self, id: usize, sphere: &Sphere<U>) -> Option<(usize, usize)> {
        let node = &self.nodes[id];

        if !bounding_contains(&node.bounding_sphere, &sphere.center) {
            return None;
        }

        match &node.content {
            MTreeNodeContent::Leaf(spheres) => spheres
                .iter()
                .position(|s| s.coincides_with(sphere))
                .map(|i| (id, i)),
            MTreeNodeContent::Inner(children) => children
                .iter()
                .find_map(|c| self.find_sphere_in(*c, sphere)),
        }
    }

    /// Iterates through the spheres of this tree containing `point`.
    pub fn spheres_containing(&self, point: &Point<Real>) -> SpheresContaining<'_, T> {
        SpheresContaining::new(self, *point)
    }

    /// Calls `visitor` on every sphere of this tree containing `point`.
    pub fn for_each_sphere_containing(
        &self,
        point: &Point<Real>,
        mut visitor: impl FnMut(&Sphere<T>),
    ) {
        for sphere in self.spheres_containing(point) {
            visitor(sphere);
        }
    }
}

/// Iterator through the spheres of an [`MTree`] containing a point.
///
/// Created by [`MTree::spheres_containing`].
pub struct SpheresContaining<'a, T> {
    tree: &'a MTree<T>,
    point: Point<Real>,
    stack: SmallVec<[usize; TRAVERSAL_STACK_SIZE]>,
    leaf: Option<core::slice::Iter<'a, Sphere<T>>>,
}

impl<'a, T> SpheresContaining<'a, T> {
    fn new(tree: &'a MTree<T>, point: Point<Real>) -> Self {
        Self {
            tree,
            point,
            stack: tree.root.into_iter().collect(),
            leaf: None,
        }
    }
}

impl<'a, T> Iterator for SpheresContaining<'a, T> {
    type Item = &'a Sphere<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;

        loop {
            if let Some(spheres) = &mut self.leaf {
                for sphere in spheres.by_ref() {
                    if sphere.contains_point(&self.point) {
                        return Some(sphere);
                    }
                }

                self.leaf = None;
            }

            let node = &tree.nodes[self.stack.pop()?];

            if !bounding_contains(&node.bounding_sphere, &self.point) {
                continue;
            }

            match &node.content {
                MTreeNodeContent::Leaf(spheres) => self.leaf = Some(spheres.iter()),
                MTreeNodeContent::Inner(children) => self.stack.extend(children.iter().copied()),
            }
        }
    }
}
