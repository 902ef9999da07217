use super::octree_ray::{cast_ray_from, OctreePath};
use super::{Octree, RayCastOptions};
use crate::math::{Point, Real};
use crate::query::Ray;

/// How many ancestors of the previous hit a [`LocalRayCaster`] tries before falling back to a
/// full traversal.
pub const MAX_DEPTH_LOCAL: usize = 3;

/// Stop condition of [`LocalRayCaster::run_local_loop`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LocalLoopMode {
    /// Stop at the first ray missing the tree.
    Adaptive,
    /// Always cast the requested number of rays.
    Fixed,
}

/// A ray caster reusing the path of its previous hit.
///
/// Spatially coherent rays (for example consecutive pixels of a scanline) tend to hit the
/// same region of the tree. After a hit, the caster remembers the path from the root to the
/// hit leaf. The next ray is first cast on the subtrees rooted at the last
/// [`MAX_DEPTH_LOCAL`] nodes of that path, from the deepest one, and only on the whole tree if
/// none of them is hit.
///
/// This is a heuristic: a hit found in a subtree is always a valid intersection of the ray and
/// an occupied cell, but a closer one may exist outside of that subtree.
///
/// The caster borrows the tree, which therefore cannot be modified while the caster is alive.
pub struct LocalRayCaster<'a> {
    tree: &'a Octree,
    options: RayCastOptions,
    path: OctreePath<'a>,
}

impl<'a> LocalRayCaster<'a> {
    /// A caster for `tree`, with an empty path.
    pub fn new(tree: &'a Octree) -> Self {
        Self::with_options(tree, RayCastOptions::default())
    }

    /// A caster for `tree` using the given options for all its ray casts.
    pub fn with_options(tree: &'a Octree, options: RayCastOptions) -> Self {
        Self {
            tree,
            options,
            path: OctreePath::new(),
        }
    }

    /// The tree this caster operates on.
    pub fn tree(&self) -> &'a Octree {
        self.tree
    }

    /// Forgets the path of the previous hit.
    pub fn reset(&mut self) {
        self.path.clear();
    }

    /// The number of nodes on the path of the previous hit, root and leaf included.
    ///
    /// This is zero if the previous ray missed.
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// Casts a ray, trying first the neighborhood of the previous hit.
    pub fn cast_ray(&mut self, ray: &Ray) -> Option<Point<Real>> {
        let tree = self.tree;
        let grid = &tree.grid;
        let n = self.path.len();

        for depth in 1..=MAX_DEPTH_LOCAL.min(n) {
            let start = n - depth;
            let mut sub_path = OctreePath::new();

            // The path starts at the root so `start` is the depth of its node in the tree.
            if let Some(hit) = cast_ray_from(
                grid,
                self.path[start],
                start as u32,
                ray,
                &self.options,
                &mut sub_path,
            ) {
                self.path.truncate(start);
                self.path.extend(sub_path);
                return Some(hit.point);
            }
        }

        self.path.clear();
        cast_ray_from(grid, &tree.root, 0, ray, &self.options, &mut self.path)
            .map(|hit| hit.point)
    }

    /// Casts a sequence of rays.
    ///
    /// The ray number `i` is produced by `ray_at(i)`, for `i` in `0..iterations`, and
    /// `action(i, hit)` is called for every ray hitting the tree. With
    /// [`LocalLoopMode::Adaptive`] the loop stops after the first miss.
    ///
    /// Returns the number of rays cast.
    pub fn run_local_loop(
        &mut self,
        iterations: usize,
        mode: LocalLoopMode,
        mut ray_at: impl FnMut(usize) -> Ray,
        mut action: impl FnMut(usize, Point<Real>),
    ) -> usize {
        for i in 0..iterations {
            match self.cast_ray(&ray_at(i)) {
                Some(hit) => action(i, hit),
                None if mode == LocalLoopMode::Adaptive => return i + 1,
                None => {}
            }
        }

        iterations
    }
}
