use super::mtree_tree::NODE_CAPACITY;
use super::{MTree, MTreeNode, MTreeNodeContent, Sphere, MTREE_MAX_CHILDREN};
use crate::bounding_volume::BoundingSphere;
use crate::math::{Point, Real};
use crate::utils;
use arrayvec::ArrayVec;
use ordered_float::OrderedFloat;

/// The minimum number of entries of each half of a split node.
const MIN_GROUP_LEN: usize = 2;

impl<T> MTree<T> {
    /// Inserts a sphere into this tree.
    ///
    /// Returns `false`, leaving the tree unchanged, if the radius of the sphere is not
    /// strictly positive or if a sphere with the same center and radius is already in the
    /// tree.
    pub fn insert(&mut self, sphere: Sphere<T>) -> bool {
        if !(sphere.radius > 0.0) {
            log::trace!(
                "Rejecting sphere at {:?} with radius {}.",
                sphere.center,
                sphere.radius
            );
            return false;
        }

        if self.contains_sphere(&sphere) {
            log::trace!(
                "Sphere at {:?} with radius {} is already in the tree.",
                sphere.center,
                sphere.radius
            );
            return false;
        }

        let Some(root) = self.root else {
            let bounding_sphere = sphere.bounding_sphere();
            let mut spheres = ArrayVec::new();
            spheres.push(sphere);

            self.root = Some(self.nodes.insert(MTreeNode {
                parent: None,
                bounding_sphere,
                content: MTreeNodeContent::Leaf(spheres),
            }));
            self.len = 1;
            return true;
        };

        let leaf = self.choose_leaf(root, &sphere.center);

        if let MTreeNodeContent::Leaf(spheres) = &mut self.nodes[leaf].content {
            spheres.push(sphere);
        }

        self.len += 1;
        self.propagate_bounding_sphere_update(leaf);

        if self.nodes[leaf].content.len() > MTREE_MAX_CHILDREN {
            self.split(leaf);
        }

        true
    }

    /// Descends from `id` to a leaf, following at each level the child with the nearest
    /// bounding sphere center.
    fn choose_leaf(&self, mut id: usize, center: &Point<Real>) -> usize {
        while let MTreeNodeContent::Inner(children) = &self.nodes[id].content {
            let centers: ArrayVec<Point<Real>, NODE_CAPACITY> = children
                .iter()
                .map(|c| self.nodes[*c].bounding_sphere.center)
                .collect();

            match utils::closest_in_set(&centers, center, utils::sqr_metric) {
                Some(i) => id = children[i],
                None => break,
            }
        }

        id
    }

    /// Splits an overflowing node in two.
    ///
    /// The two entries with the farthest centers seed two groups and every other entry
    /// joins the group with the closest seed. The node keeps the first group, the second one
    /// is moved to a new sibling. The parent may overflow in turn.
    fn split(&mut self, id: usize) {
        let entries = self.entry_spheres(id);
        let in_first_group = group_entries(&entries);
        let parent = self.nodes[id].parent;

        let moved = match &mut self.nodes[id].content {
            MTreeNodeContent::Leaf(spheres) => {
                let (kept, moved) = partition(core::mem::take(spheres), &in_first_group);
                *spheres = kept;
                MTreeNodeContent::Leaf(moved)
            }
            MTreeNodeContent::Inner(children) => {
                let (kept, moved) = partition(core::mem::take(children), &in_first_group);
                *children = kept;
                MTreeNodeContent::Inner(moved)
            }
        };

        let sibling = self.nodes.insert(MTreeNode {
            parent,
            bounding_sphere: BoundingSphere::new(Point::origin(), 0.0),
            content: moved,
        });

        if let MTreeNodeContent::Inner(children) = &self.nodes[sibling].content {
            for child in children.clone() {
                self.nodes[child].parent = Some(sibling);
            }
        }

        let _ = self.refresh_bounding_sphere(id);
        let _ = self.refresh_bounding_sphere(sibling);

        match parent {
            Some(parent) => {
                if let MTreeNodeContent::Inner(children) = &mut self.nodes[parent].content {
                    children.push(sibling);
                }

                self.propagate_bounding_sphere_update(parent);

                if self.nodes[parent].content.len() > MTREE_MAX_CHILDREN {
                    self.split(parent);
                }
            }
            None => {
                let mut children = ArrayVec::new();
                children.push(id);
                children.push(sibling);

                let root = self.nodes.insert(MTreeNode {
                    parent: None,
                    bounding_sphere: BoundingSphere::new(Point::origin(), 0.0),
                    content: MTreeNodeContent::Inner(children),
                });
                self.nodes[id].parent = Some(root);
                self.nodes[sibling].parent = Some(root);
                let _ = self.refresh_bounding_sphere(root);
                self.root = Some(root);
            }
        }
    }
}

/// Decides which entries of an overflowing node stay in the first group.
fn group_entries(entries: &[BoundingSphere]) -> ArrayVec<bool, NODE_CAPACITY> {
    let (seed1, seed2) = farthest_centers(entries);
    let mut groups: ArrayVec<bool, NODE_CAPACITY> = entries
        .iter()
        .map(|bs| utils::sqr_metric(&bs.center, &seed1) < utils::sqr_metric(&bs.center, &seed2))
        .collect();

    if groups.iter().all(|g| *g) || groups.iter().all(|g| !*g) {
        // All the centers coincide.
        log::debug!(
            "Degenerate M-tree split of {} entries around {:?}.",
            entries.len(),
            seed1
        );

        for (i, group) in groups.iter_mut().enumerate() {
            *group = i % 2 == 0;
        }
    }

    // Each group takes at least two entries, stolen from the other group by distance to its
    // seed.
    for (first, seed) in [(true, seed1), (false, seed2)] {
        while groups.iter().filter(|g| **g == first).count() < MIN_GROUP_LEN {
            let stolen = entries
                .iter()
                .zip(&groups)
                .enumerate()
                .filter(|(_, (_, g))| **g != first)
                .min_by_key(|(_, (bs, _))| OrderedFloat(utils::sqr_metric(&bs.center, &seed)))
                .map(|(i, _)| i);

            match stolen {
                Some(i) => groups[i] = first,
                None => break,
            }
        }
    }

    groups
}

/// The pair of entry centers with the largest distance.
fn farthest_centers(entries: &[BoundingSphere]) -> (Point<Real>, Point<Real>) {
    let mut res = (entries[0].center, entries[0].center);
    let mut max_dist = 0.0;

    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            let dist = utils::sqr_metric(&a.center, &b.center);

            if dist > max_dist {
                res = (a.center, b.center);
                max_dist = dist;
            }
        }
    }

    res
}

fn partition<E>(
    entries: ArrayVec<E, NODE_CAPACITY>,
    in_first_group: &[bool],
) -> (ArrayVec<E, NODE_CAPACITY>, ArrayVec<E, NODE_CAPACITY>) {
    let mut first = ArrayVec::new();
    let mut second = ArrayVec::new();

    for (entry, in_first) in entries.into_iter().zip(in_first_group) {
        if *in_first {
            first.push(entry);
        } else {
            second.push(entry);
        }
    }

    (first, second)
}
