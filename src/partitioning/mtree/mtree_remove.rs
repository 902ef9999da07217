use super::{MTree, MTreeNodeContent, Sphere};

impl<T> MTree<T> {
    /// Removes the sphere with the same center and radius as `sphere` from this tree.
    ///
    /// Returns `false` if there is no such sphere. The tree is not rebalanced.
    pub fn remove<U>(&mut self, sphere: &Sphere<U>) -> bool {
        let Some((leaf, i)) = self.find_sphere(sphere) else {
            return false;
        };

        if let MTreeNodeContent::Leaf(spheres) = &mut self.nodes[leaf].content {
            let _ = spheres.swap_remove(i);
        }

        self.len -= 1;

        if self.nodes[leaf].content.is_empty() {
            self.detach(leaf);
        } else {
            self.propagate_bounding_sphere_update(leaf);
        }

        true
    }

    /// Deletes an emptied node and removes it from its parent.
    fn detach(&mut self, id: usize) {
        let Some(parent) = self.nodes.remove(id).parent else {
            self.root = None;
            return;
        };

        if let MTreeNodeContent::Inner(children) = &mut self.nodes[parent].content {
            children.retain(|c| *c != id);
        }

        if self.nodes[parent].content.len() == 1 {
            self.collapse(parent);
        } else {
            self.propagate_bounding_sphere_update(parent);
        }
    }

    /// Replaces an inner node with a single child by that child.
    fn collapse(&mut self, id: usize) {
        let child = match &self.nodes[id].content {
            MTreeNodeContent::Inner(children) if children.len() == 1 => children[0],
            _ => return,
        };

        let parent = self.nodes.remove(id).parent;
        self.nodes[child].parent = parent;

        match parent {
            Some(parent) => {
                if let MTreeNodeContent::Inner(children) = &mut self.nodes[parent].content {
                    for c in children.iter_mut().filter(|c| **c == id) {
                        *c = child;
                    }
                }

                self.propagate_bounding_sphere_update(parent);
            }
            None => self.root = Some(child),
        }
    }
}
