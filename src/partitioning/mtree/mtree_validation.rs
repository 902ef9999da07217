use super::mtree_tree::bounding_margin;
use super::{MTree, MTreeNodeContent, MTREE_MAX_CHILDREN};
use crate::bounding_volume::BoundingVolume;

impl<T> MTree<T> {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if:
    /// - every node has between 1 and [`MTREE_MAX_CHILDREN`] entries, at least 2 for inner
    ///   nodes,
    /// - the bounding sphere of every node contains the bounding spheres of its entries (up
    ///   to rounding errors),
    /// - the parent index of every node is consistent with the children of its parent,
    /// - every stored sphere has a positive radius,
    /// - every node of the arena is reachable from the root,
    /// - the cached number of spheres is accurate.
    ///
    /// This is mostly a utility for debugging and testing.
    pub fn assert_well_formed(&self) {
        let Some(root) = self.root else {
            assert!(self.nodes.is_empty(), "Empty tree with allocated nodes.");
            assert_eq!(self.len, 0);
            return;
        };

        assert_eq!(self.nodes[root].parent, None);

        let mut visited = 0;
        let count = self.assert_node_well_formed(root, &mut visited);

        assert_eq!(count, self.len);
        assert_eq!(visited, self.nodes.len(), "Unreachable nodes in the arena.");
    }

    fn assert_node_well_formed(&self, id: usize, visited: &mut usize) -> usize {
        let node = &self.nodes[id];
        let len = node.content.len();
        *visited += 1;

        assert!(len > 0, "Empty node {id}.");
        assert!(len <= MTREE_MAX_CHILDREN, "Overflowing node {id}.");

        let bounds = node
            .bounding_sphere
            .loosened(bounding_margin(&node.bounding_sphere));

        for entry in self.entry_spheres(id) {
            assert!(
                bounds.contains(&entry),
                "{entry:?} is not enclosed by the bounding sphere of node {id}."
            );
        }

        match &node.content {
            MTreeNodeContent::Leaf(spheres) => {
                assert!(spheres.iter().all(|s| s.radius > 0.0));
                len
            }
            MTreeNodeContent::Inner(children) => {
                assert!(len >= 2, "Inner node {id} with a single child.");

                children
                    .iter()
                    .map(|child| {
                        assert_eq!(self.nodes[*child].parent, Some(id));
                        self.assert_node_well_formed(*child, visited)
                    })
                    .sum()
            }
        }
    }
}
