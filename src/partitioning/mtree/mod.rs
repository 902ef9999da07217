//! The M-tree of spheres.

pub use self::mtree_queries::SpheresContaining;
pub use self::mtree_tree::{MTree, MTreeNode, MTreeNodeContent, Sphere, MTREE_MAX_CHILDREN};

mod mtree_insert;
mod mtree_queries;
mod mtree_remove;
mod mtree_tree;
mod mtree_validation;
