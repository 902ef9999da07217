//! Spatial partitioning tools.

pub use self::mtree::{
    MTree, MTreeNode, MTreeNodeContent, Sphere, SpheresContaining, MTREE_MAX_CHILDREN,
};
pub use self::octree::{
    InnerNode, LocalLoopMode, LocalRayCaster, NodeCounts, Octree, OctreeNode, OctreeRayHit,
    RayCastOptions, MAX_DEPTH, MAX_DEPTH_LOCAL, MAX_DOTS,
};

mod mtree;
mod octree;
