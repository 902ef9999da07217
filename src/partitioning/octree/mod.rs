//! The sparse voxel octree.

pub use self::octree_local::{LocalLoopMode, LocalRayCaster, MAX_DEPTH_LOCAL};
pub use self::octree_ray::{OctreeRayHit, RayCastOptions};
pub use self::octree_statistics::NodeCounts;
pub use self::octree_tree::{InnerNode, Octree, OctreeNode, MAX_DEPTH, MAX_DOTS};

mod octree_build;
mod octree_insert;
mod octree_local;
mod octree_queries;
mod octree_ray;
mod octree_remove;
mod octree_statistics;
mod octree_tree;
mod octree_validation;
