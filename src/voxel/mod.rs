//! Voxel grid configuration.
//!
//! Every voxel is the minimal corner of a cell of a regular grid. The size of the cells is
//! described by a [`VoxelGrid`], captured by value when a tree is created.

pub use self::voxel_grid::VoxelGrid;

mod voxel_grid;
