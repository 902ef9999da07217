/*!
voxtrees
========

**voxtrees** is a 3-dimensional spatial indexing library for sparse voxel data
written with the rust programming language.

It provides two data structures:

- an adaptive octree ([`partitioning::Octree`]) storing occupied grid cells, with
  bulk construction, incremental insertion/removal, ray casting and ball collision
  queries;
- a bounded-fanout metric tree ([`partitioning::MTree`]) of bounding spheres answering
  point-containment queries.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![warn(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod io;
pub mod partitioning;
pub mod query;
pub mod utils;
pub mod voxel;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Point3, Vector3};

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The number of subspaces a point of the space splits it into.
    pub const NUM_SUBSPACES: usize = 1 << DIM;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;
}
