extern crate nalgebra as na;
#[macro_use]
extern crate approx;

mod ball_collision;
mod local_ray_caster;
mod mtree;
mod octree_invariants;
mod octree_ray_cast;
mod raw_data;
