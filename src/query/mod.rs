//! Non-persistent geometric queries.
//!
//! The octree is traversed with two primitives:
//!
//! * [`query::hit_box()`] and [`query::hit_plane_within_box()`] for ray-casting.
//! * [`query::intersection_test_aabb_ball()`] for ball collision tests.
//!
//! [`query::hit_box()`]: crate::query::hit_box
//! [`query::hit_plane_within_box()`]: crate::query::hit_plane_within_box
//! [`query::intersection_test_aabb_ball()`]: crate::query::intersection_test_aabb_ball

pub use self::intersection_test::intersection_test_aabb_ball;
pub use self::ray::{hit_box, hit_plane_within_box, Ray};

mod intersection_test;
mod ray;
