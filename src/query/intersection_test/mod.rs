//! Implementation details of the intersection tests.

pub use self::intersection_test_aabb_ball::intersection_test_aabb_ball;

mod intersection_test_aabb_ball;
