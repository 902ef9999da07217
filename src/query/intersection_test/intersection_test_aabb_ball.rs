use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::utils;

/// Tests whether an AABB and a ball intersect.
///
/// The ball center is clamped into the box; the test succeeds if the clamped point is strictly
/// closer than `radius` to the center, so a ball merely touching a face does not collide.
#[inline]
pub fn intersection_test_aabb_ball(aabb: &Aabb, center: &Point<Real>, radius: Real) -> bool {
    let (fitted, _) = aabb.fit_point(center);
    utils::sqr_metric(&fitted, center) < radius * radius
}
