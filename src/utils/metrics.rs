use crate::math::{Point, Real};

/// The L1 (taxicab) distance between two points.
///
/// Cheaper than the euclidean distance and monotonic along a ray, which is all the ray
/// traversal needs to order candidate hits.
#[inline]
pub fn abs_metric(a: &Point<Real>, b: &Point<Real>) -> Real {
    (a - b).abs().sum()
}

/// The squared euclidean distance between two points.
#[inline]
pub fn sqr_metric(a: &Point<Real>, b: &Point<Real>) -> Real {
    (a - b).norm_squared()
}

/// The index of the element of `set` closest to `target` according to `metric`.
///
/// This is a plain linear scan. The first of several equally close elements wins. Returns
/// `None` if `set` is empty.
pub fn closest_in_set(
    set: &[Point<Real>],
    target: &Point<Real>,
    metric: impl Fn(&Point<Real>, &Point<Real>) -> Real,
) -> Option<usize> {
    let mut best = None;
    let mut best_dist = Real::MAX;

    for (i, pt) in set.iter().enumerate() {
        let dist = metric(pt, target);

        if best.is_none() || dist < best_dist {
            best = Some(i);
            best_dist = dist;
        }
    }

    best
}
