use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, DIM};
use crate::query::Ray;

/// Computes the point where `ray` enters `aabb`.
///
/// If the ray origin lies inside of `aabb` (boundary included), the origin itself is returned.
/// Otherwise, for each axis, the face of `aabb` facing the origin is a candidate plane. The
/// ray must cross the candidate plane reached last (with the largest ray parameter) to enter
/// the box, so the hit point is taken on that plane and checked against the two other axes.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use voxtrees3d::bounding_volume::Aabb;
/// use voxtrees3d::query::{hit_box, Ray};
/// use nalgebra::{Point3, Vector3};
///
/// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
/// let down = Ray::new(Point3::new(0.5, 10.0, 0.5), Vector3::new(0.0, -1.0, 0.0));
/// let up = Ray::new(Point3::new(0.5, 10.0, 0.5), Vector3::new(0.0, 1.0, 0.0));
///
/// assert_eq!(hit_box(&aabb, &down), Some(Point3::new(0.5, 1.0, 0.5)));
/// assert_eq!(hit_box(&aabb, &up), None);
/// # }
/// ```
pub fn hit_box(aabb: &Aabb, ray: &Ray) -> Option<Point<Real>> {
    let (candidate_plane, inside) = aabb.fit_point(&ray.origin);

    if inside {
        return Some(ray.origin);
    }

    let mut plane = None;
    let mut max_t = -1.0;

    for i in 0..DIM {
        if candidate_plane[i] != ray.origin[i] && ray.dir[i] != 0.0 {
            let t = (candidate_plane[i] - ray.origin[i]) / ray.dir[i];

            if t > max_t {
                plane = Some(i);
                max_t = t;
            }
        }
    }

    let plane = plane?;

    if max_t < 0.0 {
        return None;
    }

    let mut res = candidate_plane;

    for i in 0..DIM {
        if i != plane {
            let coord = ray.origin[i] + max_t * ray.dir[i];

            if coord < aabb.mins[i] || coord > aabb.maxs[i] {
                return None;
            }

            res[i] = coord;
        }
    }

    Some(res)
}

/// Intersects `ray` with the plane orthogonal to `axis` passing through `plane_point`.
///
/// Returns `None` if the ray is parallel to the plane, if it starts on the plane, if the plane
/// lies behind the ray origin, or if the intersection falls outside of `aabb`.
pub fn hit_plane_within_box(
    ray: &Ray,
    plane_point: &Point<Real>,
    axis: usize,
    aabb: &Aabb,
) -> Option<Point<Real>> {
    let dir = ray.dir[axis];

    if dir == 0.0 {
        return None;
    }

    let k = plane_point[axis] - ray.origin[axis];

    if k == 0.0 || (dir < 0.0) != (k < 0.0) {
        return None;
    }

    let mut res = ray.point_at(k / dir);
    // Avoid any rounding error on the axis of the plane.
    res[axis] = plane_point[axis];

    if aabb.contains_local_point(&res) {
        Some(res)
    } else {
        None
    }
}
