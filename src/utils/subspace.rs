use crate::math::{Point, Real, Vector, DIM};

/// The octant of `dot` relative to `center`.
///
/// Bit `i` of the result is set iff `dot[i] >= center[i]`. This is the rule used to store
/// voxels: a voxel lying on a dividing plane belongs to the upper side, which is where its
/// cell lies.
#[inline]
pub fn subspace_index(center: &Point<Real>, dot: &Point<Real>) -> u8 {
    let mut res = 0;

    for i in 0..DIM {
        if dot[i] >= center[i] {
            res |= 1 << i;
        }
    }

    res
}

/// The octant a ray enters when it reaches `entry`.
///
/// Same as [`subspace_index`] except when `entry` lies on a dividing plane: the ray then
/// enters the side it is heading to, so the bit is cleared for a negative direction along
/// that axis and set otherwise.
#[inline]
pub fn ray_subspace_index(center: &Point<Real>, entry: &Point<Real>, dir: &Vector<Real>) -> u8 {
    let mut res = 0;

    for i in 0..DIM {
        let upper = if entry[i] == center[i] {
            dir[i] >= 0.0
        } else {
            entry[i] > center[i]
        };

        if upper {
            res |= 1 << i;
        }
    }

    res
}

/// The dividing planes going through `point`.
///
/// Bit `i` of the result is set iff `point[i] == center[i]`. The octants on both sides of
/// such a plane touch `point`.
#[inline]
pub fn touched_planes(center: &Point<Real>, point: &Point<Real>) -> u8 {
    let mut res = 0;

    for i in 0..DIM {
        if point[i] == center[i] {
            res |= 1 << i;
        }
    }

    res
}
