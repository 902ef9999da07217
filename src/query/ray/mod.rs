//! Ray-casting related definitions and implementations.

#[doc(inline)]
pub use self::ray::Ray;
pub use self::ray_aabb::{hit_box, hit_plane_within_box};

#[doc(hidden)]
pub mod ray;
mod ray_aabb;
