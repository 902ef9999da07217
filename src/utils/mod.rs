//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::metrics::{abs_metric, closest_in_set, sqr_metric};
pub use self::subspace::{ray_subspace_index, subspace_index, touched_planes};

mod center;
mod metrics;
mod subspace;
