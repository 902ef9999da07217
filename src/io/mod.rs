//! Loading voxel datasets from files.

pub use self::raw_data::{find_data_file, read_raw_data, read_raw_data_tree, RawDataError};

mod raw_data;
