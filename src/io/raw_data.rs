use crate::math::{Point, Real, Vector};
use crate::partitioning::Octree;
use crate::voxel::VoxelGrid;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Environment variable naming a directory searched by [`find_data_file`].
pub const DATA_DIR_ENV: &str = "VOXTREES_DATA";

/// Directory, relative to the home directory, searched by [`find_data_file`].
pub const HOME_DATA_DIR: &str = ".voxtrees";

/// Errors that can occur when reading a raw dataset.
#[derive(thiserror::Error, Debug)]
pub enum RawDataError {
    /// The file could not be opened or read.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The size of the file does not match the dimensions of the dataset.
    #[error("Wrong size of dataset: expected {expected} bytes, found {actual}.")]
    SizeMismatch {
        /// The size implied by the dimensions and the sample size.
        expected: u64,
        /// The actual size of the file.
        actual: u64,
    },
    /// Samples must be between 1 and 4 bytes long.
    #[error("Unsupported sample size: {0} bytes.")]
    UnsupportedSampleSize(u8),
}

/// Reads a raw dataset of `dims[0] * dims[1] * dims[2]` samples.
///
/// The file is a plain array of unsigned little-endian samples of `sample_size` bytes, the
/// last dimension varying fastest. The sample at grid position `(i, j, k)` becomes the voxel
/// `(i, j, k) * grid.size()` if `predicate(sample)` returns `true`.
///
/// Nothing is returned unless the whole file is read successfully.
pub fn read_raw_data(
    path: impl AsRef<Path>,
    dims: [u32; 3],
    sample_size: u8,
    grid: &VoxelGrid,
    mut predicate: impl FnMut(u32) -> bool,
) -> Result<Vec<Point<Real>>, RawDataError> {
    let path = path.as_ref();

    if !(1..=4).contains(&sample_size) {
        return Err(RawDataError::UnsupportedSampleSize(sample_size));
    }

    let file = File::open(path)?;
    let samples = dims.iter().map(|d| *d as u64).product::<u64>();
    let expected = samples * sample_size as u64;
    let actual = file.metadata()?.len();

    if expected != actual {
        return Err(RawDataError::SizeMismatch { expected, actual });
    }

    let mut reader = BufReader::new(file);
    let mut bytes = [0; 4];
    let mut points: Vec<Point<Real>> = Vec::new();

    for i in 0..dims[0] {
        for j in 0..dims[1] {
            for k in 0..dims[2] {
                reader.read_exact(&mut bytes[..sample_size as usize])?;

                if predicate(u32::from_le_bytes(bytes)) {
                    let index = Vector::new(i as Real, j as Real, k as Real);
                    points.push(index.component_mul(grid.size()).into());
                }
            }
        }
    }

    log::debug!(
        "Read {} voxels out of {} samples from {}.",
        points.len(),
        samples,
        path.display()
    );

    Ok(points)
}

/// Reads a raw dataset with [`read_raw_data`] and builds an octree of the selected voxels.
pub fn read_raw_data_tree(
    path: impl AsRef<Path>,
    dims: [u32; 3],
    sample_size: u8,
    grid: &VoxelGrid,
    predicate: impl FnMut(u32) -> bool,
) -> Result<Octree, RawDataError> {
    let points = read_raw_data(path, dims, sample_size, grid, predicate)?;
    Ok(Octree::new(*grid, points))
}

/// Looks for a dataset in the data directories.
///
/// The directory named by the `VOXTREES_DATA` environment variable is searched first, then
/// `~/.voxtrees`. Returns the path of the first regular file found.
pub fn find_data_file(name: impl AsRef<Path>) -> Option<PathBuf> {
    let name = name.as_ref();
    let data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    let home_dir = std::env::var_os("HOME").map(|home| Path::new(&home).join(HOME_DATA_DIR));

    data_dir
        .into_iter()
        .chain(home_dir)
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}
