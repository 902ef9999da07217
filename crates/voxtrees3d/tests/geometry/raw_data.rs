use na::{Point3, Vector3};
use std::io::Write;
use voxtrees3d::io::{find_data_file, read_raw_data, read_raw_data_tree, RawDataError};
use voxtrees3d::math::Real;
use voxtrees3d::voxel::VoxelGrid;

const DIMS: [u32; 3] = [4, 3, 2];

fn sample(i: u32, j: u32, k: u32) -> u32 {
    i * 100_000 + j * 1_000 + k
}

fn keep(sample: u32) -> bool {
    // Keeps the samples with k == 1 or j == 2.
    sample % 1_000 == 1 || (sample / 1_000) % 100 == 2
}

fn write_dataset(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();

    for i in 0..DIMS[0] {
        for j in 0..DIMS[1] {
            for k in 0..DIMS[2] {
                file.write_all(&sample(i, j, k).to_le_bytes()[..3]).unwrap();
            }
        }
    }

    path
}

#[test]
fn raw_data_found_and_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(dir.path(), "volume.raw");
    std::env::set_var("VOXTREES_DATA", dir.path());

    assert_eq!(find_data_file("volume.raw"), Some(path.clone()));
    assert_eq!(find_data_file("missing.raw"), None);

    let grid = VoxelGrid::new(Vector3::new(0.5, 1.0, 2.0));
    let points = read_raw_data(&path, DIMS, 3, &grid, keep).unwrap();

    let mut expected = Vec::new();

    for i in 0..DIMS[0] {
        for j in 0..DIMS[1] {
            for k in 0..DIMS[2] {
                if keep(sample(i, j, k)) {
                    expected.push(Point3::new(
                        i as Real * 0.5,
                        j as Real,
                        k as Real * 2.0,
                    ));
                }
            }
        }
    }

    // 4 * 3 samples with k == 1, plus 4 more with j == 2 and k == 0.
    assert_eq!(expected.len(), 16);
    assert_eq!(points, expected);

    let tree = read_raw_data_tree(&path, DIMS, 3, &grid, keep).unwrap();
    tree.assert_well_formed();
    assert_eq!(tree.voxel_count(), 16);
    assert!(expected.iter().all(|v| tree.contains_voxel(v)));
    assert!(!tree.contains_voxel(&Point3::new(0.0, 0.0, 0.0)));
}

#[test]
fn raw_data_size_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(dir.path(), "volume.raw");
    let grid = VoxelGrid::default();

    // The file holds 24 samples of 3 bytes.
    let err = read_raw_data(&path, DIMS, 2, &grid, |_| true).unwrap_err();
    assert!(matches!(
        err,
        RawDataError::SizeMismatch {
            expected: 48,
            actual: 72
        }
    ));
    assert_eq!(
        err.to_string(),
        "Wrong size of dataset: expected 48 bytes, found 72."
    );

    assert!(read_raw_data_tree(&path, [5, 3, 2], 3, &grid, |_| true).is_err());
}
