use na::Point3;
use voxtrees3d::bounding_volume::Aabb;
use voxtrees3d::math::{Real, Vector};
use voxtrees3d::partitioning::Octree;
use voxtrees3d::query::intersection_test_aabb_ball;
use voxtrees3d::voxel::VoxelGrid;

#[test]
fn octree_ball_collision_against_brute_force() {
    let mut rng = oorandom::Rand32::new(1);

    for grid in [VoxelGrid::default(), VoxelGrid::new(Vector::new(0.5, 1.0, 2.0))] {
        for n in [1, 20, 200] {
            let voxels: Vec<_> = (0..n)
                .map(|_| {
                    let mut coord = || rng.rand_float() as Real * 10.0 - 5.0;
                    grid.snap_down(&Point3::new(coord(), coord(), coord()))
                })
                .collect();
            let tree = Octree::new(grid, voxels.clone());

            for _ in 0..200 {
                let mut coord = || rng.rand_float() as Real * 16.0 - 8.0;
                let center = Point3::new(coord(), coord(), coord());
                let radius = rng.rand_float() as Real * 3.0 + 0.05;

                let expected = voxels
                    .iter()
                    .any(|v| intersection_test_aabb_ball(&grid.cell(v), &center, radius));
                assert_eq!(tree.intersects_ball(&center, radius), expected);
            }
        }
    }
}

#[test]
fn octree_ball_collision_with_dense_block() {
    let grid = VoxelGrid::default();
    let tree = Octree::from_dense_box(
        grid,
        &Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0)),
    );

    assert!(tree.intersects_ball(&Point3::new(5.0, 5.0, 5.0), 0.1));
    assert!(tree.intersects_ball(&Point3::new(11.0, 5.0, 5.0), 1.5));
    assert!(!tree.intersects_ball(&Point3::new(11.0, 5.0, 5.0), 0.5));
    assert!(!tree.intersects_ball(&Point3::new(11.0, 11.0, 11.0), 1.5));
}
