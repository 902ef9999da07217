use na::{Point3, Vector3};
use voxtrees3d::bounding_volume::{Aabb, BoundingVolume};
use voxtrees3d::math::Real;
use voxtrees3d::partitioning::{Octree, RayCastOptions};
use voxtrees3d::query::{hit_box, Ray};
use voxtrees3d::voxel::VoxelGrid;

fn random_point(rng: &mut oorandom::Rand32, extent: Real) -> Point3<Real> {
    Point3::from(Vector3::from_fn(|_, _| {
        (rng.rand_float() as Real * 2.0 - 1.0) * extent
    }))
}

fn check_hit(grid: &VoxelGrid, voxels: &[Point3<Real>], ray: &Ray, hit: &Point3<Real>) {
    let t = (hit - ray.origin).dot(&ray.dir) / ray.dir.norm_squared();
    assert!(t >= -1.0e-4, "{hit:?} is behind the origin of {ray:?}");
    assert!((ray.point_at(t) - hit).norm() < 1.0e-3, "{hit:?} is not on {ray:?}");
    assert!(voxels
        .iter()
        .any(|v| grid.cell(v).loosened(1.0e-3).contains_local_point(hit)));
}

#[test]
fn octree_ray_cast_finds_the_first_cell() {
    let mut rng = oorandom::Rand32::new(42);
    let grid = VoxelGrid::default();

    for n in [1, 10, 100, 400] {
        let voxels: Vec<_> = (0..n)
            .map(|_| grid.snap_down(&random_point(&mut rng, 6.0)))
            .collect();
        let tree = Octree::new(grid, voxels.clone());

        for _ in 0..300 {
            let origin = random_point(&mut rng, 15.0);
            let target = random_point(&mut rng, 6.0);
            let ray = Ray::new(origin, target - origin);

            let expected = voxels
                .iter()
                .filter_map(|v| hit_box(&grid.cell(v), &ray))
                .map(|hit| (hit - origin).norm())
                .fold(None, |acc: Option<Real>, d| Some(acc.map_or(d, |a| a.min(d))));

            match (tree.cast_ray(&ray), expected) {
                (Some(hit), Some(dist)) => {
                    check_hit(&grid, &voxels, &ray, &hit);
                    assert_relative_eq!((hit - origin).norm(), dist, epsilon = 1.0e-3);
                }
                (None, None) => {}
                (hit, expected) => panic!("{ray:?}: found {hit:?}, expected {expected:?}"),
            }
        }
    }
}

#[test]
fn octree_ray_cast_slides_on_cell_faces() {
    let mut rng = oorandom::Rand32::new(7);
    let grid = VoxelGrid::default();
    let voxels: Vec<_> = (0..300)
        .map(|_| {
            let mut coord = || rng.rand_range(0..10) as Real - 5.0;
            Point3::new(coord(), coord(), coord())
        })
        .collect();
    let tree = Octree::new(grid, voxels.clone());

    // Rays running on the lines where cell faces meet.
    for a in -6..=6 {
        for b in -6..=6 {
            let (a, b) = (a as Real, b as Real);
            let rays = [
                Ray::new(Point3::new(a, 20.0, b), -Vector3::y()),
                Ray::new(Point3::new(a, -20.0, b), Vector3::y()),
                Ray::new(Point3::new(-20.0, a, b), Vector3::x()),
            ];

            for ray in rays {
                let expected = voxels
                    .iter()
                    .filter_map(|v| hit_box(&grid.cell(v), &ray))
                    .map(|hit| (hit - ray.origin).norm())
                    .fold(None, |acc: Option<Real>, d| Some(acc.map_or(d, |a| a.min(d))));

                match (tree.cast_ray(&ray), expected) {
                    (Some(hit), Some(dist)) => {
                        check_hit(&grid, &voxels, &ray, &hit);
                        assert_relative_eq!((hit - ray.origin).norm(), dist, epsilon = 1.0e-3);
                    }
                    (None, None) => {}
                    (hit, expected) => panic!("{ray:?}: found {hit:?}, expected {expected:?}"),
                }
            }
        }
    }
}

#[test]
fn octree_ray_cast_crosses_empty_octants() {
    // Two voxels at opposite corners, the ray passes through several empty octants between
    // them.
    let grid = VoxelGrid::default();
    let mut voxels: Vec<_> = (0..8)
        .map(|i| Point3::new(2.0 * i as Real, 0.0, 0.0))
        .collect();
    voxels.push(Point3::new(14.0, 14.0, 14.0));
    let tree = Octree::new(grid, voxels);

    let ray = Ray::new(Point3::new(14.5, 14.5, -10.0), Vector3::z());
    assert_eq!(tree.cast_ray(&ray), Some(Point3::new(14.5, 14.5, 14.0)));

    let ray = Ray::new(Point3::new(20.0, 0.5, 0.5), -Vector3::x());
    assert_eq!(tree.cast_ray(&ray), Some(Point3::new(15.0, 0.5, 0.5)));

    let ray = Ray::new(Point3::new(1.5, 0.5, 0.5), -Vector3::x());
    assert_eq!(tree.cast_ray(&ray), Some(Point3::new(1.0, 0.5, 0.5)));
}

#[test]
fn octree_ray_cast_on_dense_blocks() {
    let grid = VoxelGrid::default();
    let block = Aabb::new(Point3::new(-4.0, -4.0, -4.0), Point3::new(4.0, 4.0, 4.0));
    let tree = Octree::from_dense_box(grid, &block);

    let ray = Ray::new(Point3::new(0.5, 0.5, 20.0), -Vector3::z());
    assert_eq!(tree.cast_ray(&ray), Some(Point3::new(0.5, 0.5, 4.0)));

    let inside = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::x());
    assert_eq!(tree.cast_ray(&inside), Some(inside.origin));

    let away = Ray::new(Point3::new(0.5, 0.5, 20.0), Vector3::z());
    assert_eq!(tree.cast_ray(&away), None);
}

#[test]
fn octree_ray_cast_level_of_detail_is_coarser() {
    let mut rng = oorandom::Rand32::new(8);
    let grid = VoxelGrid::default();
    let voxels: Vec<_> = (0..500)
        .map(|_| grid.snap_down(&random_point(&mut rng, 10.0)))
        .collect();
    let tree = Octree::new(grid, voxels);
    let coarse = RayCastOptions::with_level_of_detail(1);

    for _ in 0..200 {
        let origin = random_point(&mut rng, 30.0);
        let ray = Ray::new(origin, random_point(&mut rng, 5.0) - origin);

        if let Some(exact) = tree.cast_ray(&ray) {
            let approx = tree
                .cast_ray_with_options(&ray, &coarse)
                .expect("A coarse cast hits whenever the exact cast does.");
            assert!((approx - origin).norm() <= (exact - origin).norm() + 1.0e-3);
        }
    }
}
