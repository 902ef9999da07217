use na::{Point3, Vector3};
use voxtrees3d::bounding_volume::BoundingVolume;
use voxtrees3d::math::Real;
use voxtrees3d::partitioning::{LocalLoopMode, LocalRayCaster, Octree};
use voxtrees3d::query::Ray;
use voxtrees3d::voxel::VoxelGrid;

fn checkerboard() -> Octree {
    let voxels = (0..16)
        .flat_map(|x| (0..16).map(move |z| (x, z)))
        .filter(|(x, z)| (x + z) % 2 == 0)
        .map(|(x, z)| Point3::new(x as Real, 0.0, z as Real))
        .collect();
    Octree::new(VoxelGrid::default(), voxels)
}

fn vertical_ray(x: usize, z: usize) -> Ray {
    Ray::new(
        Point3::new(x as Real + 0.5, 10.0, z as Real + 0.5),
        -Vector3::y(),
    )
}

#[test]
fn local_caster_scanlines() {
    let tree = checkerboard();
    let mut caster = LocalRayCaster::new(&tree);
    let mut hits = Vec::new();

    for z in 0..16 {
        let cast = caster.run_local_loop(
            16,
            LocalLoopMode::Fixed,
            |x| vertical_ray(x, z),
            |x, hit| hits.push((x, z, hit)),
        );
        assert_eq!(cast, 16);
    }

    assert_eq!(hits.len(), 128);

    for (x, z, hit) in hits {
        assert_eq!((x + z) % 2, 0);
        assert_eq!(hit, Point3::new(x as Real + 0.5, 1.0, z as Real + 0.5));
        assert_eq!(tree.cast_ray(&vertical_ray(x, z)), Some(hit));
    }
}

#[test]
fn local_caster_hits_are_valid_intersections() {
    let mut rng = oorandom::Rand32::new(12);
    let grid = VoxelGrid::default();
    let voxels: Vec<_> = (0..600)
        .map(|_| {
            let mut coord = || rng.rand_float() as Real * 24.0 - 12.0;
            grid.snap_down(&Point3::new(coord(), coord(), coord()))
        })
        .collect();
    let tree = Octree::new(grid, voxels.clone());
    let mut caster = LocalRayCaster::new(&tree);
    let origin = Point3::new(-30.0, 0.3, -30.0);

    for i in 0..400 {
        // A fan of neighboring rays.
        let angle = i as Real * 0.002;
        let ray = Ray::new(origin, Vector3::new(angle.cos(), 0.01, angle.sin()));
        let local = caster.cast_ray(&ray);

        assert_eq!(local.is_some(), tree.cast_ray(&ray).is_some());

        if let Some(hit) = local {
            let t = (hit - ray.origin).dot(&ray.dir) / ray.dir.norm_squared();
            assert!(t >= 0.0);
            assert!((ray.point_at(t) - hit).norm() < 1.0e-3);
            assert!(voxels
                .iter()
                .any(|v| grid.cell(v).loosened(1.0e-3).contains_local_point(&hit)));
        }
    }
}
