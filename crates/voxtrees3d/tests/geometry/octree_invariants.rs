use na::Point3;
use std::cmp::Ordering;
use voxtrees3d::bounding_volume::BoundingVolume;
use voxtrees3d::math::{Real, Vector};
use voxtrees3d::partitioning::{Octree, OctreeNode, MAX_DOTS};
use voxtrees3d::utils::subspace_index;
use voxtrees3d::voxel::VoxelGrid;

fn random_voxels(rng: &mut oorandom::Rand32, grid: &VoxelGrid, n: usize) -> Vec<Point3<Real>> {
    (0..n)
        .map(|_| {
            let mut coord = || rng.rand_range(0..16) as Real - 8.0;
            Point3::new(coord(), coord(), coord())
                .coords
                .component_mul(grid.size())
                .into()
        })
        .collect()
}

fn lexicographic(a: &Point3<Real>, b: &Point3<Real>) -> Ordering {
    a.coords.as_slice().partial_cmp(b.coords.as_slice()).unwrap()
}

fn sorted(mut voxels: Vec<Point3<Real>>) -> Vec<Point3<Real>> {
    voxels.sort_by(lexicographic);
    voxels.dedup();
    voxels
}

// Every voxel lies in the AABB of each node above it, and in the octant of its index.
fn check_node(grid: &VoxelGrid, node: &OctreeNode) {
    match node {
        OctreeNode::Empty => {}
        OctreeNode::SparseLeaf { aabb, voxels } => {
            assert!(!voxels.is_empty() && voxels.len() <= MAX_DOTS);

            for v in voxels {
                assert!(aabb.contains(&grid.cell(v)), "{v:?} outside of {aabb:?}");
            }
        }
        OctreeNode::DenseLeaf { aabb } => {
            assert_eq!(grid.voxels_in(aabb).len() as u64, grid.cell_count(aabb));
        }
        OctreeNode::Inner(inner) => {
            assert!(inner.voxel_count > MAX_DOTS as u64);

            for (i, child) in inner.children.iter().enumerate() {
                let mut voxels = Vec::new();
                child.collect_voxels(grid, &mut voxels);

                for v in &voxels {
                    assert_eq!(subspace_index(&inner.center, v) as usize, i);
                    assert!(inner.aabb.contains(&grid.cell(v)));
                }

                check_node(grid, child);
            }
        }
    }
}

#[test]
fn octree_partitions_voxels() {
    let mut rng = oorandom::Rand32::new(42);

    for grid in [VoxelGrid::default(), VoxelGrid::new(Vector::repeat(0.5))] {
        let voxels = random_voxels(&mut rng, &grid, 400);
        let mut tree = Octree::new(grid, voxels.clone());
        check_node(&grid, tree.root());

        for v in random_voxels(&mut rng, &grid, 200) {
            let _ = tree.insert(v);
        }

        check_node(&grid, tree.root());

        for v in voxels.iter().step_by(2) {
            let _ = tree.remove(v);
        }

        check_node(&grid, tree.root());
        tree.assert_well_formed();
    }
}

#[test]
fn octree_membership_round_trip() {
    let mut rng = oorandom::Rand32::new(3);
    let grid = VoxelGrid::default();
    let voxels = sorted(random_voxels(&mut rng, &grid, 300));
    let tree = Octree::new(grid, voxels.clone());

    assert_eq!(tree.voxel_count(), voxels.len() as u64);
    assert!(voxels.iter().all(|v| tree.contains_voxel(v)));

    for v in random_voxels(&mut rng, &grid, 300) {
        let expected = voxels.binary_search_by(|w| lexicographic(w, &v)).is_ok();
        assert_eq!(tree.contains_voxel(&v), expected);
    }
}

#[test]
fn octree_insert_then_remove_restores_voxels() {
    let mut rng = oorandom::Rand32::new(9);
    let grid = VoxelGrid::default();
    let mut tree = Octree::new(grid, random_voxels(&mut rng, &grid, 150));
    let before = sorted(tree.voxels());

    for v in random_voxels(&mut rng, &grid, 100) {
        if tree.contains_voxel(&v) {
            // Duplicates are no-ops.
            assert!(!tree.insert(v));
            assert_eq!(sorted(tree.voxels()), before);
        } else {
            assert!(tree.insert(v));
            assert!(tree.remove(&v));
            assert_eq!(sorted(tree.voxels()), before);
        }
    }

    tree.assert_well_formed();
}

#[test]
fn octree_rebuild_keeps_voxels() {
    let mut rng = oorandom::Rand32::new(21);
    let grid = VoxelGrid::default();
    let mut tree = Octree::empty(grid);

    for v in random_voxels(&mut rng, &grid, 500) {
        let _ = tree.insert(v);
    }

    let rebuilt = tree.rebuild();
    rebuilt.assert_well_formed();
    assert_eq!(rebuilt.voxel_count(), tree.voxel_count());
    assert_eq!(sorted(rebuilt.voxels()), sorted(tree.voxels()));
    assert_eq!(rebuilt.aabb(), tree.aabb());
}
