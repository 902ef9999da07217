use na::Point3;
use voxtrees3d::bounding_volume::BoundingVolume;
use voxtrees3d::math::Real;
use voxtrees3d::partitioning::{MTree, MTreeNodeContent, Sphere, MTREE_MAX_CHILDREN};

fn random_spheres(rng: &mut oorandom::Rand32, n: u32) -> Vec<Sphere<u32>> {
    (0..n)
        .map(|id| {
            let mut coord = || rng.rand_float() as Real * 200.0 - 100.0;
            let center = Point3::new(coord(), coord(), coord());
            Sphere::with_data(center, rng.rand_float() as Real * 15.0 + 0.5, id)
        })
        .collect()
}

fn shuffle<T>(rng: &mut oorandom::Rand32, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.rand_range(0..i as u32 + 1) as usize;
        items.swap(i, j);
    }
}

// Walks the tree from the root, checking the fanout and the bounding spheres.
fn check_subtree(tree: &MTree<u32>, id: usize) -> usize {
    let node = tree.node(id).unwrap();
    let bounds = node.bounding_sphere().loosened(5.0e-2);

    match node.content() {
        MTreeNodeContent::Leaf(spheres) => {
            assert!(!spheres.is_empty() && spheres.len() <= MTREE_MAX_CHILDREN);

            for s in spheres {
                assert!(bounds.contains(&s.bounding_sphere()));
            }

            spheres.len()
        }
        MTreeNodeContent::Inner(children) => {
            assert!(children.len() >= 2 && children.len() <= MTREE_MAX_CHILDREN);

            children
                .iter()
                .map(|child| {
                    let child_node = tree.node(*child).unwrap();
                    assert_eq!(child_node.parent(), Some(id));
                    assert!(bounds.contains(child_node.bounding_sphere()));
                    check_subtree(tree, *child)
                })
                .sum()
        }
    }
}

fn check_tree(tree: &MTree<u32>) {
    match tree.root() {
        Some(root) => assert_eq!(check_subtree(tree, root), tree.len()),
        None => assert_eq!(tree.len(), 0),
    }
}

#[test]
fn mtree_round_trip_in_random_order() {
    let mut rng = oorandom::Rand32::new(42);
    let mut spheres = random_spheres(&mut rng, 500);
    let mut tree = MTree::new();

    for s in &spheres {
        assert!(tree.insert(*s));
    }

    check_tree(&tree);
    assert_eq!(tree.len(), 500);

    shuffle(&mut rng, &mut spheres);
    let (removed, kept) = spheres.split_at(250);

    for s in removed {
        assert!(tree.remove(s));
    }

    check_tree(&tree);
    assert!(removed.iter().all(|s| !tree.contains_sphere(s)));
    assert!(kept.iter().all(|s| tree.contains_sphere(s)));

    for s in kept {
        assert!(tree.remove(s));
        check_tree(&tree);
    }

    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
}

#[test]
fn mtree_interleaved_inserts_and_removals() {
    let mut rng = oorandom::Rand32::new(4);
    let spheres = random_spheres(&mut rng, 1000);
    let mut tree = MTree::new();
    let mut present = vec![false; spheres.len()];
    let mut len = 0;

    for _ in 0..10_000 {
        let i = rng.rand_range(0..spheres.len() as u32) as usize;

        if present[i] {
            assert!(tree.remove(&spheres[i]));
            len -= 1;
        } else {
            assert!(tree.insert(spheres[i]));
            len += 1;
        }

        present[i] = !present[i];

        // Every intermediate tree is well formed, not only the final one.
        check_tree(&tree);
        assert_eq!(tree.len(), len);
    }

    for (s, present) in spheres.iter().zip(&present) {
        assert_eq!(tree.contains_sphere(s), *present);
    }
}

#[test]
fn mtree_point_queries() {
    let mut rng = oorandom::Rand32::new(6);
    let spheres = random_spheres(&mut rng, 400);
    let mut tree = MTree::new();

    for s in &spheres {
        assert!(tree.insert(*s));
    }

    for _ in 0..300 {
        let mut coord = || rng.rand_float() as Real * 220.0 - 110.0;
        let point = Point3::new(coord(), coord(), coord());

        let mut expected: Vec<_> = spheres
            .iter()
            .filter(|s| s.contains_point(&point))
            .map(|s| s.data)
            .collect();
        let mut found: Vec<_> = tree.spheres_containing(&point).map(|s| s.data).collect();
        expected.sort_unstable();
        found.sort_unstable();

        assert_eq!(found, expected);
    }
}

#[test]
fn mtree_accumulates_light_contributions() {
    // Lights of unit intensity, the sum at a point counts the lights reaching it.
    let mut tree = MTree::new();

    for i in 0..10 {
        assert!(tree.insert(Sphere::with_data(
            Point3::new(i as Real, 0.0, 0.0),
            2.5,
            1.0 as Real
        )));
    }

    let mut total = 0.0;
    tree.for_each_sphere_containing(&Point3::new(4.0, 0.0, 0.0), |light| total += light.data);
    assert_eq!(total, 5.0);

    assert_eq!(tree.spheres_containing(&Point3::new(0.0, 0.0, 50.0)).count(), 0);
}
