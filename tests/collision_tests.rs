use approx::assert_relative_eq;
use zeta_physics::*;

fn aabb(min: Vec3, max: Vec3) -> Collider {
    Aabb::from_corners(min, max).expect("valid aabb").into()
}

fn assert_points_from_a_to_b(a: &Collider, b: &Collider) {
    let manifold = find_collision_features(a, b);
    assert!(manifold.colliding, "{:?} vs {:?} should collide", a.kind(), b.kind());
    assert!(
        manifold.normal.dot(b.center() - a.center()) > 0.0,
        "{:?} vs {:?} normal {:?}",
        a.kind(),
        b.kind(),
        manifold.normal
    );
    assert_relative_eq!(manifold.normal.length(), 1.0, epsilon = 1e-4);
    assert!((1..=4).contains(&manifold.contact_count()));
    assert!(manifold.depth >= 0.0);
}

#[test]
fn overlapping_boxes_from_corner_pairs_collide() {
    let a = aabb(Vec3::new(-3.0, -3.0, -3.0), Vec3::new(4.0, 5.0, 6.0));
    let b = aabb(Vec3::splat(-5.0), Vec3::splat(-2.0));

    assert!(a.intersects(&b));
    assert_points_from_a_to_b(&a, &b);
}

#[test]
fn disjoint_boxes_produce_no_manifold() {
    let a = aabb(Vec3::ZERO, Vec3::ONE);
    let b = aabb(Vec3::splat(2.0), Vec3::splat(3.0));

    assert!(!a.intersects(&b));
    let manifold = find_collision_features(&a, &b);
    assert!(!manifold.colliding);
    assert_eq!(manifold.contact_count(), 0);
}

#[test]
fn stacked_unit_cubes_share_a_four_point_face() {
    let bottom: Collider = Cube::axis_aligned(Vec3::ZERO, Vec3::splat(0.5))
        .expect("valid")
        .into();
    let top: Collider = Cube::axis_aligned(Vec3::new(0.0, 0.99, 0.0), Vec3::splat(0.5))
        .expect("valid")
        .into();

    let manifold = find_collision_features(&bottom, &top);
    assert!(manifold.colliding);
    assert_eq!(manifold.contact_count(), 4);
    assert_relative_eq!(manifold.normal.y, 1.0, epsilon = 1e-5);
    assert_relative_eq!(manifold.depth, 0.01, epsilon = 1e-4);
}

#[test]
fn exactly_flush_unit_cubes_touch_with_zero_depth() {
    let bottom: Collider = Cube::axis_aligned(Vec3::ZERO, Vec3::splat(0.5))
        .expect("valid")
        .into();
    let top: Collider = Cube::axis_aligned(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(0.5))
        .expect("valid")
        .into();

    let manifold = find_collision_features(&bottom, &top);
    assert!(manifold.colliding);
    assert_eq!(manifold.contact_count(), 4);
    assert_eq!(manifold.normal, Vec3::Y);
    assert_eq!(manifold.depth, 0.0);
    for point in &manifold.contacts {
        assert_relative_eq!(point.y, 0.5, epsilon = 1e-6);
    }
}

#[test]
fn normal_direction_holds_for_every_pair_order() {
    let colliders: Vec<Collider> = vec![
        Sphere::new(Vec3::new(0.0, 0.0, 0.0), 0.6).expect("valid").into(),
        Aabb::new(Vec3::new(0.8, 0.1, 0.0), Vec3::splat(0.5)).expect("valid").into(),
        Cube::new(Vec3::new(0.4, 0.9, 0.1), Vec3::splat(0.5), 0.3, 0.2)
            .expect("valid")
            .into(),
        Plane::new(Vec3::new(0.3, 0.5, 0.3), 2.0, 2.0, 0.0, -std::f32::consts::FRAC_PI_2)
            .expect("valid")
            .into(),
    ];

    for (i, a) in colliders.iter().enumerate() {
        for (j, b) in colliders.iter().enumerate() {
            if i == j || !a.intersects(b) {
                continue;
            }
            assert_points_from_a_to_b(a, b);

            let forward = find_collision_features(a, b);
            let reverse = find_collision_features(b, a);
            assert!(reverse.colliding);
            assert!(forward.normal.dot(reverse.normal) < 0.0);
        }
    }
}

#[test]
fn rotated_cube_resting_on_box_keeps_contacts_on_top_face() {
    let floor = aabb(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
    let cube: Collider = Cube::new(Vec3::new(0.0, 0.45, 0.0), Vec3::splat(0.5), 0.7, 0.0)
        .expect("valid")
        .into();

    let manifold = find_collision_features(&floor, &cube);
    assert!(manifold.colliding);
    assert_relative_eq!(manifold.normal.y, 1.0, epsilon = 1e-4);
    assert_eq!(manifold.contact_count(), 4);
    for point in &manifold.contacts {
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-3);
    }
}

#[test]
fn sphere_inside_box_is_pushed_out_through_nearest_face() {
    let container: Collider = Aabb::new(Vec3::ZERO, Vec3::splat(1.0)).expect("valid").into();
    let ball: Collider = Sphere::new(Vec3::new(0.0, 0.0, 0.8), 0.1).expect("valid").into();

    let manifold = find_collision_features(&container, &ball);
    assert!(manifold.colliding);
    assert_relative_eq!(manifold.normal.z, 1.0, epsilon = 1e-5);
    assert_relative_eq!(manifold.depth, 0.3, epsilon = 1e-4);
}

#[derive(Debug, Clone)]
struct Floor {
    height: f32,
}

impl CustomShape for Floor {
    fn center(&self) -> Vec3 {
        Vec3::new(0.0, self.height, 0.0)
    }

    fn set_center(&mut self, center: Vec3) {
        self.height = center.y;
    }

    fn find_collision_features(&self, other: &Collider) -> CollisionManifold {
        let depth = self.height - other.center().y;
        if depth < 0.0 {
            return CollisionManifold::none();
        }
        let contact = other.center() + Vec3::Y * depth;
        CollisionManifold::hit(Vec3::Y, depth, vec![contact])
    }

    fn clone_box(&self) -> Box<dyn CustomShape> {
        Box::new(self.clone())
    }
}

#[test]
fn custom_shapes_take_part_in_dispatch() {
    let floor = Collider::custom(Floor { height: 1.0 });
    let ball: Collider = Sphere::new(Vec3::new(2.0, 0.5, 0.0), 0.25).expect("valid").into();

    assert_eq!(floor.kind(), ColliderKind::Custom);

    let as_a = find_collision_features(&floor, &ball);
    assert!(as_a.colliding);
    assert_eq!(as_a.normal, Vec3::Y);

    let as_b = find_collision_features(&ball, &floor);
    assert!(as_b.colliding);
    assert_eq!(as_b.normal, Vec3::NEG_Y);
    assert_relative_eq!(as_b.depth, 0.5, epsilon = 1e-6);
}

#[test]
fn cube_round_trips_through_json() {
    let cube = Cube::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 1.5), 0.4, -0.2)
        .expect("valid");
    let json = serde_json::to_string(&cube).expect("serialize");
    let restored: Cube = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored.center(), cube.center());
    assert_relative_eq!(restored.theta(), 0.4);
    assert_relative_eq!(restored.phi(), -0.2);
}
