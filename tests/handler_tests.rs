use approx::assert_relative_eq;
use zeta_physics::*;

const DT: f32 = 1.0 / 60.0;

fn sphere_body(position: Vec3) -> RigidBody {
    RigidBody::builder(Sphere::new(Vec3::ZERO, 0.5).expect("valid sphere"))
        .position(position)
        .build()
        .expect("valid body")
}

fn populated(count: usize) -> (PhysicsHandler, Vec<RigidBodyHandle>) {
    let mut handler = PhysicsHandler::new();
    let handles = handler
        .add_rigid_bodies((0..count).map(|i| sphere_body(Vec3::new(i as f32 * 3.0, 0.0, 0.0))));
    (handler, handles)
}

fn assert_survivors(handler: &PhysicsHandler, expected: &[RigidBodyHandle]) {
    assert_eq!(handler.rigid_body_count(), expected.len());
    for handle in expected {
        assert!(handler.rigid_body(*handle).is_some(), "{handle:?} missing");
    }
}

#[test]
fn removes_a_single_body() {
    let (mut handler, handles) = populated(3);

    let removed = handler.remove_rigid_body(handles[1]).expect("present");
    assert_relative_eq!(removed.position().x, 3.0);
    assert_survivors(&handler, &[handles[0], handles[2]]);

    assert!(handler.remove_rigid_body(handles[1]).is_none());
    assert_eq!(handler.rigid_body_count(), 2);
}

#[test]
fn removes_contiguous_and_scattered_batches() {
    let (mut handler, handles) = populated(8);

    assert_eq!(handler.remove_rigid_bodies(&handles[2..5]), Some(3));
    assert_survivors(&handler, &[handles[0], handles[1], handles[5], handles[6], handles[7]]);

    assert_eq!(handler.remove_rigid_bodies(&[handles[7], handles[0], handles[6]]), Some(3));
    assert_survivors(&handler, &[handles[1], handles[5]]);
}

#[test]
fn duplicate_handles_count_once() {
    let (mut handler, handles) = populated(4);

    assert_eq!(
        handler.remove_rigid_bodies(&[handles[1], handles[1], handles[3], handles[1]]),
        Some(2)
    );
    assert_survivors(&handler, &[handles[0], handles[2]]);
}

#[test]
fn batch_with_a_missing_body_removes_nothing() {
    let (mut handler, handles) = populated(4);
    let stale = handles[2];
    handler.remove_rigid_body(stale);

    assert_eq!(handler.remove_rigid_bodies(&[handles[0], stale, handles[3]]), None);
    assert_survivors(&handler, &[handles[0], handles[1], handles[3]]);
}

#[test]
fn stale_handles_do_not_resolve_after_slot_reuse() {
    let (mut handler, handles) = populated(2);
    handler.remove_rigid_body(handles[0]);
    let replacement = handler.add_rigid_body(sphere_body(Vec3::new(50.0, 0.0, 0.0)));

    assert_ne!(replacement, handles[0]);
    assert!(handler.rigid_body(handles[0]).is_none());
    assert!(handler.rigid_body(replacement).is_some());
}

#[test]
fn update_consumes_whole_steps_and_keeps_the_remainder() {
    let (mut handler, _) = populated(1);

    let mut dt = DT * 0.5;
    assert_eq!(handler.update(&mut dt), 0);
    assert_relative_eq!(dt, DT * 0.5);

    let mut dt = DT * 3.5;
    assert_eq!(handler.update(&mut dt), 3);
    assert_relative_eq!(dt, DT * 0.5, epsilon = 1e-5);
}

#[test]
fn huge_frame_time_runs_a_bounded_number_of_steps() {
    let config = HandlerConfig::default().with_max_steps_per_update(4);
    let mut handler = PhysicsHandler::with_config(config);
    handler.add_rigid_body(sphere_body(Vec3::ZERO));

    // One fixed step is below half an ulp of this frame time.
    let mut dt = 600_000.0_f32;
    assert_eq!(dt - DT, dt);

    assert_eq!(handler.update(&mut dt), 4);
    assert!(dt.is_finite() && dt > 0.0);
}

#[test]
fn capped_update_leaves_the_backlog_in_dt() {
    let config = HandlerConfig::default().with_max_steps_per_update(4);
    let mut handler = PhysicsHandler::with_config(config);

    let mut dt = DT * 10.5;
    assert_eq!(handler.update(&mut dt), 4);
    assert_relative_eq!(dt, DT * 6.5, epsilon = 1e-5);

    assert_eq!(handler.update(&mut dt), 4);
    assert_eq!(handler.update(&mut dt), 2);
    assert_relative_eq!(dt, DT * 0.5, epsilon = 1e-5);
}

#[test]
fn non_finite_gravity_is_rejected() {
    let config = HandlerConfig::default().with_gravity(Vec3::splat(f32::NAN));
    let mut handler = PhysicsHandler::with_config(config);
    assert_eq!(handler.gravity(), Vec3::new(0.0, -9.8, 0.0));

    handler.set_gravity(Vec3::new(0.0, f32::INFINITY, 0.0));
    assert_eq!(handler.gravity(), Vec3::new(0.0, -9.8, 0.0));

    let ball = handler.add_rigid_body(sphere_body(Vec3::new(0.0, 5.0, 0.0)));
    handler.step();
    assert!(handler.rigid_body(ball).expect("present").position().is_finite());
}

#[test]
fn empty_handler_steps_without_side_effects() {
    let mut handler = PhysicsHandler::new();
    let mut dt = DT * 2.0;
    assert_eq!(handler.update(&mut dt), 2);
    assert_eq!(handler.state(), SimulationState::Idle);
    assert_eq!(handler.last_step_stats().pairs_tested, 0);
}

#[test]
fn free_fall_matches_semi_implicit_euler() {
    let config = HandlerConfig::default().with_gravity(Vec3::new(0.0, -10.0, 0.0));
    let mut handler = PhysicsHandler::with_config(config);
    let body = RigidBody::builder(Sphere::new(Vec3::ZERO, 0.5).expect("valid"))
        .position(Vec3::new(0.0, 100.0, 0.0))
        .linear_damping(1.0)
        .build()
        .expect("valid body");
    let handle = handler.add_rigid_body(body);

    let steps = 10;
    for _ in 0..steps {
        handler.step();
    }

    // v_n = n g dt, y_n = y_0 + g dt^2 n(n+1)/2
    let n = steps as f32;
    let body = handler.rigid_body(handle).expect("present");
    assert_relative_eq!(body.velocity().y, -10.0 * DT * n, epsilon = 1e-4);
    assert_relative_eq!(
        body.position().y,
        100.0 - 10.0 * DT * DT * n * (n + 1.0) / 2.0,
        epsilon = 1e-3
    );
    assert_eq!(body.collider().center(), body.position());
}

#[test]
fn elastic_sphere_bounces_off_static_floor() {
    let mut handler = PhysicsHandler::with_config(HandlerConfig::default().with_gravity(Vec3::ZERO));
    handler.add_static_body(StaticBody::from_collider(
        Plane::new(Vec3::ZERO, 10.0, 10.0, 0.0, -std::f32::consts::FRAC_PI_2).expect("valid"),
    ));
    let ball = handler.add_rigid_body(
        RigidBody::builder(Sphere::new(Vec3::ZERO, 0.5).expect("valid"))
            .position(Vec3::new(0.0, 0.45, 0.0))
            .velocity(Vec3::new(1.0, -3.0, 0.0))
            .restitution(1.0)
            .linear_damping(1.0)
            .build()
            .expect("valid body"),
    );

    handler.step();

    let body = handler.rigid_body(ball).expect("present");
    assert_relative_eq!(body.velocity().y, 3.0, epsilon = 1e-4);
    assert_relative_eq!(body.velocity().x, 1.0, epsilon = 1e-4);
    assert_eq!(handler.last_step_stats().manifold_count, 1);
}

#[test]
fn head_on_spheres_exchange_velocities() {
    let mut handler = PhysicsHandler::with_config(HandlerConfig::default().with_gravity(Vec3::ZERO));
    let make = |x: f32, vx: f32| {
        RigidBody::builder(Sphere::new(Vec3::ZERO, 0.5).expect("valid"))
            .position(Vec3::new(x, 0.0, 0.0))
            .velocity(Vec3::new(vx, 0.0, 0.0))
            .restitution(1.0)
            .linear_damping(1.0)
            .build()
            .expect("valid body")
    };
    let left = handler.add_rigid_body(make(-0.45, 2.0));
    let right = handler.add_rigid_body(make(0.45, 0.0));

    handler.step();

    let left = handler.rigid_body(left).expect("present");
    let right = handler.rigid_body(right).expect("present");
    assert_relative_eq!(left.velocity().x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(right.velocity().x, 2.0, epsilon = 1e-4);
}

#[test]
fn static_bodies_follow_the_same_removal_policy() {
    let mut handler = PhysicsHandler::new();
    let statics = handler.add_static_bodies((0..3).map(|i| {
        StaticBody::from_collider(
            Aabb::new(Vec3::new(i as f32 * 4.0, 0.0, 0.0), Vec3::ONE).expect("valid"),
        )
    }));

    assert_eq!(handler.static_body_count(), 3);
    assert!(handler.remove_static_body(statics[0]).is_some());
    assert_eq!(handler.remove_static_bodies(&[statics[0], statics[1]]), None);
    assert_eq!(handler.static_body_count(), 2);
    assert_eq!(handler.remove_static_bodies(&[statics[1], statics[2]]), Some(2));
    assert_eq!(handler.static_body_count(), 0);
}

#[test]
fn static_bodies_never_move() {
    let mut handler = PhysicsHandler::new();
    let wall = handler.add_static_body(StaticBody::from_collider(
        Aabb::new(Vec3::ZERO, Vec3::ONE).expect("valid"),
    ));
    handler.add_rigid_body(sphere_body(Vec3::new(0.0, 1.2, 0.0)));

    let mut dt = 1.0;
    handler.update(&mut dt);

    assert_eq!(handler.static_body(wall).expect("present").position(), Vec3::ZERO);
}

#[test]
fn parallel_and_sequential_narrow_phases_agree() {
    let build = |parallel: bool| {
        let mut handler =
            PhysicsHandler::with_config(HandlerConfig::default().with_parallel(parallel));
        for i in 0..6 {
            handler.add_rigid_body(sphere_body(Vec3::new(i as f32 * 0.8, 0.0, 0.0)));
        }
        handler
    };
    let mut sequential = build(false);
    let mut parallel = build(true);

    let a: Vec<_> = sequential.collect_manifolds().into_iter().map(|m| m.pair).collect();
    let b: Vec<_> = parallel.collect_manifolds().into_iter().map(|m| m.pair).collect();
    assert_eq!(a, b);
    assert_eq!(a.len(), 5);
}
