use zeta_physics::*;

fn main() -> Result<(), PhysicsError> {
    let mut handler = PhysicsHandler::with_config(
        HandlerConfig::default().with_solver_iterations(10),
    );

    let ground = Aabb::new(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 10.0))?;
    handler.add_static_body(StaticBody::from_collider(ground).with_restitution(0.0)?);

    for i in 0..5 {
        let cube = Cube::new(Vec3::ZERO, Vec3::splat(0.5), 0.15 * i as f32, 0.0)?;
        let body = RigidBody::builder(cube)
            .position(Vec3::new(0.0, i as f32 * 1.05 + 0.55, 0.0))
            .restitution(0.0)
            .build()?;
        handler.add_rigid_body(body);
    }

    for _ in 0..120 {
        handler.step();
    }

    let stats = handler.last_step_stats();
    println!(
        "after 2 s: {} manifolds, {} contact points",
        stats.manifold_count, stats.contact_point_count
    );
    for (handle, body) in handler.rigid_bodies() {
        println!("{handle:?}: y = {:.3}", body.position().y);
    }

    Ok(())
}
