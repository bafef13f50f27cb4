use zeta_physics::*;

fn main() -> Result<(), PhysicsError> {
    let mut handler = PhysicsHandler::new();

    let floor = Plane::new(Vec3::ZERO, 20.0, 20.0, 0.0, -std::f32::consts::FRAC_PI_2)?;
    handler.add_static_body(StaticBody::from_collider(floor));

    let mut balls = Vec::new();
    for i in 0..5 {
        let body = RigidBody::builder(Sphere::new(Vec3::ZERO, 0.5)?)
            .position(Vec3::new(i as f32 * 1.5, 2.0 + i as f32, 0.0))
            .restitution(0.2 * i as f32)
            .build()?;
        balls.push(handler.add_rigid_body(body));
    }

    // Frames arrive at an uneven rate; the handler keeps the leftover time.
    let mut carry = 0.0;
    for frame in 0..180 {
        carry += if frame % 2 == 0 { 0.012 } else { 0.021 };
        handler.update(&mut carry);

        if frame % 30 == 0 {
            let heights: Vec<String> = balls
                .iter()
                .filter_map(|&handle| handler.rigid_body(handle))
                .map(|body| format!("{:.2}", body.position().y))
                .collect();
            println!("frame {frame:3}: {}", heights.join(" "));
        }
    }

    Ok(())
}
