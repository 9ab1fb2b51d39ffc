use glam::Vec3;
use tracing::trace;

use crate::utils;

/// Force-accumulating physics body.
///
/// Coordinates are Z-up; body-local +Y is forward and +X is right, rotated
/// into world space by `heading`. Forces queued with [`Body::apply_force`]
/// are drained by the next [`Body::integrate`] call and are never visible
/// outside the body.
pub struct Body {
    pub pos: Vec3,
    /// Rotation about the world vertical, in radians.
    pub heading: f32,
    pub vel: Vec3,
    pub mass: f32,
    forces: Vec<Vec3>,
}

impl Body {
    /// Constant downward pull. Deliberately not scaled by mass: every body
    /// accelerates differently under it (accel = force / mass), unlike
    /// real-world gravity.
    pub const GRAVITY_FORCE: Vec3 = Vec3::new(0.0, 0.0, -1.0);
    pub const JUMP_FORCE: Vec3 = Vec3::new(0.0, 0.0, 200.0);

    pub fn new(pos: Vec3, heading: f32, mass: f32) -> Self {
        Self {
            pos,
            heading,
            vel: Vec3::ZERO,
            mass,
            forces: Vec::new(),
        }
    }

    /// Queue a force for the next integration step.
    pub fn apply_force(&mut self, force: Vec3) {
        self.forces.push(force);
    }

    pub fn apply_gravity(&mut self) {
        self.apply_force(Self::GRAVITY_FORCE);
    }

    /// Rotate the body around the world vertical by `angle` radians.
    pub fn turn(&mut self, angle: f32) {
        self.heading += angle;
    }

    /// Translate in the body's own frame.
    pub fn translate_local(&mut self, delta: Vec3) {
        self.pos += utils::heading_rotation(self.heading) * delta;
    }

    /// Move along the world vertical, bypassing the force pipeline.
    pub fn lift(&mut self, dz: f32) {
        self.pos.z += dz;
    }

    /// One tick of integration: derive acceleration from the queued forces,
    /// fold it into the velocity, advance the position.
    ///
    /// The velocity rule is `v += normalize(a) * sqrt(|a|) * 2 * mass` — a
    /// gameplay curve, not textbook mechanics. A zero net force leaves the
    /// velocity untouched (normalizing the zero vector is undefined).
    pub fn integrate(&mut self, dt: f32) {
        let accel = self.forces.drain(..).sum::<Vec3>() / self.mass;
        if let Some((dir, len)) = utils::dir_and_length(accel) {
            self.vel += dir * len.sqrt() * 2.0 * self.mass;
        }
        self.pos += self.vel * dt;
        trace!(?accel, vel = ?self.vel, pos = ?self.pos, "body integrated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAWN: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_integrate_without_forces_keeps_velocity() {
        let mut body = Body::new(SPAWN, 0.0, 1.0);
        body.vel = Vec3::new(3.0, 0.0, 0.0);

        body.integrate(0.5);

        assert!(approx(body.vel, Vec3::new(3.0, 0.0, 0.0)), "velocity must not change");
        assert!(approx(body.pos, SPAWN + Vec3::new(1.5, 0.0, 0.0)), "position advances by v * dt");
    }

    #[test]
    fn test_jump_force_single_tick() {
        let mut body = Body::new(SPAWN, 0.0, 1.0);
        body.apply_force(Body::JUMP_FORCE);

        body.integrate(1.0);

        // v = (0,0,1) * sqrt(200) * 2 * 1 ≈ (0, 0, 28.284)
        let expected = 200.0f32.sqrt() * 2.0;
        assert!((body.vel.z - expected).abs() < 1e-2, "vel.z = {}", body.vel.z);
        assert!((body.pos.z - (SPAWN.z + expected)).abs() < 1e-2);
    }

    #[test]
    fn test_forces_drained_every_integration() {
        let mut body = Body::new(SPAWN, 0.0, 1.0);
        body.apply_force(Body::JUMP_FORCE);
        body.integrate(1.0);
        let vel_after_first = body.vel;

        // Second tick sees no queued forces, so the velocity coasts
        body.integrate(1.0);
        assert!(approx(body.vel, vel_after_first), "drained forces must not re-apply");
    }

    #[test]
    fn test_gravity_acceleration_depends_on_mass() {
        let mut light = Body::new(SPAWN, 0.0, 1.0);
        let mut heavy = Body::new(SPAWN, 0.0, 4.0);
        light.apply_gravity();
        heavy.apply_gravity();

        light.integrate(1.0);
        heavy.integrate(1.0);

        // Same unit force, so accel = 1/m; v = -sqrt(1/m) * 2 * m
        assert!((light.vel.z - (-2.0)).abs() < 1e-3, "light vel.z = {}", light.vel.z);
        assert!((heavy.vel.z - (-4.0)).abs() < 1e-3, "heavy vel.z = {}", heavy.vel.z);
    }

    #[test]
    fn test_translate_local_follows_heading() {
        let mut body = Body::new(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 1.0);

        // Local forward (+Y) with a quarter-turn heading is world -X
        body.translate_local(Vec3::new(0.0, 2.0, 0.0));
        assert!(approx(body.pos, Vec3::new(-2.0, 0.0, 0.0)), "pos = {:?}", body.pos);
    }

    #[test]
    fn test_lift_is_kinematic() {
        let mut body = Body::new(SPAWN, 0.0, 1.0);
        body.lift(0.5);
        assert!(approx(body.pos, SPAWN + Vec3::new(0.0, 0.0, 0.5)));
        assert!(approx(body.vel, Vec3::ZERO), "lift must not touch the velocity");
    }
}
