use glam::{Vec2, Vec3};

use crate::controller::input::IntentState;
use crate::model::{Body, CameraRig};

/// Per-tick movement logic: turns the aggregated intents and the pointer
/// delta into body and camera mutations, then runs the integrator.
pub struct Mover {
    pub walk_speed: f32,
    /// Degrees per second per unit of pointer delta; also the rate for the
    /// camera height adjustment, in source units.
    pub turn_speed: f32,
    pub fly_speed: f32,
    /// Symmetric bound on the camera offset height.
    pub camera_bound: f32,
    ground_height: f32,
}

impl Mover {
    pub fn new(ground_height: f32) -> Self {
        Self {
            walk_speed: 20.0,
            turn_speed: 1000.0,
            fly_speed: 5.0,
            camera_bound: 20.0,
            ground_height,
        }
    }

    /// Body-local walk step. The net intent's x drives the forward axis,
    /// y the strafe axis, both negated.
    fn straight_walk(&self, dt: f32, intents: &IntentState, body: &mut Body) {
        let v = intents.walk_vector();
        let mut step = Vec3::ZERO;
        if v.x != 0.0 {
            step.y = -v.x * self.walk_speed * dt;
        }
        if v.y != 0.0 {
            step.x = -v.y * self.walk_speed * dt;
        }
        body.translate_local(step);
    }

    /// One force application per trigger, then the flag is consumed.
    fn jump(&self, intents: &mut IntentState, body: &mut Body) {
        body.apply_force(Body::JUMP_FORCE);
        intents.consume_jump();
    }

    /// Kinematic vertical movement; never touches the integrator.
    fn fly(&self, dt: f32, intents: &IntentState, body: &mut Body) {
        let sign = intents.fly_sign();
        if sign != 0.0 {
            body.lift(sign * self.fly_speed * dt);
        }
    }

    /// Mouse-look: horizontal delta turns the body, vertical delta slides
    /// the camera height within its bound and re-aims at the actor.
    fn turn(&self, dt: f32, pointer: Vec2, body: &mut Body, camera: &mut CameraRig) {
        if pointer.x != 0.0 {
            body.turn((-self.turn_speed * dt * pointer.x).to_radians());
        }
        if pointer.y != 0.0 {
            let z = camera.height() - self.turn_speed * dt * pointer.y;
            camera.set_height(z.clamp(-self.camera_bound, self.camera_bound));
            camera.look_at_origin();
        }
    }

    /// One controller tick, in fixed order: walk, jump, fly, turn, gravity
    /// gating, integration. Below the ground height the velocity is zeroed
    /// outright rather than damped.
    pub fn execute(
        &self,
        dt: f32,
        intents: &mut IntentState,
        body: &mut Body,
        camera: &mut CameraRig,
        pointer: Vec2,
    ) {
        if intents.walking() {
            self.straight_walk(dt, intents, body);
        }
        if intents.jump_pending() {
            self.jump(intents, body);
        }
        if intents.flying() {
            self.fly(dt, intents, body);
        }
        self.turn(dt, pointer, body, camera);

        if body.pos.z > self.ground_height {
            body.apply_gravity();
        } else {
            body.vel = Vec3::ZERO;
        }
        body.integrate(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::{FlyDir, WalkDir};

    const SPAWN: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 19.4, 4.85);

    fn rig() -> (Mover, IntentState, Body, CameraRig) {
        (
            Mover::new(SPAWN.z),
            IntentState::new(),
            Body::new(SPAWN, 0.0, 1.0),
            CameraRig::new(CAMERA_OFFSET),
        )
    }

    #[test]
    fn test_walk_front_one_tick() {
        let (mover, mut intents, mut body, mut camera) = rig();
        intents.start_walk(WalkDir::Front);

        mover.execute(0.1, &mut intents, &mut body, &mut camera, Vec2::ZERO);

        // Forward axis moves by -20 * 0.1; the offset is kinematic, so the
        // integrator never sees it
        assert!((body.pos.y - (-2.0)).abs() < 1e-4, "pos.y = {}", body.pos.y);
        assert!(body.vel.length() < 1e-6, "walking must not build velocity");
    }

    #[test]
    fn test_jump_applies_exactly_once() {
        let (mover, mut intents, mut body, mut camera) = rig();
        intents.trigger_jump();

        mover.execute(1.0, &mut intents, &mut body, &mut camera, Vec2::ZERO);
        assert!(!intents.jump_pending(), "flag must be consumed by the tick");
        let vel_after_jump = body.vel.z;
        assert!(vel_after_jump > 20.0, "vel.z = {}", vel_after_jump);

        // Next tick only sees gravity, never a second jump force
        mover.execute(1.0, &mut intents, &mut body, &mut camera, Vec2::ZERO);
        assert!(body.vel.z < vel_after_jump);
    }

    #[test]
    fn test_grounded_tick_zeroes_velocity() {
        let (mover, mut intents, mut body, mut camera) = rig();
        body.pos.z = SPAWN.z;
        body.vel = Vec3::new(4.0, -3.0, -7.0);

        mover.execute(0.1, &mut intents, &mut body, &mut camera, Vec2::ZERO);

        assert_eq!(body.vel, Vec3::ZERO, "grounded reset zeroes, not damps");
    }

    #[test]
    fn test_airborne_tick_applies_gravity() {
        let (mover, mut intents, mut body, mut camera) = rig();
        body.pos.z = 10.0;

        mover.execute(1.0, &mut intents, &mut body, &mut camera, Vec2::ZERO);

        // Unit gravity force, mass 1: v = -(sqrt(1) * 2)
        assert!((body.vel.z - (-2.0)).abs() < 1e-3, "vel.z = {}", body.vel.z);
    }

    #[test]
    fn test_camera_height_clamps_at_bound() {
        let (mover, mut intents, mut body, mut camera) = rig();

        // Hold a full-scale downward pointer delta well past the bound
        for _ in 0..50 {
            mover.execute(0.1, &mut intents, &mut body, &mut camera, Vec2::new(0.0, 1.0));
        }
        assert_eq!(camera.height(), -20.0, "height must clamp exactly");

        for _ in 0..50 {
            mover.execute(0.1, &mut intents, &mut body, &mut camera, Vec2::new(0.0, -1.0));
        }
        assert_eq!(camera.height(), 20.0);
    }

    #[test]
    fn test_horizontal_pointer_turns_body() {
        let (mover, mut intents, mut body, mut camera) = rig();

        mover.execute(0.1, &mut intents, &mut body, &mut camera, Vec2::new(0.5, 0.0));

        // -1000 deg/s * 0.1 s * 0.5 = -50 degrees
        let expected = (-50.0f32).to_radians();
        assert!((body.heading - expected).abs() < 1e-4, "heading = {}", body.heading);
    }

    #[test]
    fn test_fly_tick_is_kinematic_plus_gravity() {
        let (mover, mut intents, mut body, mut camera) = rig();
        intents.start_fly(FlyDir::Up);

        mover.execute(0.1, &mut intents, &mut body, &mut camera, Vec2::ZERO);

        // Lift raises by 5 * 0.1 before the gravity gate sees an airborne
        // body; gravity then adds v.z = -2, moving -0.2 this tick
        assert!((body.pos.z - 1.3).abs() < 1e-3, "pos.z = {}", body.pos.z);
        assert!((body.vel.z - (-2.0)).abs() < 1e-3, "vel.z = {}", body.vel.z);
    }

    #[test]
    fn test_cancelled_fly_leaves_height_alone() {
        let (mover, mut intents, mut body, mut camera) = rig();
        intents.start_fly(FlyDir::Up);
        intents.start_fly(FlyDir::Down);

        mover.execute(0.1, &mut intents, &mut body, &mut camera, Vec2::ZERO);

        assert!((body.pos.z - SPAWN.z).abs() < 1e-6);
    }
}
