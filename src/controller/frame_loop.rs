use glam::{Vec2, Vec3};
use tracing::info;

use crate::controller::input::{Command, IntentState};
use crate::controller::mover::Mover;
use crate::model::{Body, CameraRig};
use crate::utils::Aabb;

/// Whether the host loop should keep scheduling ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Exit,
}

/// External collision stage. Runs after every integration step and may
/// replace the body's position (e.g. push it out of an overlap). The core
/// ships no collision response of its own.
pub trait CollisionAdjust {
    fn adjust(&self, bounds: &Aabb, pos: Vec3) -> Vec3;
}

/// Last-known pointer reading, device-normalized to [-1, 1] per axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Store a fresh reading. `None` keeps the previous values, so a missed
    /// device read does not glitch the look direction.
    pub fn sample(&mut self, reading: Option<(f32, f32)>) {
        if let Some((x, y)) = reading {
            self.x = x;
            self.y = y;
        }
    }

    pub fn delta(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Owns one actor's control state and runs one tick per call.
///
/// Everything runs synchronously inside [`FrameLoopContext::step`]; input
/// commands land between steps, so a tick only ever observes the latest
/// intent-set contents. One context per actor, no shared state.
pub struct FrameLoopContext {
    pub intents: IntentState,
    pub body: Body,
    pub camera: CameraRig,
    pub pointer: PointerState,
    mover: Mover,
    collider: Option<(Aabb, Box<dyn CollisionAdjust>)>,
}

impl FrameLoopContext {
    /// Spawn an actor at `spawn_pos` (its height becomes the grounded
    /// threshold) with the camera at `camera_offset` in the actor's frame.
    pub fn new(spawn_pos: Vec3, camera_offset: Vec3) -> Self {
        info!(?spawn_pos, "spawning actor");
        Self {
            intents: IntentState::new(),
            body: Body::new(spawn_pos, 0.0, 1.0),
            camera: CameraRig::new(camera_offset),
            pointer: PointerState::default(),
            mover: Mover::new(spawn_pos.z),
            collider: None,
        }
    }

    /// Register the body-local bounding volume with an external collision
    /// stage; it gets the final say on the position each tick.
    pub fn register_collider(&mut self, bounds: Aabb, adjust: Box<dyn CollisionAdjust>) {
        self.collider = Some((bounds, adjust));
    }

    /// Route a discrete input command into the intent state.
    pub fn apply(&mut self, cmd: Command) -> TickFlow {
        match cmd {
            Command::StartWalk(dir) => self.intents.start_walk(dir),
            Command::StopWalk(dir) => self.intents.stop_walk(Some(dir)),
            Command::StartFly(dir) => self.intents.start_fly(dir),
            Command::StopFly(dir) => self.intents.stop_fly(Some(dir)),
            Command::Jump => self.intents.trigger_jump(),
            Command::Quit => return TickFlow::Exit,
        }
        TickFlow::Continue
    }

    /// One tick: the controller pass, then the external collision stage.
    pub fn step(&mut self, dt: f32) -> TickFlow {
        self.mover.execute(
            dt,
            &mut self.intents,
            &mut self.body,
            &mut self.camera,
            self.pointer.delta(),
        );
        if let Some((bounds, adjust)) = &self.collider {
            self.body.pos = adjust.adjust(bounds, self.body.pos);
        }
        TickFlow::Continue
    }
}
