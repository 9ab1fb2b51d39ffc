// CONTROLLER: input aggregation, movement logic, and the per-tick loop
pub mod frame_loop;
pub mod input;
pub mod mover;

pub use frame_loop::{CollisionAdjust, FrameLoopContext, PointerState, TickFlow};
pub use input::{Command, FlyDir, IntentState, KeyBindings, WalkDir};
pub use mover::Mover;
