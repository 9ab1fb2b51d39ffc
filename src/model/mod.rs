// MODEL: simulation state (physics body + camera rig)
pub mod body;
pub mod camera;

pub use body::Body;
pub use camera::CameraRig;
