use glam::Vec3;

use crate::utils;

/// Third-person camera rig.
///
/// The eye sits at `offset` in the actor's local frame, so it follows the
/// actor's position and heading for free; only the offset height and the
/// aim change at runtime.
pub struct CameraRig {
    /// Eye offset from the actor origin, in the actor's frame.
    pub offset: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraRig {
    pub fn new(offset: Vec3) -> Self {
        let mut rig = Self {
            offset,
            yaw: 0.0,
            pitch: 0.0,
        };
        rig.look_at_origin();
        rig
    }

    pub fn height(&self) -> f32 {
        self.offset.z
    }

    pub fn set_height(&mut self, z: f32) {
        self.offset.z = z;
    }

    /// Aim the rig back at the actor-local origin. Neutral forward is +Y,
    /// yaw rotates about +Z, pitch tilts toward ±Z.
    pub fn look_at_origin(&mut self) {
        if let Some((dir, _)) = utils::dir_and_length(-self.offset) {
            self.yaw = (-dir.x).atan2(dir.y);
            self.pitch = dir.z.clamp(-1.0, 1.0).asin();
        }
    }

    /// World-space eye position for a body at `body_pos` with `heading`.
    pub fn world_eye(&self, body_pos: Vec3, heading: f32) -> Vec3 {
        body_pos + utils::heading_rotation(heading) * self.offset
    }
}
