use glam::{Quat, Vec3};

/// Unit direction and magnitude of `v`, or `None` for the zero vector.
/// Callers pick their own zero-vector convention instead of inheriting NaNs.
pub fn dir_and_length(v: Vec3) -> Option<(Vec3, f32)> {
    let len = v.length();
    if len <= f32::EPSILON {
        return None;
    }
    Some((v / len, len))
}

/// Rotation about the world vertical (+Z) by `heading` radians.
pub fn heading_rotation(heading: f32) -> Quat {
    Quat::from_rotation_z(heading)
}

/// Axis-aligned bounding volume in an actor's local frame, registered with
/// the external collision stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    /// Cube of half-size `r` centered on the local origin.
    pub fn cube(r: f32) -> Self {
        Self::new(Vec3::splat(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_and_length_zero_vector() {
        assert!(dir_and_length(Vec3::ZERO).is_none(), "zero vector has no direction");
    }

    #[test]
    fn test_dir_and_length_unit_axis() {
        let (dir, len) = dir_and_length(Vec3::new(0.0, 0.0, 200.0)).unwrap();
        assert!((len - 200.0).abs() < 1e-4);
        assert!((dir - Vec3::Z).length() < 1e-6, "direction should be the unit Z axis");
    }

    #[test]
    fn test_heading_rotation_quarter_turn() {
        // A quarter turn to the left maps local forward (+Y) onto world -X
        let rot = heading_rotation(std::f32::consts::FRAC_PI_2);
        let fwd = rot * Vec3::Y;
        assert!((fwd - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-6);
    }
}
