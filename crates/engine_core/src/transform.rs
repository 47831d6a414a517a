//! Transform component and utilities for spatial positioning.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform at `position` with a uniform scale.
    pub fn from_position_scale(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale: Vec3::splat(scale),
            ..Default::default()
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Replace the rotation with an absolute yaw around +Y.
    ///
    /// Absolute rather than incremental, so a frame drop never accumulates error.
    pub fn set_yaw(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle);
    }

    /// Current yaw around +Y in radians, in `(-PI, PI]`.
    pub fn yaw(&self) -> f32 {
        let forward = self.rotation * Vec3::X;
        (-forward.z).atan2(forward.x)
    }
}

/// Raw transform data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl From<Transform> for TransformRaw {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_yaw_is_absolute() {
        let mut t = Transform::from_position(Vec3::new(0.0, 2.3, 0.0));
        t.set_yaw(1.0);
        t.set_yaw(0.4);
        assert!((t.yaw() - 0.4).abs() < 1e-5);
        assert_eq!(t.position, Vec3::new(0.0, 2.3, 0.0));
    }

    #[test]
    fn raw_matrix_carries_translation() {
        let t = Transform::from_position_scale(Vec3::new(1.0, 2.0, 3.0), 0.07);
        let raw = TransformRaw::from(t);
        assert_eq!(raw.model[3][0], 1.0);
        assert_eq!(raw.model[3][1], 2.0);
        assert_eq!(raw.model[3][2], 3.0);
        assert!((raw.model[0][0] - 0.07).abs() < 1e-6);
    }
}
