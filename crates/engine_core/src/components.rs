//! Common ECS components used by the scene composer.

use glam::Vec3;

/// Constant-rate rotation around +Y, evaluated from absolute elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    /// Radians per second.
    pub angular_velocity: f32,
}

impl Spin {
    pub fn new(angular_velocity: f32) -> Self {
        Self { angular_velocity }
    }

    /// Rotation angle at `elapsed` seconds. Not incremental, so it never drifts.
    pub fn angle_at(&self, elapsed: f32) -> f32 {
        elapsed * self.angular_velocity
    }
}

/// Point light attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    /// Cut-off distance; 0 means unbounded.
    pub distance: f32,
}

impl PointLight {
    pub fn new(color: Vec3, intensity: f32, distance: f32) -> Self {
        Self {
            color,
            intensity,
            distance,
        }
    }
}

/// Self-illumination for standard materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emissive {
    pub color: Vec3,
    pub intensity: f32,
}

/// Base surface colour for standard materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Albedo(pub Vec3);

/// Primitive shape the renderer should instance for this entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Octahedron { radius: f32 },
    Sphere { radius: f32, segments: u32 },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
}

/// Tag component for the spinning tree-top star.
#[derive(Debug, Clone, Copy, Default)]
pub struct Star;

/// Tag component for ornament spheres.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ornament;

/// Tag component for the trunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trunk;
