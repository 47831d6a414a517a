//! Ornament placements and the tree-top star.

use crate::error::{ensure_count, ensure_finite, ensure_positive, Result};
use engine_core::Spin;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

pub const ORNAMENT_COUNT: usize = 70;

/// `0xRRGGBB` to linear-ish RGB in `[0, 1]` (no gamma conversion).
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// One decorative sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentPlacement {
    pub position: Vec3,
    pub color: Vec3,
}

/// Where ornaments hang: a cone hugging the foliage surface.
#[derive(Debug, Clone, PartialEq)]
pub struct OrnamentParams {
    /// Lowest ornament height.
    pub y_min: f32,
    /// Vertical span above `y_min`.
    pub y_span: f32,
    /// Y where the cone's normalised height is 0.
    pub cone_base_y: f32,
    /// Height over which the cone radius shrinks to `min_radius`.
    pub cone_height: f32,
    /// Radius added on top of `min_radius` at the cone base.
    pub radius_range: f32,
    pub min_radius: f32,
    /// Sphere radius.
    pub size: f32,
    pub palette: Vec<Vec3>,
}

impl Default for OrnamentParams {
    fn default() -> Self {
        Self {
            y_min: -3.8,
            y_span: 6.0,
            cone_base_y: -4.0,
            cone_height: 6.5,
            radius_range: 2.8,
            min_radius: 0.2,
            size: 0.07,
            palette: [0xff2222, 0x22ffcc, 0xffdd00, 0xffffff, 0xff00ff]
                .into_iter()
                .map(rgb_from_hex)
                .collect(),
        }
    }
}

impl OrnamentParams {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("ornament y min", self.y_min)?;
        ensure_finite("ornament y span", self.y_span)?;
        ensure_finite("ornament cone base", self.cone_base_y)?;
        ensure_positive("ornament cone height", self.cone_height)?;
        ensure_finite("ornament radius range", self.radius_range)?;
        ensure_finite("ornament min radius", self.min_radius)?;
        ensure_positive("ornament size", self.size)?;
        ensure_count("ornament palette size", self.palette.len())?;
        Ok(())
    }

    /// Distance from the axis for an ornament at height `y`.
    pub fn radius_at(&self, y: f32) -> f32 {
        let normalized = (y - self.cone_base_y) / self.cone_height;
        (1.0 - normalized) * self.radius_range + self.min_radius
    }
}

/// Scatter `count` ornaments over the cone surface.
pub fn place_ornaments<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    params: &OrnamentParams,
) -> Result<Vec<OrnamentPlacement>> {
    ensure_count("ornament count", count)?;
    params.validate()?;

    let placements: Vec<OrnamentPlacement> = (0..count)
        .map(|_| {
            let y = params.y_min + rng.gen::<f32>() * params.y_span;
            let radius = params.radius_at(y);
            let angle = rng.gen::<f32>() * TAU;
            // palette is non-empty after validate
            let color = params.palette[rng.gen_range(0..params.palette.len())];
            OrnamentPlacement {
                position: Vec3::new(angle.cos() * radius, y, angle.sin() * radius),
                color,
            }
        })
        .collect();

    log::debug!("placed {} ornaments", placements.len());
    Ok(placements)
}

/// The spinning star on top of the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSpec {
    pub position: Vec3,
    /// Octahedron circumradius.
    pub radius: f32,
    pub angular_velocity: f32,
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub light_color: Vec3,
    pub light_intensity: f32,
    pub light_distance: f32,
}

impl Default for StarSpec {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.3, 0.0),
            radius: 0.5,
            angular_velocity: 0.8,
            color: rgb_from_hex(0xffd700),
            emissive: rgb_from_hex(0xffaa00),
            emissive_intensity: 6.0,
            light_color: rgb_from_hex(0xffcc00),
            light_intensity: 15.0,
            light_distance: 10.0,
        }
    }
}

impl StarSpec {
    pub fn spin(&self) -> Spin {
        Spin::new(self.angular_velocity)
    }
}
