//! Presentation profiles: the same tree framed for different audiences.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// How the scene is presented. Only the framing and the surrounding UI
/// change; the generated tree is identical across profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationProfile {
    /// Plain viewer.
    #[default]
    Standard,
    /// Pulled-back camera with the splash screen.
    Gallery,
    /// Widest framing, plus the QR share panel.
    Share,
}

/// Orbit camera settings handed to the composer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per second of automatic orbit.
    pub auto_rotate_speed: f32,
    pub max_polar_angle: f32,
    pub enable_pan: bool,
}

impl PresentationProfile {
    pub fn camera(self) -> CameraRig {
        let distance = match self {
            Self::Standard => 15.0,
            Self::Gallery => 18.0,
            Self::Share => 20.0,
        };
        CameraRig {
            position: Vec3::new(0.0, 1.0, distance),
            fov_degrees: 35.0,
            min_distance: 7.0,
            max_distance: 25.0,
            auto_rotate_speed: 0.5,
            max_polar_angle: PI / 1.7,
            enable_pan: false,
        }
    }

    pub fn splash_screen(self) -> bool {
        !matches!(self, Self::Standard)
    }

    pub fn qr_share(self) -> bool {
        matches!(self, Self::Share)
    }
}

/// Static lights around the tree. The star carries its own light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub ambient_intensity: f32,
    pub key_position: Vec3,
    pub key_intensity: f32,
    /// `(position, color, intensity, distance)`; a distance of zero means no falloff cutoff.
    pub fills: [(Vec3, Vec3, f32, f32); 3],
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.4,
            key_position: Vec3::new(10.0, 20.0, 10.0),
            key_intensity: 3.0,
            fills: [
                (Vec3::new(-10.0, 5.0, -5.0), Vec3::ONE, 1.5, 0.0),
                (
                    Vec3::new(5.0, 2.0, -10.0),
                    procgen::rgb_from_hex(0x4477ff),
                    2.0,
                    0.0,
                ),
                (
                    Vec3::new(0.0, -4.0, 0.0),
                    procgen::rgb_from_hex(0xffcc00),
                    1.2,
                    10.0,
                ),
            ],
        }
    }
}
