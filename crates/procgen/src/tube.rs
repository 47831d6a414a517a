//! Tube mesh swept along a curve.
//!
//! Frames are propagated by parallel transport (rotation-minimising), so the
//! tube does not twist as the helix winds upward.

use crate::curve::CatmullRomCurve;
use crate::error::{ensure_count, ensure_positive, Result};
use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};
use std::f32::consts::TAU;

/// Vertex with position, normal and UV.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeParams {
    /// Rings along the curve.
    pub tubular_segments: u32,
    pub radius: f32,
    /// Vertices around each ring (plus one seam duplicate).
    pub radial_segments: u32,
    pub closed: bool,
}

impl TubeParams {
    /// Thin golden ribbon.
    pub const RIBBON: Self = Self {
        tubular_segments: 150,
        radius: 0.012,
        radial_segments: 8,
        closed: false,
    };

    pub fn validate(&self) -> Result<()> {
        ensure_count("tubular segments", self.tubular_segments as usize)?;
        ensure_count("radial segments", self.radial_segments as usize)?;
        ensure_positive("tube radius", self.radius)?;
        Ok(())
    }
}

impl Default for TubeParams {
    fn default() -> Self {
        Self::RIBBON
    }
}

/// Tangent, normal and binormal at each ring.
#[derive(Debug, Clone)]
pub struct FrenetFrames {
    pub tangents: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

impl FrenetFrames {
    pub fn compute(curve: &CatmullRomCurve, segments: u32, closed: bool) -> Self {
        let segments = segments as usize;
        let tangents: Vec<Vec3> = (0..=segments)
            .map(|i| curve.tangent_at_uniform(i as f32 / segments as f32))
            .collect();

        let mut normals = vec![Vec3::ZERO; segments + 1];
        let mut binormals = vec![Vec3::ZERO; segments + 1];

        // Initial normal: perpendicular to the tangent, seeded from the axis
        // the tangent is least aligned with.
        let t0 = tangents[0];
        let abs = t0.abs();
        let axis = if abs.x <= abs.y && abs.x <= abs.z {
            Vec3::X
        } else if abs.y <= abs.z {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let v = t0.cross(axis).normalize_or_zero();
        normals[0] = t0.cross(v);
        binormals[0] = t0.cross(normals[0]);

        for i in 1..=segments {
            normals[i] = normals[i - 1];
            let v = tangents[i - 1].cross(tangents[i]);
            if v.length() > f32::EPSILON {
                let v = v.normalize();
                let theta = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
                normals[i] = Quat::from_axis_angle(v, theta) * normals[i];
            }
            binormals[i] = tangents[i].cross(normals[i]);
        }

        if closed {
            // Spread the residual twist evenly so the seam lines up.
            let mut theta = normals[0].dot(normals[segments]).clamp(-1.0, 1.0).acos() / segments as f32;
            if tangents[0].dot(normals[0].cross(normals[segments])) > 0.0 {
                theta = -theta;
            }
            for i in 1..=segments {
                normals[i] = Quat::from_axis_angle(tangents[i], theta * i as f32) * normals[i];
                binormals[i] = tangents[i].cross(normals[i]);
            }
        }

        Self {
            tangents,
            normals,
            binormals,
        }
    }
}

/// Indexed triangle mesh of a tube.
#[derive(Debug, Clone)]
pub struct TubeMesh {
    pub vertices: Vec<TubeVertex>,
    pub indices: Vec<u32>,
}

impl TubeMesh {
    pub fn build(curve: &CatmullRomCurve, params: &TubeParams) -> Result<Self> {
        params.validate()?;
        let tubular = params.tubular_segments as usize;
        let radial = params.radial_segments as usize;
        let frames = FrenetFrames::compute(curve, params.tubular_segments, params.closed);

        let mut vertices = Vec::with_capacity((tubular + 1) * (radial + 1));
        for i in 0..=tubular {
            // A closed tube reuses the first ring as its last.
            let ring = if params.closed && i == tubular { 0 } else { i };
            let center = curve.point_at_uniform(ring as f32 / tubular as f32);
            let n = frames.normals[ring];
            let b = frames.binormals[ring];

            for j in 0..=radial {
                let v = j as f32 / radial as f32 * TAU;
                let sin = v.sin();
                let cos = -v.cos();
                let normal = (n * cos + b * sin).normalize_or_zero();
                let position = center + normal * params.radius;
                vertices.push(TubeVertex {
                    position: position.into(),
                    normal: normal.into(),
                    uv: [i as f32 / tubular as f32, j as f32 / radial as f32],
                });
            }
        }

        let stride = (radial + 1) as u32;
        let mut indices = Vec::with_capacity(tubular * radial * 6);
        for j in 1..=tubular as u32 {
            for i in 1..=radial as u32 {
                let a = stride * (j - 1) + (i - 1);
                let b = stride * j + (i - 1);
                let c = stride * j + i;
                let d = stride * (j - 1) + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        log::debug!(
            "tube mesh: {} vertices, {} triangles, length {:.2}",
            vertices.len(),
            indices.len() / 3,
            curve.length()
        );

        Ok(Self { vertices, indices })
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
