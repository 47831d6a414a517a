//! Spatial distributions used to scatter particles.
//!
//! Every sampler is a pure function of its parameters and the supplied RNG,
//! so seeding the RNG reproduces a scene exactly.

use crate::error::{ensure_count, ensure_finite, ensure_ordered, ensure_positive, ProcgenError, Result};
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Flat disc in the XZ plane with a biased radial distribution and a thin
/// vertical band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscParams {
    /// Maximum distance from the Y axis.
    pub radius: f32,
    /// Exponent applied to the uniform radial draw. Below 1 pushes mass
    /// toward the rim, above 1 pulls it toward the centre.
    pub bias_exponent: f32,
    /// Lower edge of the vertical band (inclusive).
    pub y_min: f32,
    /// Upper edge of the vertical band (exclusive).
    pub y_max: f32,
}

impl DiscParams {
    /// The snow pool lying under the tree.
    pub const BASE_SNOW: Self = Self {
        radius: 5.0,
        bias_exponent: 0.7,
        y_min: -4.7,
        y_max: -4.55,
    };

    pub fn validate(&self) -> Result<()> {
        ensure_finite("disc radius", self.radius)?;
        if self.radius < 0.0 {
            return Err(ProcgenError::InvalidRange {
                what: "disc radius",
                value: self.radius,
                expected: ">= 0",
            });
        }
        ensure_positive("disc bias exponent", self.bias_exponent)?;
        ensure_ordered("disc y band", self.y_min, self.y_max)
    }
}

impl Default for DiscParams {
    fn default() -> Self {
        Self::BASE_SNOW
    }
}

/// Random XZ offset inside a disc of `radius`, uniform in angle, with radial
/// distance `u^bias_exponent * radius`. Callers validate the inputs.
pub(crate) fn disc_offset<R: Rng + ?Sized>(rng: &mut R, radius: f32, bias_exponent: f32) -> Vec2 {
    let angle = rng.gen::<f32>() * TAU;
    let dist = rng.gen::<f32>().powf(bias_exponent) * radius;
    Vec2::new(angle.cos() * dist, angle.sin() * dist)
}

/// One point on the disc described by `params`.
pub fn disc_sample<R: Rng + ?Sized>(rng: &mut R, params: &DiscParams) -> Result<Vec3> {
    params.validate()?;
    Ok(disc_point(rng, params))
}

/// [`disc_sample`] for parameters that already passed `validate`.
pub(crate) fn disc_point<R: Rng + ?Sized>(rng: &mut R, params: &DiscParams) -> Vec3 {
    let offset = disc_offset(rng, params.radius, params.bias_exponent);
    let y = params.y_min + rng.gen::<f32>() * (params.y_max - params.y_min);
    Vec3::new(offset.x, y, offset.y)
}

/// Layered cone: `tier_count` stacked bands, each narrower than the one below
/// and each tapering toward its own top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieredConeParams {
    pub tier_count: u32,
    /// Height of a single band.
    pub tier_height: f32,
    /// Radius at the bottom of tier 0.
    pub base_radius: f32,
    /// Y of the bottom of tier 0.
    pub base_y: f32,
    /// Fraction of a tier's radius lost between its bottom and its top.
    pub tier_shrink: f32,
    /// Radial bias exponent, see [`DiscParams::bias_exponent`].
    pub radial_bias: f32,
}

impl TieredConeParams {
    /// The five-tier foliage cone.
    pub const FOLIAGE: Self = Self {
        tier_count: 5,
        tier_height: 1.2,
        base_radius: 3.0,
        base_y: -4.0,
        tier_shrink: 0.45,
        radial_bias: 0.6,
    };

    pub fn validate(&self) -> Result<()> {
        ensure_count("tier count", self.tier_count as usize)?;
        ensure_positive("tier height", self.tier_height)?;
        ensure_positive("cone base radius", self.base_radius)?;
        ensure_finite("cone base y", self.base_y)?;
        ensure_finite("tier shrink", self.tier_shrink)?;
        if !(0.0..1.0).contains(&self.tier_shrink) {
            return Err(ProcgenError::InvalidRange {
                what: "tier shrink",
                value: self.tier_shrink,
                expected: "[0, 1)",
            });
        }
        ensure_positive("cone radial bias", self.radial_bias)?;
        Ok(())
    }

    /// Radius at the bottom of `tier`. Strictly decreasing in `tier`.
    pub fn tier_radius(&self, tier: u32) -> f32 {
        (1.0 - tier as f32 / self.tier_count as f32) * self.base_radius
    }

    /// Y of the bottom of `tier`.
    pub fn tier_base(&self, tier: u32) -> f32 {
        self.base_y + tier as f32 * self.tier_height
    }

    pub fn total_height(&self) -> f32 {
        self.tier_count as f32 * self.tier_height
    }

    /// Height above the cone base as a fraction of the total height.
    pub fn normalized_height(&self, y: f32) -> f32 {
        (y - self.base_y) / self.total_height()
    }
}

impl Default for TieredConeParams {
    fn default() -> Self {
        Self::FOLIAGE
    }
}

/// A tiered-cone draw together with the tier it landed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeSample {
    pub position: Vec3,
    pub tier: u32,
    /// Where inside its tier the point sits, in `[0, 1)`.
    pub vertical_fraction: f32,
}

/// One point in the tiered cone. Rejects parameters that would panic the
/// tier draw or produce non-finite points.
pub fn tiered_cone_sample<R: Rng + ?Sized>(
    rng: &mut R,
    params: &TieredConeParams,
) -> Result<ConeSample> {
    params.validate()?;
    Ok(cone_point(rng, params))
}

/// [`tiered_cone_sample`] for parameters that already passed `validate`.
pub(crate) fn cone_point<R: Rng + ?Sized>(rng: &mut R, params: &TieredConeParams) -> ConeSample {
    let tier = rng.gen_range(0..params.tier_count);
    let vertical_fraction = rng.gen::<f32>();
    let y = params.tier_base(tier) + vertical_fraction * params.tier_height;

    let radius = params.tier_radius(tier) * (1.0 - vertical_fraction * params.tier_shrink);
    let offset = disc_offset(rng, radius, params.radial_bias);

    ConeSample {
        position: Vec3::new(offset.x, y, offset.y),
        tier,
        vertical_fraction,
    }
}

/// Axis-aligned box in XZ with a vertical range; used to seed falling snow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxParams {
    /// Half-width in X and Z.
    pub half_extent: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl BoxParams {
    pub const FALLING_SNOW: Self = Self {
        half_extent: 15.0,
        y_min: -5.0,
        y_max: 20.0,
    };

    pub fn validate(&self) -> Result<()> {
        ensure_positive("box half extent", self.half_extent)?;
        ensure_ordered("box y range", self.y_min, self.y_max)
    }
}

impl Default for BoxParams {
    fn default() -> Self {
        Self::FALLING_SNOW
    }
}

pub fn box_sample<R: Rng + ?Sized>(rng: &mut R, params: &BoxParams) -> Result<Vec3> {
    params.validate()?;
    Ok(box_point(rng, params))
}

pub(crate) fn box_point<R: Rng + ?Sized>(rng: &mut R, params: &BoxParams) -> Vec3 {
    let span = params.half_extent * 2.0;
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * span,
        params.y_min + rng.gen::<f32>() * (params.y_max - params.y_min),
        (rng.gen::<f32>() - 0.5) * span,
    )
}

/// Helix sampled at `segment_count + 1` evenly spaced parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    pub segment_count: u32,
    pub loop_count: f32,
    pub start_height: f32,
    pub end_height: f32,
    pub start_radius: f32,
    /// Radius reached at the top; keeps the ribbon off the tree's axis.
    pub end_radius_floor: f32,
    pub wobble_amplitude: f32,
}

impl SpiralParams {
    /// Golden ribbon winding over the foliage, clear of the trunk.
    pub const RIBBON: Self = Self {
        segment_count: 150,
        loop_count: 6.0,
        start_height: -3.4,
        end_height: 2.1,
        start_radius: 2.95,
        end_radius_floor: 0.15,
        wobble_amplitude: 0.04,
    };

    pub fn validate(&self) -> Result<()> {
        ensure_count("spiral segment count", self.segment_count as usize)?;
        ensure_finite("spiral loop count", self.loop_count)?;
        ensure_finite("spiral start height", self.start_height)?;
        ensure_finite("spiral end height", self.end_height)?;
        ensure_finite("spiral start radius", self.start_radius)?;
        ensure_finite("spiral end radius", self.end_radius_floor)?;
        ensure_finite("spiral wobble", self.wobble_amplitude)?;
        Ok(())
    }

    /// Point at parameter `t` in `[0, 1]`.
    pub fn point(&self, t: f32) -> Vec3 {
        let y = self.start_height + t * (self.end_height - self.start_height);
        let radius = self.start_radius + t * (self.end_radius_floor - self.start_radius);
        let angle = t * TAU * self.loop_count;
        let wobble = (t * 20.0).sin() * self.wobble_amplitude;
        let r = radius + wobble;
        Vec3::new(angle.cos() * r, y, angle.sin() * r)
    }
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self::RIBBON
    }
}

/// Control points of the spiral, ordered bottom to top.
pub fn spiral_curve_points(params: &SpiralParams) -> Result<Vec<Vec3>> {
    params.validate()?;
    let segments = params.segment_count;
    Ok((0..=segments)
        .map(|i| params.point(i as f32 / segments as f32))
        .collect())
}

/// Foliage colour ramp: greener toward the bottom of the cone, with a small
/// random variance per point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliagePalette {
    /// RGB at the very top before variance.
    pub base: Vec3,
    /// Extra green added at the bottom of the cone, fading to 0 at the top.
    pub height_gain: f32,
    /// Upper bound of the uniform variance draw.
    pub variance: f32,
    /// How much of the variance leaks into red and blue.
    pub variance_scale: f32,
}

impl FoliagePalette {
    pub const EVERGREEN: Self = Self {
        base: Vec3::new(0.01, 0.12, 0.03),
        height_gain: 0.25,
        variance: 0.15,
        variance_scale: 0.05,
    };

    pub fn validate(&self) -> Result<()> {
        ensure_finite("palette red", self.base.x)?;
        ensure_finite("palette green", self.base.y)?;
        ensure_finite("palette blue", self.base.z)?;
        ensure_finite("palette height gain", self.height_gain)?;
        ensure_finite("palette variance", self.variance)?;
        ensure_finite("palette variance scale", self.variance_scale)?;
        Ok(())
    }
}

impl Default for FoliagePalette {
    fn default() -> Self {
        Self::EVERGREEN
    }
}

/// Colour for a foliage point at `normalized_height` (0 = cone base, 1 = top).
pub fn foliage_color<R: Rng + ?Sized>(
    rng: &mut R,
    palette: &FoliagePalette,
    normalized_height: f32,
) -> Vec3 {
    let var = rng.gen::<f32>() * palette.variance;
    Vec3::new(
        palette.base.x + var * palette.variance_scale,
        palette.base.y + (1.0 - normalized_height) * palette.height_gain + var,
        palette.base.z + var * palette.variance_scale,
    )
    .clamp(Vec3::ZERO, Vec3::ONE)
}
