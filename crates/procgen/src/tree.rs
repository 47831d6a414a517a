//! Tree foliage, the snow pool under it, and the trunk.

use crate::error::Result;
use crate::field::ParticleField;
use crate::sampler::{
    cone_point, disc_point, foliage_color, DiscParams, FoliagePalette, TieredConeParams,
};
use glam::Vec3;
use rand::Rng;

/// Default foliage population.
pub const FOLIAGE_COUNT: usize = 30_000;
/// Default snow pool population.
pub const BASE_SNOW_COUNT: usize = 8_000;

/// Coloured point cloud for the layered foliage cone.
pub fn build_foliage<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    cone: &TieredConeParams,
    palette: &FoliagePalette,
) -> Result<ParticleField> {
    cone.validate()?;
    palette.validate()?;
    let field = ParticleField::build_colored(count, rng, |rng| {
        let sample = cone_point(rng, cone);
        let color = foliage_color(rng, palette, cone.normalized_height(sample.position.y));
        (sample.position, color)
    })?;
    log::debug!("foliage: {} points over {} tiers", field.count(), cone.tier_count);
    Ok(field)
}

/// Flat pool of settled snow around the trunk.
pub fn build_base_snow<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    disc: &DiscParams,
) -> Result<ParticleField> {
    disc.validate()?;
    let field = ParticleField::build(count, rng, |rng| disc_point(rng, disc))?;
    log::debug!("base snow: {} points, radius {}", field.count(), disc.radius);
    Ok(field)
}

/// Static trunk cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrunkSpec {
    pub center: Vec3,
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub color: Vec3,
}

impl Default for TrunkSpec {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, -4.1, 0.0),
            radius_top: 0.2,
            radius_bottom: 0.3,
            height: 1.2,
            radial_segments: 12,
            color: crate::decorations::rgb_from_hex(0x1a0f08),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn single_point_cone_lands_inside_the_tree() {
        let mut rng = StdRng::seed_from_u64(2024);
        let cone = TieredConeParams {
            tier_count: 5,
            tier_height: 1.2,
            base_radius: 3.0,
            ..TieredConeParams::FOLIAGE
        };
        let field = build_foliage(1, &mut rng, &cone, &FoliagePalette::EVERGREEN).unwrap();
        let p = field.position(0).unwrap();
        assert!((-4.0..=2.0).contains(&p.y));
        assert!(Vec2::new(p.x, p.z).length() <= 3.0);
    }

    #[test]
    fn foliage_has_a_color_per_point() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = build_foliage(500, &mut rng, &TieredConeParams::FOLIAGE, &FoliagePalette::EVERGREEN)
            .unwrap();
        let colors = field.colors().unwrap();
        assert_eq!(colors.len(), field.positions().len());
        assert!(colors.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn base_snow_lies_in_its_band() {
        let mut rng = StdRng::seed_from_u64(4);
        let field = build_base_snow(BASE_SNOW_COUNT, &mut rng, &DiscParams::BASE_SNOW).unwrap();
        assert_eq!(field.positions().len(), BASE_SNOW_COUNT * 3);
        for p in field.iter_positions() {
            assert!(p.y >= -4.7 - 1e-5 && p.y <= -4.55 + 1e-5);
            assert!(Vec2::new(p.x, p.z).length() <= 5.0 + 1e-5);
        }
    }

    #[test]
    fn non_finite_parameters_fail_fast() {
        let mut rng = StdRng::seed_from_u64(4);
        let disc = DiscParams {
            bias_exponent: f32::INFINITY,
            ..DiscParams::BASE_SNOW
        };
        assert!(build_base_snow(10, &mut rng, &disc).is_err());
        assert!(build_foliage(0, &mut rng, &TieredConeParams::FOLIAGE, &FoliagePalette::EVERGREEN).is_err());
    }
}
