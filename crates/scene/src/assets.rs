//! Everything the scene generates once at mount.

use crate::config::SceneConfig;
use procgen::{
    build_base_snow, build_foliage, place_ornaments, DiscParams, FoliagePalette, OrnamentParams,
    OrnamentPlacement, ParticleField, Ribbon, SpiralParams, StarSpec, TieredConeParams, TrunkSpec,
    TubeParams,
};
use rand::Rng;

/// Static geometry. Never touched by the frame loop.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub foliage: ParticleField,
    pub base_snow: ParticleField,
    pub ribbon: Ribbon,
    pub ornaments: Vec<OrnamentPlacement>,
    pub ornament_size: f32,
    pub star: StarSpec,
    pub trunk: TrunkSpec,
}

impl SceneAssets {
    pub fn generate<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> procgen::Result<Self> {
        let foliage = build_foliage(
            config.foliage_count,
            rng,
            &TieredConeParams::FOLIAGE,
            &FoliagePalette::EVERGREEN,
        )?;
        let base_snow = build_base_snow(config.base_snow_count, rng, &DiscParams::BASE_SNOW)?;
        let ornament_params = OrnamentParams::default();
        let ornaments = place_ornaments(config.ornament_count, rng, &ornament_params)?;
        let ribbon = Ribbon::build(&SpiralParams::RIBBON, &TubeParams::RIBBON)?;

        Ok(Self {
            foliage,
            base_snow,
            ribbon,
            ornaments,
            ornament_size: ornament_params.size,
            star: StarSpec::default(),
            trunk: TrunkSpec::default(),
        })
    }

    pub fn point_count(&self) -> usize {
        self.foliage.count() + self.base_snow.count()
    }
}
