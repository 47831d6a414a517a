//! Flat, fixed-size particle buffers.
//!
//! A [`ParticleField`] is allocated once and never resized: `positions` always
//! holds exactly `count * 3` floats laid out as `x, y, z` per particle, so the
//! renderer can bind the slice directly as a vertex attribute.

use crate::error::{ensure_count, ensure_ordered, ensure_positive, ProcgenError, Result};
use crate::sampler::{box_point, BoxParams};
use glam::Vec3;
use rand::Rng;
use std::ops::Range;

/// Positions (and optional per-point colours) for one decorative population.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    positions: Vec<f32>,
    colors: Option<Vec<f32>>,
    count: usize,
    /// Set whenever positions are handed out mutably; cleared by `take_dirty`.
    dirty: bool,
}

impl ParticleField {
    /// Allocate a field of `count` particles, drawing each position from `sample`.
    pub fn build<R, F>(count: usize, rng: &mut R, mut sample: F) -> Result<Self>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> Vec3,
    {
        ensure_count("particle count", count)?;
        let mut positions = Vec::with_capacity(count * 3);
        for _ in 0..count {
            let p = sample(rng);
            positions.extend_from_slice(&[p.x, p.y, p.z]);
        }
        Ok(Self {
            positions,
            colors: None,
            count,
            dirty: false,
        })
    }

    /// Like [`ParticleField::build`], but `sample` also returns an RGB colour.
    pub fn build_colored<R, F>(count: usize, rng: &mut R, mut sample: F) -> Result<Self>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> (Vec3, Vec3),
    {
        ensure_count("particle count", count)?;
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        for _ in 0..count {
            let (p, c) = sample(rng);
            positions.extend_from_slice(&[p.x, p.y, p.z]);
            colors.extend_from_slice(&[c.x, c.y, c.z]);
        }
        Ok(Self {
            positions,
            colors: Some(colors),
            count,
            dirty: false,
        })
    }

    /// Wrap an existing flat `x, y, z` buffer.
    pub fn from_positions(positions: Vec<f32>) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(ProcgenError::LengthMismatch {
                what: "positions",
                actual: positions.len(),
                expected: positions.len() / 3 * 3,
            });
        }
        let count = ensure_count("particle count", positions.len() / 3)?;
        Ok(Self {
            positions,
            colors: None,
            count,
            dirty: false,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> Option<&[f32]> {
        self.colors.as_deref()
    }

    /// Mutable access to the position buffer. Marks the field dirty.
    ///
    /// The slice cannot grow or shrink, so the `count * 3` layout survives any
    /// amount of in-place animation.
    pub fn positions_mut(&mut self) -> &mut [f32] {
        self.dirty = true;
        &mut self.positions
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        (index < self.count).then(|| Vec3::from_slice(&self.positions[index * 3..index * 3 + 3]))
    }

    pub fn color(&self, index: usize) -> Option<Vec3> {
        let colors = self.colors.as_ref()?;
        (index < self.count).then(|| Vec3::from_slice(&colors[index * 3..index * 3 + 3]))
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions.chunks_exact(3).map(Vec3::from_slice)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the buffer changed since the last call and clears the flag.
    /// The renderer re-uploads the positions when this is true.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Positions as raw bytes for GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn color_bytes(&self) -> Option<&[u8]> {
        self.colors.as_deref().map(bytemuck::cast_slice)
    }

    /// Axis-aligned bounds of all positions.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.iter_positions().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(p), max.max(p)),
        )
    }
}

/// Falling snow: a particle field plus one fall speed per particle.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingSnow {
    field: ParticleField,
    velocities: Vec<f32>,
}

impl FallingSnow {
    /// Pair an existing field with per-particle velocities (`velocities[i]` drives particle `i`).
    ///
    /// Every velocity must be a positive fall distance: a flake that does not
    /// fall never reaches the floor and is never recycled.
    pub fn new(field: ParticleField, velocities: Vec<f32>) -> Result<Self> {
        if velocities.len() != field.count() {
            return Err(ProcgenError::LengthMismatch {
                what: "velocities",
                actual: velocities.len(),
                expected: field.count(),
            });
        }
        for &v in &velocities {
            ensure_positive("snow speed", v)?;
        }
        Ok(Self { field, velocities })
    }

    /// Scatter `count` flakes through `volume` with speeds drawn from `speed`.
    pub fn build<R: Rng + ?Sized>(
        count: usize,
        rng: &mut R,
        volume: &BoxParams,
        speed: Range<f32>,
    ) -> Result<Self> {
        volume.validate()?;
        ensure_ordered("snow speed range", speed.start, speed.end)?;
        ensure_positive("snow speed", speed.start)?;
        let field = ParticleField::build(count, rng, |rng| box_point(rng, volume))?;
        let velocities = (0..count)
            .map(|_| speed.start + rng.gen::<f32>() * (speed.end - speed.start))
            .collect();
        Ok(Self { field, velocities })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn count(&self) -> usize {
        self.field.count()
    }

    /// Split borrow for animators: mutable positions alongside the immutable speeds.
    pub fn buffers_mut(&mut self) -> (&mut [f32], &[f32]) {
        (self.field.positions_mut(), &self.velocities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn build_allocates_three_floats_per_particle() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = ParticleField::build(42, &mut rng, |rng| Vec3::splat(rng.gen())).unwrap();
        assert_eq!(field.count(), 42);
        assert_eq!(field.positions().len(), 42 * 3);
        assert!(field.colors().is_none());
        assert!(!field.is_dirty());
    }

    #[test]
    fn build_rejects_zero_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = ParticleField::build(0, &mut rng, |_| Vec3::ZERO).unwrap_err();
        assert!(matches!(err, ProcgenError::InvalidCount { .. }));
    }

    /// Two builds share no state: same length, independently drawn values.
    #[test]
    fn repeated_builds_are_independent() {
        let mut rng = StdRng::seed_from_u64(99);
        let a = ParticleField::build(100, &mut rng, |rng| Vec3::new(rng.gen(), rng.gen(), rng.gen()))
            .unwrap();
        let b = ParticleField::build(100, &mut rng, |rng| Vec3::new(rng.gen(), rng.gen(), rng.gen()))
            .unwrap();
        assert_eq!(a.positions().len(), b.positions().len());
        assert_ne!(a.positions(), b.positions());
    }

    #[test]
    fn same_seed_reproduces_the_same_field() {
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            ParticleField::build(64, &mut rng, |rng| Vec3::new(rng.gen(), rng.gen(), rng.gen()))
                .unwrap()
        };
        assert_eq!(build(5).positions(), build(5).positions());
    }

    #[test]
    fn colored_build_pairs_colors_with_positions() {
        let mut rng = StdRng::seed_from_u64(2);
        let field = ParticleField::build_colored(10, &mut rng, |_| (Vec3::ONE, Vec3::new(0.1, 0.2, 0.3)))
            .unwrap();
        assert_eq!(field.colors().unwrap().len(), field.positions().len());
        assert_eq!(field.color(9), Some(Vec3::new(0.1, 0.2, 0.3)));
        assert_eq!(field.color(10), None);
        assert_eq!(field.color_bytes().unwrap().len(), 10 * 3 * 4);
    }

    #[test]
    fn dirty_flag_tracks_mutable_access() {
        let mut field = ParticleField::from_positions(vec![0.0, 1.0, 2.0]).unwrap();
        assert!(!field.take_dirty());
        field.positions_mut()[1] = 5.0;
        assert!(field.take_dirty());
        assert!(!field.take_dirty());
        assert_eq!(field.position(0), Some(Vec3::new(0.0, 5.0, 2.0)));
    }

    #[test]
    fn from_positions_rejects_partial_triples() {
        assert!(ParticleField::from_positions(vec![0.0, 1.0]).is_err());
        assert!(ParticleField::from_positions(Vec::new()).is_err());
    }

    #[test]
    fn falling_snow_requires_one_velocity_per_particle() {
        let field = ParticleField::from_positions(vec![0.0; 9]).unwrap();
        assert!(FallingSnow::new(field.clone(), vec![0.05; 2]).is_err());
        assert!(FallingSnow::new(field, vec![0.05; 3]).is_ok());
    }

    #[test]
    fn snow_that_would_not_fall_is_rejected() {
        let mut rng = StdRng::seed_from_u64(8);
        let volume = BoxParams::FALLING_SNOW;
        assert!(FallingSnow::build(10, &mut rng, &volume, -0.06..-0.02).is_err());
        assert!(FallingSnow::build(10, &mut rng, &volume, 0.0..0.06).is_err());

        let field = ParticleField::from_positions(vec![0.0; 9]).unwrap();
        assert!(FallingSnow::new(field.clone(), vec![0.05, -0.05, 0.05]).is_err());
        assert!(FallingSnow::new(field.clone(), vec![0.05, 0.0, 0.05]).is_err());
        assert!(matches!(
            FallingSnow::new(field, vec![0.05, f32::NAN, 0.05]),
            Err(ProcgenError::NonFinite { .. })
        ));
    }

    #[test]
    fn falling_snow_build_respects_volume_and_speed() {
        let mut rng = StdRng::seed_from_u64(8);
        let volume = BoxParams::FALLING_SNOW;
        let snow = FallingSnow::build(2_000, &mut rng, &volume, 0.02..0.06).unwrap();
        assert_eq!(snow.velocities().len(), 2_000);
        assert!(snow.velocities().iter().all(|&v| (0.02..=0.06).contains(&v)));
        let (min, max) = snow.field().bounds();
        assert!(min.x >= -15.0 && max.x <= 15.0);
        assert!(min.y >= -5.0 && max.y <= 20.0);
    }
}
