//! Per-frame update rules that mutate generated buffers in place.
//!
//! Rules are stateless: everything they need lives in the buffers they are
//! handed, so calling one twice with the same input gives the same output.

use crate::field::FallingSnow;
use engine_core::{Spin, Transform};

/// Falling snow with per-flake wraparound and index-decorrelated drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnowFall {
    /// A flake whose y drops below this is recycled.
    pub floor: f32,
    /// Height a recycled flake restarts from.
    pub ceiling: f32,
    /// Peak horizontal offset added per frame.
    pub drift_amplitude: f32,
    /// How fast the drift oscillates with height.
    pub drift_frequency: f32,
}

impl SnowFall {
    pub const DEFAULT: Self = Self {
        floor: -6.0,
        ceiling: 18.0,
        drift_amplitude: 0.005,
        drift_frequency: 0.2,
    };

    /// Horizontal drift for particle `index` at height `y`. Depends only on
    /// its arguments; the index term keeps flakes at equal heights apart.
    #[inline]
    pub fn drift(&self, index: usize, y: f32) -> f32 {
        (y * self.drift_frequency + index as f32).sin() * self.drift_amplitude
    }

    /// Advance every flake by one frame.
    ///
    /// `positions` is the flat `x, y, z` buffer; `velocities[i]` is the fall
    /// distance of particle `i` per call. Flakes are recycled one at a time,
    /// never as a batch.
    pub fn apply(&self, positions: &mut [f32], velocities: &[f32]) {
        for (i, (xyz, &velocity)) in positions
            .chunks_exact_mut(3)
            .zip(velocities.iter())
            .enumerate()
        {
            let mut y = xyz[1] - velocity;
            if y < self.floor {
                y = self.ceiling;
            }
            xyz[1] = y;
            xyz[0] += self.drift(i, y);
        }
    }

    /// Advance `snow` by one frame if it is attached. Returns whether anything
    /// was updated; a missing target is skipped, not an error.
    pub fn step(&self, snow: Option<&mut FallingSnow>) -> bool {
        match snow {
            Some(snow) => {
                let (positions, velocities) = snow.buffers_mut();
                self.apply(positions, velocities);
                true
            }
            None => false,
        }
    }
}

impl Default for SnowFall {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Set `transform`'s yaw from absolute elapsed time.
pub fn apply_spin(transform: &mut Transform, spin: &Spin, elapsed: f32) {
    transform.set_yaw(spin.angle_at(elapsed));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ParticleField;

    fn snow(ys: &[f32], velocity: f32) -> FallingSnow {
        let positions = ys.iter().flat_map(|&y| [0.0, y, 0.0]).collect();
        let field = ParticleField::from_positions(positions).unwrap();
        FallingSnow::new(field, vec![velocity; ys.len()]).unwrap()
    }

    #[test]
    fn flake_below_floor_wraps_to_exact_ceiling() {
        let rule = SnowFall::DEFAULT;
        let mut positions = [0.0, -6.001, 0.0];
        rule.apply(&mut positions, &[0.03]);
        assert_eq!(positions[1], 18.0);
    }

    #[test]
    fn flake_above_floor_falls_by_its_velocity() {
        let rule = SnowFall::DEFAULT;
        let mut positions = [0.0, 10.0, 0.0];
        rule.apply(&mut positions, &[0.04]);
        assert_eq!(positions[1], 10.0f32 - 0.04f32);
    }

    #[test]
    fn drift_is_a_pure_function_of_index_and_height() {
        let rule = SnowFall::DEFAULT;
        assert_eq!(rule.drift(3, 4.5), rule.drift(3, 4.5));
        assert_ne!(rule.drift(3, 4.5), rule.drift(4, 4.5));
        assert!(rule.drift(17, -2.0).abs() <= rule.drift_amplitude);

        let mut a = [1.0, 5.0, 0.0];
        let mut b = [1.0, 5.0, 0.0];
        rule.apply(&mut a, &[0.02]);
        rule.apply(&mut b, &[0.02]);
        assert_eq!(a, b);
    }

    #[test]
    fn three_flake_scenario() {
        let rule = SnowFall::DEFAULT;
        let mut snow = snow(&[-5.99, 0.0, 17.99], 0.05);
        assert!(rule.step(Some(&mut snow)));

        let ys: Vec<f32> = snow.field().iter_positions().map(|p| p.y).collect();
        assert_eq!(ys[0], 18.0);
        assert!((ys[1] + 0.05).abs() < 1e-6);
        assert!((ys[2] - 17.94).abs() < 1e-5);

        let xs: Vec<f32> = snow.field().iter_positions().map(|p| p.x).collect();
        for (i, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
            assert!((x - rule.drift(i, y)).abs() < 1e-7);
        }
    }

    #[test]
    fn buffer_length_survives_many_frames() {
        let rule = SnowFall::DEFAULT;
        let mut snow = snow(&[0.0, 5.0, 10.0, 15.0], 0.06);
        for _ in 0..5_000 {
            rule.step(Some(&mut snow));
        }
        assert_eq!(snow.field().positions().len(), 3 * snow.count());
        for p in snow.field().iter_positions() {
            assert!(p.y >= rule.floor && p.y <= rule.ceiling);
        }
    }

    #[test]
    fn missing_target_is_a_no_op() {
        assert!(!SnowFall::DEFAULT.step(None));
    }

    #[test]
    fn step_marks_field_dirty() {
        let mut snow = snow(&[1.0], 0.02);
        assert!(!snow.field().is_dirty());
        SnowFall::DEFAULT.step(Some(&mut snow));
        assert!(snow.field_mut().take_dirty());
    }

    #[test]
    fn spin_sets_absolute_angle() {
        let mut transform = Transform::default();
        let spin = Spin::new(0.8);
        apply_spin(&mut transform, &spin, 1.0);
        apply_spin(&mut transform, &spin, 0.5);
        assert!((transform.yaw() - 0.4).abs() < 1e-5);
    }
}
