//! Time management for the host render loop.
//!
//! The host (browser `requestAnimationFrame`, winit redraw, headless driver)
//! owns the clock and reports absolute elapsed seconds each frame. `Time`
//! turns that into delta and frame-count bookkeeping.

use std::time::Duration;

/// Tracks elapsed time, delta time and frame count from host-reported timestamps.
#[derive(Debug, Default, Clone)]
pub struct Time {
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since the scene started.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Time {
    /// Create a new time tracker at t = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new frame at the absolute host time `elapsed_seconds`.
    ///
    /// Timestamps that are backwards or not representable as a `Duration`
    /// (NaN, infinite, negative, overflowing) produce a zero delta and leave
    /// the elapsed clock unchanged.
    pub fn advance_to(&mut self, elapsed_seconds: f64) {
        let now = Duration::try_from_secs_f64(elapsed_seconds).unwrap_or(self.elapsed);
        self.delta = now.saturating_sub(self.elapsed);
        self.elapsed = self.elapsed.max(now);
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}
