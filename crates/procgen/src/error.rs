//! Construction errors for samplers, fields and meshes.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcgenError>;

/// Rejected generator parameters. These are programmer or configuration
/// errors: construction fails instead of producing degenerate geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcgenError {
    #[error("{what} must be positive, got {value}")]
    InvalidCount { what: &'static str, value: usize },

    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f32 },

    #[error("{what} out of range: {value} (expected {expected})")]
    InvalidRange {
        what: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("buffer length mismatch: {what} has {actual} elements, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("curve needs at least 2 control points, got {0}")]
    TooFewControlPoints(usize),
}

pub(crate) fn ensure_count(what: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(ProcgenError::InvalidCount { what, value });
    }
    Ok(value)
}

pub(crate) fn ensure_finite(what: &'static str, value: f32) -> Result<f32> {
    if !value.is_finite() {
        return Err(ProcgenError::NonFinite { what, value });
    }
    Ok(value)
}

pub(crate) fn ensure_positive(what: &'static str, value: f32) -> Result<f32> {
    ensure_finite(what, value)?;
    if value <= 0.0 {
        return Err(ProcgenError::InvalidRange {
            what,
            value,
            expected: "> 0",
        });
    }
    Ok(value)
}

pub(crate) fn ensure_ordered(what: &'static str, min: f32, max: f32) -> Result<()> {
    ensure_finite(what, min)?;
    ensure_finite(what, max)?;
    if min > max {
        return Err(ProcgenError::InvalidRange {
            what,
            value: min,
            expected: "min <= max",
        });
    }
    Ok(())
}
