//! Golden ribbon spiralling around the foliage.

use crate::curve::CatmullRomCurve;
use crate::error::Result;
use crate::sampler::{spiral_curve_points, SpiralParams};
use crate::tube::{TubeMesh, TubeParams};

/// Spiral path plus the static tube mesh swept along it.
#[derive(Debug, Clone)]
pub struct Ribbon {
    pub curve: CatmullRomCurve,
    pub mesh: TubeMesh,
}

impl Ribbon {
    pub fn build(spiral: &SpiralParams, tube: &TubeParams) -> Result<Self> {
        let points = spiral_curve_points(spiral)?;
        let curve = CatmullRomCurve::new(points, tube.closed)?;
        let mesh = TubeMesh::build(&curve, tube)?;
        log::debug!(
            "ribbon: {} loops, {} control points, {} triangles",
            spiral.loop_count,
            curve.points().len(),
            mesh.triangle_count()
        );
        Ok(Self { curve, mesh })
    }
}
