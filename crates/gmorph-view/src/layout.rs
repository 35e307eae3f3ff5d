#![forbid(unsafe_code)]

//! Layout collaborator contract.
//!
//! Node positions and sizes arrive already computed in the descriptors;
//! the layout engine only gets a final adjustment pass per rebuild plus
//! the raster alignment used to center the scene on a stable grid.

use gmorph_core::geometry::Vec2;
use gmorph_scene::Scene;

/// Per-rebuild layout adjustment and raster alignment.
pub trait LayoutEngine {
    /// Adjust positions and sizes of a freshly built generation.
    ///
    /// Runs once per rebuild, before the generation is diffed.
    fn postprocess(&mut self, scene: &mut Scene);

    /// Snap a point onto the layout grid.
    fn align_to_raster(&self, point: Vec2) -> Vec2;
}

/// Grid-snapping layout engine with no adjustment pass.
///
/// Descriptor geometry is taken as final; centering offsets are rounded
/// to the nearest multiple of the cell size so rebuilt scenes land on
/// the same grid and remaining nodes travel in whole cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterLayout {
    cell: f32,
}

impl RasterLayout {
    /// Create a raster layout with the given cell size.
    ///
    /// Non-positive cells disable snapping.
    pub fn new(cell: f32) -> Self {
        Self { cell }
    }
}

impl LayoutEngine for RasterLayout {
    fn postprocess(&mut self, _scene: &mut Scene) {}

    fn align_to_raster(&self, point: Vec2) -> Vec2 {
        if self.cell <= 0.0 {
            return point;
        }
        Vec2::new(
            (point.x / self.cell).round() * self.cell,
            (point.y / self.cell).round() * self.cell,
        )
    }
}
