//! Resolution pyramid derivation.
//!
//! Level 0 is the coarsest level, a single tile covering the whole
//! raster; the last level is the native tile grid. Each level one step
//! coarser ceiling-halves the grid and doubles the per-pixel resolution.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{TwmsError, TwmsResult};
use crate::size::GridSize;

/// One level of the resolution pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PyramidLevel {
    /// Grid width in tiles
    pub width: u64,
    /// Grid height in tiles
    pub height: u64,
    /// X resolution, projection units per pixel
    pub rx: f64,
    /// Y resolution, projection units per pixel
    pub ry: f64,
}

impl PyramidLevel {
    /// The level one step coarser than this one.
    fn coarser(&self) -> Self {
        Self {
            width: self.width.div_ceil(2),
            height: self.height.div_ceil(2),
            rx: self.rx * 2.0,
            ry: self.ry * 2.0,
        }
    }
}

/// Build the full level table for a raster, coarsest first.
///
/// The table is built from the native grid upward so the finest level
/// reproduces the raster's true size in tiles exactly; the synthetic
/// coarse levels follow from the halving recurrence.
pub(crate) fn build_levels(
    size: &GridSize,
    page_size: &GridSize,
    bbox: &BoundingBox,
    skipped_levels: usize,
) -> TwmsResult<Vec<PyramidLevel>> {
    let finest = PyramidLevel {
        width: size.x.div_ceil(page_size.x),
        height: size.y.div_ceil(page_size.y),
        rx: bbox.width() / size.x as f64,
        ry: bbox.height() / size.y as f64,
    };

    let mut levels = vec![finest];
    let mut current = finest;
    while current.width > 1 || current.height > 1 {
        current = current.coarser();
        levels.push(current);
    }
    levels.reverse();

    // Invariant: the top of the pyramid is a single tile
    let top = &levels[0];
    if top.width != 1 || top.height != 1 {
        return Err(TwmsError::InvalidPyramid(format!(
            "top level is {}x{} tiles, expected 1x1",
            top.width, top.height
        )));
    }

    if levels.len() <= skipped_levels {
        return Err(TwmsError::InvalidPyramid(format!(
            "{} levels but {} skipped",
            levels.len(),
            skipped_levels
        )));
    }

    Ok(levels)
}
