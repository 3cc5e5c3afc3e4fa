//! Request bounding box to tile address resolution.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{TwmsError, TwmsResult};
use crate::raster::RasterDescriptor;

/// A resolved tile: pyramid level plus column and row at that level.
///
/// Meaningful only relative to the descriptor that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileAddress {
    /// Pyramid level index, 0 is the coarsest
    pub level: usize,
    /// Column, counted from the left edge
    pub col: u64,
    /// Row, counted from the top edge
    pub row: u64,
}

impl TileAddress {
    /// Level number with the hidden coarse levels subtracted, the index
    /// a downstream tile service addresses.
    pub fn exposed_level(&self, raster: &RasterDescriptor) -> usize {
        self.level - raster.skipped_levels
    }
}

fn ordered(lo: f64, mid: f64, hi: f64) -> bool {
    lo <= mid && mid <= hi
}

impl RasterDescriptor {
    /// Find the tile a request bounding box addresses.
    ///
    /// The request must match one level's tile resolution and sit on a
    /// tile boundary, both within half a pixel of the request's own
    /// resolution. That slack absorbs the float formatting noise of a
    /// well-known tiling scheme while still rejecting off-grid requests.
    pub fn resolve(&self, request: &BoundingBox) -> TwmsResult<TileAddress> {
        let resx = request.width();
        let resy = request.height();
        let dx = resx / self.page_size.x as f64 / 2.0;
        let dy = resy / self.page_size.y as f64 / 2.0;

        // Levels are monotonic in resolution, at most one can match.
        // Skipped levels are never served.
        for (level, rset) in self.levels().iter().enumerate().skip(self.skipped_levels) {
            let tile_rx = rset.rx * self.page_size.x as f64;
            let tile_ry = rset.ry * self.page_size.y as f64;

            if !ordered(tile_rx - dx, resx, tile_rx + dx)
                || !ordered(tile_ry - dy, resy, tile_ry + dy)
            {
                continue;
            }

            // Fold the tolerance in before flooring so an edge exactly on
            // a tile boundary lands in the cell below it, not one short.
            let col = ((request.min_x - self.bbox.min_x + dx) / tile_rx).floor();
            let row = ((self.bbox.max_y - request.max_y + dy) / tile_ry).floor();

            if col < 0.0
                || row < 0.0
                || col >= rset.width as f64
                || row >= rset.height as f64
            {
                return Err(TwmsError::BoundsMismatch);
            }
            let (col, row) = (col as u64, row as u64);

            // The candidate tile's left and top edges have to sit on the
            // request within the same half-pixel slack.
            let left = self.bbox.min_x + col as f64 * tile_rx;
            let top = self.bbox.max_y - row as f64 * tile_ry;
            if !ordered(left - dx, request.min_x, left + dx)
                || !ordered(top - dy, request.max_y, top + dy)
            {
                return Err(TwmsError::BoundsMismatch);
            }

            return Ok(TileAddress { level, col, row });
        }

        Err(TwmsError::ResolutionMismatch)
    }

    /// The bounding box of a tile, the inverse of [`resolve`].
    ///
    /// Returns `None` for a level or position outside the pyramid.
    ///
    /// [`resolve`]: RasterDescriptor::resolve
    pub fn tile_bbox(&self, tile: &TileAddress) -> Option<BoundingBox> {
        let rset = self.levels().get(tile.level)?;
        if tile.col >= rset.width || tile.row >= rset.height {
            return None;
        }

        let tile_rx = rset.rx * self.page_size.x as f64;
        let tile_ry = rset.ry * self.page_size.y as f64;
        let min_x = self.bbox.min_x + tile.col as f64 * tile_rx;
        let max_y = self.bbox.max_y - tile.row as f64 * tile_ry;

        Some(BoundingBox::new(min_x, max_y - tile_ry, min_x + tile_rx, max_y))
    }
}
