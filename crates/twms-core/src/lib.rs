//! Core engine for translating tiled-WMS requests into tile addresses.
//!
//! A tiled-WMS request carries a bounding box that is expected to sit on
//! a fixed multi-resolution tile grid. This crate builds that grid (the
//! resolution pyramid) from a raster's configured dimensions, and maps a
//! request bounding box to the (level, col, row) of the tile it
//! addresses, within half a pixel of tolerance. Fetching and encoding
//! the tile itself belongs to the layer behind the resolved address.

pub mod bbox;
pub mod error;
pub mod pyramid;
pub mod raster;
pub mod resolver;
pub mod size;

pub use bbox::BoundingBox;
pub use error::{TwmsError, TwmsResult};
pub use pyramid::PyramidLevel;
pub use raster::{DataType, RasterDescriptor};
pub use resolver::TileAddress;
pub use size::GridSize;
