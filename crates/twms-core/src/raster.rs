//! Raster descriptor: the configured shape of one tiled raster source.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{TwmsError, TwmsResult};
use crate::pyramid::{build_levels, PyramidLevel};
use crate::size::GridSize;

/// Pixel datatype tag for a raster source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DataType {
    #[default]
    Byte,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
}

impl DataType {
    /// Map a DataType directive value to a tag. Unknown names fall back
    /// to unsigned 8-bit, the dominant case for served imagery.
    pub fn from_name(name: &str) -> Self {
        match name {
            "UInt16" => Self::UInt16,
            "Int16" | "Short" => Self::Int16,
            "UInt32" => Self::UInt32,
            "Int32" | "Int" => Self::Int32,
            "Float32" | "Float" => Self::Float32,
            "Float64" | "Double" => Self::Float64,
            _ => Self::Byte,
        }
    }
}

/// A fully configured raster source: dimensions, tile grid, spatial
/// extent and the derived resolution pyramid.
///
/// Built once at configuration time and immutable afterwards, so it can
/// be shared read-only across any number of concurrent resolutions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterDescriptor {
    /// Native raster dimensions in pixels
    pub size: GridSize,
    /// Tile (page) dimensions in pixels
    pub page_size: GridSize,
    /// Spatial extent in projection units
    pub bbox: BoundingBox,
    /// Pixel datatype
    pub datatype: DataType,
    /// Projection identifier, "WM" is Web Mercator
    pub projection: String,
    /// Coarsest levels that exist mathematically but are not served
    pub skipped_levels: usize,
    levels: Vec<PyramidLevel>,
}

impl RasterDescriptor {
    /// Build a descriptor from explicit parts, deriving the level table.
    ///
    /// The page grid is always a single slice deep and inherits the band
    /// count of the raster, whatever was supplied.
    pub fn new(
        size: GridSize,
        page_size: GridSize,
        bbox: BoundingBox,
        skipped_levels: usize,
    ) -> TwmsResult<Self> {
        let page_size = GridSize {
            z: 1,
            c: size.c,
            ..page_size
        };
        let levels = build_levels(&size, &page_size, &bbox, skipped_levels)?;

        Ok(Self {
            size,
            page_size,
            bbox,
            datatype: DataType::Byte,
            projection: "WM".to_string(),
            skipped_levels,
            levels,
        })
    }

    /// Build a descriptor from configuration directives, one raw string
    /// value per directive name. `Size` is required; everything else has
    /// a default. Either every field parses and the pyramid builds, or
    /// no descriptor is produced.
    pub fn from_directives(directives: &HashMap<String, String>) -> TwmsResult<Self> {
        let size = match directives.get("Size") {
            Some(v) => GridSize::parse(v).map_err(|e| e.prefixed("Size"))?,
            None => return Err(TwmsError::MissingSize),
        };

        let page_size = match directives.get("PageSize") {
            Some(v) => GridSize::parse(v).map_err(|e| e.prefixed("PageSize"))?,
            None => GridSize::new(512, 512),
        };

        let bbox = match directives.get("BoundingBox") {
            Some(v) => BoundingBox::parse(v).map_err(|e| e.prefixed("BoundingBox"))?,
            None => BoundingBox::unit(),
        };

        let skipped_levels = match directives.get("SkippedLevels") {
            Some(v) => v.trim().parse().map_err(|_| {
                TwmsError::InvalidPyramid(format!("SkippedLevels not an integer: '{}'", v))
            })?,
            None => 0,
        };

        let mut raster = Self::new(size, page_size, bbox, skipped_levels)?;

        if let Some(name) = directives.get("DataType") {
            raster.datatype = DataType::from_name(name.trim());
        }
        if let Some(projection) = directives.get("Projection") {
            raster.projection = projection.trim().to_string();
        }

        Ok(raster)
    }

    /// The level table, coarsest first.
    pub fn levels(&self) -> &[PyramidLevel] {
        &self.levels
    }

    /// Total level count, including skipped levels.
    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let raster =
            RasterDescriptor::from_directives(&directives(&[("Size", "2048 2048")])).unwrap();

        assert_eq!(raster.page_size, GridSize { x: 512, y: 512, z: 1, c: 3 });
        assert_eq!(raster.bbox, BoundingBox::unit());
        assert_eq!(raster.datatype, DataType::Byte);
        assert_eq!(raster.projection, "WM");
        assert_eq!(raster.skipped_levels, 0);
        assert_eq!(raster.n_levels(), 3);
    }

    #[test]
    fn test_page_size_depth_forced_and_bands_inherited() {
        let raster = RasterDescriptor::from_directives(&directives(&[
            ("Size", "4096 4096 1 4"),
            ("PageSize", "256 256 8 1"),
        ]))
        .unwrap();

        // z is always 1 for the page grid, c follows the raster
        assert_eq!(raster.page_size, GridSize { x: 256, y: 256, z: 1, c: 4 });
    }

    #[test]
    fn test_full_configuration() {
        let raster = RasterDescriptor::from_directives(&directives(&[
            ("Size", "2048 2048"),
            ("BoundingBox", "-180,-90,180,90"),
            ("DataType", "UInt16"),
            ("Projection", "GCS"),
            ("SkippedLevels", "1"),
        ]))
        .unwrap();

        assert_eq!(raster.bbox, BoundingBox::new(-180.0, -90.0, 180.0, 90.0));
        assert_eq!(raster.datatype, DataType::UInt16);
        assert_eq!(raster.projection, "GCS");
        assert_eq!(raster.skipped_levels, 1);
    }

    #[test]
    fn test_missing_size() {
        let err = RasterDescriptor::from_directives(&directives(&[("PageSize", "512 512")]))
            .unwrap_err();
        assert_eq!(err, TwmsError::MissingSize);
    }

    #[test]
    fn test_error_context_prefixes() {
        let err = RasterDescriptor::from_directives(&directives(&[("Size", "not a size")]))
            .unwrap_err();
        assert!(err.to_string().starts_with("Size "));

        let err = RasterDescriptor::from_directives(&directives(&[
            ("Size", "2048 2048"),
            ("BoundingBox", "0,0,1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, TwmsError::MalformedBoundingBox(_)));
        assert!(err.to_string().starts_with("BoundingBox "));
    }

    #[test]
    fn test_skipped_levels_exceeding_pyramid() {
        let err = RasterDescriptor::from_directives(&directives(&[
            ("Size", "2048 2048"),
            ("SkippedLevels", "3"),
        ]))
        .unwrap_err();
        assert!(matches!(err, TwmsError::InvalidPyramid(_)));
    }

    #[test]
    fn test_unknown_datatype_defaults_to_byte() {
        let raster = RasterDescriptor::from_directives(&directives(&[
            ("Size", "2048 2048"),
            ("DataType", "Complex128"),
        ]))
        .unwrap();
        assert_eq!(raster.datatype, DataType::Byte);
    }
}
