//! Bounding box type and WMS-style parsing.

use serde::{Deserialize, Serialize};

use crate::error::{TwmsError, TwmsResult};

/// A bounding box in the raster's projection units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The default box when no BoundingBox directive is configured.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Parse a WMS bbox parameter: "minx,miny,maxx,maxy".
    ///
    /// Exactly four numbers, three commas. `f64::from_str` always reads a
    /// decimal point, independent of the process locale, so this is safe
    /// to call from any number of threads with no shared state.
    pub fn parse(text: &str) -> TwmsResult<Self> {
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() != 4 {
            return Err(malformed(text));
        }

        let mut values = [0.0f64; 4];
        for (i, part) in parts.iter().enumerate() {
            let v: f64 = part.trim().parse().map_err(|_| malformed(text))?;
            if !v.is_finite() {
                return Err(malformed(text));
            }
            values[i] = v;
        }

        Ok(Self {
            min_x: values[0],
            min_y: values[1],
            max_x: values[2],
            max_y: values[3],
        })
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

fn malformed(text: &str) -> TwmsError {
    TwmsError::MalformedBoundingBox(format!(
        "format incorrect, expects four comma separated numbers, got '{}'",
        text
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox() {
        let bbox = BoundingBox::parse("-180,-90,180,90").unwrap();
        assert_eq!(bbox.min_x, -180.0);
        assert_eq!(bbox.min_y, -90.0);
        assert_eq!(bbox.max_x, 180.0);
        assert_eq!(bbox.max_y, 90.0);
        assert_eq!(bbox.width(), 360.0);
        assert_eq!(bbox.height(), 180.0);
    }

    #[test]
    fn test_parse_fractional() {
        let bbox = BoundingBox::parse("-2.5, 0.25, 3.75, 10.125").unwrap();
        assert_eq!(bbox.min_x, -2.5);
        assert_eq!(bbox.max_y, 10.125);
    }

    #[test]
    fn test_parse_missing_value() {
        assert!(matches!(
            BoundingBox::parse("0,0,1"),
            Err(TwmsError::MalformedBoundingBox(_))
        ));
    }

    #[test]
    fn test_parse_extra_value() {
        assert!(BoundingBox::parse("0,0,1,1,1").is_err());
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!(BoundingBox::parse("0,0,east,1").is_err());
        assert!(BoundingBox::parse("0,0,,1").is_err());
        assert!(BoundingBox::parse("0,0,1,inf").is_err());
        assert!(BoundingBox::parse("").is_err());
    }

    #[test]
    fn test_parse_decimal_point_only() {
        // Decimal comma must not be accepted as a fractional separator;
        // it reads as an extra field instead.
        assert!(BoundingBox::parse("0,5,0,1,1").is_err());
    }
}
