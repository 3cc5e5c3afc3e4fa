//! Size/grid descriptor parsing.

use serde::{Deserialize, Serialize};

use crate::error::{TwmsError, TwmsResult};

/// Dimensions of a raster or of its tile (page) grid.
///
/// `x` and `y` are always explicit; `z` (depth) and `c` (bands) default
/// to 1 and 3 when a descriptor string omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub x: u64,
    pub y: u64,
    pub z: u64,
    pub c: u64,
}

impl GridSize {
    /// A 2D size with default depth and band count.
    pub fn new(x: u64, y: u64) -> Self {
        Self { x, y, z: 1, c: 3 }
    }

    /// Parse a descriptor string of 2 to 4 integers: "x y [z [c]]".
    ///
    /// Integers may be separated by whitespace or commas. Anything else
    /// (fewer than 2 values, more than 4, non-numeric content, overflow,
    /// a zero x or y) is a format error.
    pub fn parse(text: &str) -> TwmsResult<Self> {
        let values: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        if values.len() < 2 || values.len() > 4 {
            return Err(malformed(text));
        }

        let mut parsed = [0u64; 4];
        for (i, token) in values.iter().enumerate() {
            parsed[i] = token.parse().map_err(|_| malformed(text))?;
        }

        let size = Self {
            x: parsed[0],
            y: parsed[1],
            z: if values.len() > 2 { parsed[2] } else { 1 },
            c: if values.len() > 3 { parsed[3] } else { 3 },
        };

        // x and y are pixel counts, zero makes no grid
        if size.x == 0 || size.y == 0 {
            return Err(malformed(text));
        }

        Ok(size)
    }
}

fn malformed(text: &str) -> TwmsError {
    TwmsError::MalformedSize(format!(
        "incorrect format, expects 2 to 4 integers, got '{}'",
        text
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_values() {
        let size = GridSize::parse("2048 2048").unwrap();
        assert_eq!(size, GridSize { x: 2048, y: 2048, z: 1, c: 3 });
    }

    #[test]
    fn test_parse_three_values() {
        let size = GridSize::parse("512 512 7").unwrap();
        assert_eq!(size, GridSize { x: 512, y: 512, z: 7, c: 3 });
    }

    #[test]
    fn test_parse_four_values() {
        let size = GridSize::parse("40000 30000 1 4").unwrap();
        assert_eq!(size, GridSize { x: 40000, y: 30000, z: 1, c: 4 });
    }

    #[test]
    fn test_parse_comma_separated() {
        let size = GridSize::parse("1024,768").unwrap();
        assert_eq!(size, GridSize { x: 1024, y: 768, z: 1, c: 3 });
    }

    #[test]
    fn test_parse_rejects_single_value() {
        assert!(matches!(
            GridSize::parse("2048"),
            Err(TwmsError::MalformedSize(_))
        ));
    }

    #[test]
    fn test_parse_rejects_five_values() {
        assert!(matches!(
            GridSize::parse("1 2 3 4 5"),
            Err(TwmsError::MalformedSize(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(GridSize::parse("2048 wide").is_err());
        assert!(GridSize::parse("").is_err());
        assert!(GridSize::parse("  ").is_err());
        assert!(GridSize::parse("-512 512").is_err());
        // 2^64 overflows u64
        assert!(GridSize::parse("18446744073709551616 1").is_err());
    }

    #[test]
    fn test_parse_rejects_zero_dimensions() {
        assert!(GridSize::parse("0 512").is_err());
        assert!(GridSize::parse("512 0").is_err());
    }
}
