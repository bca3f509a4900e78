//! Grid configuration
//!
//! One `GridConfig` is created per scene and shared read-only with every
//! conversion, pathfinding, and snapping call. It is never mutated after
//! construction.

use serde::{Deserialize, Serialize};

use crate::core::error::{GridError, Result};

pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Hexagonal grid configuration.
///
/// `columnar` selects flat-top hexes arranged in staggered columns;
/// otherwise pointy-top hexes in staggered rows. `parity_even` selects
/// which rows/columns carry the half-cell stagger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columnar: bool,
    pub parity_even: bool,
    /// Base cell size in pixels.
    pub cell_size: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Compatibility flag: dimensions were supplied by an old scene
    /// document instead of being derived from `cell_size`.
    pub legacy: bool,
}

/// The four orientation/parity combinations, as a closed set so every
/// conversion can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridVariant {
    /// Pointy-top rows, odd rows staggered ("odd-r").
    OddRows,
    /// Pointy-top rows, even rows staggered ("even-r").
    EvenRows,
    /// Flat-top columns, odd columns staggered ("odd-q").
    OddColumns,
    /// Flat-top columns, even columns staggered ("even-q").
    EvenColumns,
}

impl GridConfig {
    /// Create a configuration with dimensions derived from `cell_size`:
    /// one dimension equals `cell_size`, the other `cell_size * sqrt(3)`,
    /// swapped by orientation (columnar grids are wider than tall).
    pub fn hex(columnar: bool, parity_even: bool, cell_size: f64) -> Result<Self> {
        check_dimension("cell_size", cell_size)?;
        let (cell_width, cell_height) = if columnar {
            (cell_size * SQRT_3, cell_size)
        } else {
            (cell_size, cell_size * SQRT_3)
        };
        Ok(Self {
            columnar,
            parity_even,
            cell_size,
            cell_width,
            cell_height,
            legacy: false,
        })
    }

    /// Compatibility path for old scene documents that stored explicit
    /// cell dimensions. Dimensions are taken verbatim, so the resulting
    /// hexes are generally squashed. Not recommended for new scenes.
    pub fn legacy_hex(
        columnar: bool,
        parity_even: bool,
        cell_size: f64,
        cell_width: f64,
        cell_height: f64,
    ) -> Result<Self> {
        check_dimension("cell_size", cell_size)?;
        check_dimension("cell_width", cell_width)?;
        check_dimension("cell_height", cell_height)?;
        Ok(Self {
            columnar,
            parity_even,
            cell_size,
            cell_width,
            cell_height,
            legacy: true,
        })
    }

    pub fn variant(&self) -> GridVariant {
        match (self.columnar, self.parity_even) {
            (false, false) => GridVariant::OddRows,
            (false, true) => GridVariant::EvenRows,
            (true, false) => GridVariant::OddColumns,
            (true, true) => GridVariant::EvenColumns,
        }
    }

    /// All four variants, for exhaustive testing.
    pub fn all_variants(cell_size: f64) -> Result<[Self; 4]> {
        Ok([
            Self::hex(false, false, cell_size)?,
            Self::hex(false, true, cell_size)?,
            Self::hex(true, false, cell_size)?,
            Self::hex(true, true, cell_size)?,
        ])
    }
}

fn check_dimension(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GridError::InvalidConfig(format!(
            "{name} must be finite and positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_dimensions() {
        let rows = GridConfig::hex(false, false, 100.0).unwrap();
        assert_eq!(rows.cell_width, 100.0);
        assert!((rows.cell_height - 100.0 * SQRT_3).abs() < 1e-12);

        let cols = GridConfig::hex(true, false, 100.0).unwrap();
        assert!((cols.cell_width - 100.0 * SQRT_3).abs() < 1e-12);
        assert_eq!(cols.cell_height, 100.0);
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert!(GridConfig::hex(false, false, 0.0).is_err());
        assert!(GridConfig::hex(false, false, -5.0).is_err());
        assert!(GridConfig::hex(false, false, f64::NAN).is_err());
        assert!(GridConfig::legacy_hex(true, false, 100.0, 100.0, 0.0).is_err());
    }

    #[test]
    fn test_legacy_dimensions_taken_verbatim() {
        let config = GridConfig::legacy_hex(true, true, 100.0, 100.0, 100.0).unwrap();
        assert!(config.legacy);
        assert_eq!(config.cell_width, 100.0);
        assert_eq!(config.cell_height, 100.0);
    }

    #[test]
    fn test_variant_mapping() {
        assert_eq!(
            GridConfig::hex(false, false, 1.0).unwrap().variant(),
            GridVariant::OddRows
        );
        assert_eq!(
            GridConfig::hex(false, true, 1.0).unwrap().variant(),
            GridVariant::EvenRows
        );
        assert_eq!(
            GridConfig::hex(true, false, 1.0).unwrap().variant(),
            GridVariant::OddColumns
        );
        assert_eq!(
            GridConfig::hex(true, true, 1.0).unwrap().variant(),
            GridVariant::EvenColumns
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let config = GridConfig::hex(true, false, 100.0).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
