//! Grid binning
//!
//! Snaps a coordinate to the lower-left corner of a fixed-size grid cell.
//! Cells are aligned to multiples of the grid size starting at 0, on both
//! axes independently, and are identified by strings like `"49.25_-123.25"`.

use crate::constants::grid::{DEFAULT_GRID_SIZE, MAX_DECIMALS, SNAP_EPSILON, SNAP_ULPS};
use crate::coord::{check_latitude, check_longitude, numeric, numeric_or};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cell size along each axis, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub lat: f64,
    pub lng: f64,
}

impl GridSize {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both sizes must be finite and strictly positive
    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v > 0.0 && v.is_finite();
        if ok(self.lat) && ok(self.lng) {
            Ok(())
        } else {
            Err(Error::InvalidGrid)
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

/// Identifier of a grid cell: its lower-left corner
///
/// Displays as `"<lat>_<lng>"`. Each floor is written in its shortest
/// round-trip form with at least one fractional digit, so integral floors
/// read `-90.0`, never `-90`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinId {
    pub lat: f64,
    pub lng: f64,
}

impl BinId {
    pub fn new(lat: f64, lng: f64) -> Self {
        // -0.0 + 0.0 == +0.0
        Self {
            lat: lat + 0.0,
            lng: lng + 0.0,
        }
    }
}

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", format_degrees(self.lat), format_degrees(self.lng))
    }
}

impl FromStr for BinId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidBin(s.to_string());

        let (lat, lng) = s.trim().split_once('_').ok_or_else(invalid)?;
        let lat: f64 = lat.parse().map_err(|_| invalid())?;
        let lng: f64 = lng.parse().map_err(|_| invalid())?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid());
        }

        Ok(Self::new(lat, lng))
    }
}

/// Format a degree value the way bin identifiers show it
pub fn format_degrees(value: f64) -> String {
    let s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        format!("{}.0", s)
    } else {
        s
    }
}

/// Bin a coordinate
///
/// # Arguments
/// * `lat` - Latitude in [-90, 90]
/// * `lng` - Longitude in [-180, 180]
/// * `grid` - Cell size per axis
///
/// Both upper bounds are inclusive: `bin(90.0, 180.0, 0.5 x 0.5)` is
/// `"90.0_180.0"`.
///
/// # Errors
/// Coordinates are range checked before the grid is checked.
pub fn bin(lat: f64, lng: f64, grid: GridSize) -> Result<BinId> {
    check_latitude("latitude", lat)?;
    check_longitude("longitude", lng)?;
    grid.validate()?;

    let id = BinId::new(floor_to_grid(lat, grid.lat), floor_to_grid(lng, grid.lng));
    tracing::debug!(lat, lng, ?grid, bin = %id, "binned coordinate");
    Ok(id)
}

/// Bin a coordinate on the default 0.01 x 0.01 grid
pub fn bin_default(lat: f64, lng: f64) -> Result<BinId> {
    bin(lat, lng, GridSize::default())
}

/// Same as [`bin`] for loosely-typed JSON arguments
///
/// Absent grid sizes default to 0.01. All four arguments are type checked,
/// in order, before any range check.
pub fn bin_json(
    lat: &serde_json::Value,
    lng: &serde_json::Value,
    grid_lat: Option<&serde_json::Value>,
    grid_lng: Option<&serde_json::Value>,
) -> Result<BinId> {
    let lat = numeric("latitude", lat)?;
    let lng = numeric("longitude", lng)?;
    let grid_lat = numeric_or("grid_size_latitude", grid_lat, DEFAULT_GRID_SIZE)?;
    let grid_lng = numeric_or("grid_size_longitude", grid_lng, DEFAULT_GRID_SIZE)?;
    bin(lat, lng, GridSize::new(grid_lat, grid_lng))
}

/// `floor(value / size) * size`, flooring toward negative infinity
fn floor_to_grid(value: f64, size: f64) -> f64 {
    let quotient = value / size;
    let nearest = quotient.round();
    // Snap only within representation noise of the quotient, never by a fraction of a cell
    let tolerance = SNAP_EPSILON.max(quotient.abs() * f64::EPSILON * SNAP_ULPS);
    let cells = if (quotient - nearest).abs() <= tolerance {
        nearest
    } else {
        quotient.floor()
    };

    round_to_decimals(cells * size, decimals(size))
}

/// Number of fractional digits in the shortest form of `size`
fn decimals(size: f64) -> Option<i32> {
    let s = size.to_string();
    let digits = s.split_once('.').map_or(0, |(_, frac)| frac.len()) as i32;
    (digits <= MAX_DECIMALS).then_some(digits)
}

fn round_to_decimals(value: f64, decimals: Option<i32>) -> f64 {
    match decimals {
        Some(d) => {
            let scale = 10f64.powi(d);
            (value * scale).round() / scale
        }
        None => value,
    }
}
