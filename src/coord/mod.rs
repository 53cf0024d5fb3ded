//! Coordinates and argument validation
//!
//! This module handles:
//! - The `Coordinates` value type and its range checks
//! - Turning loosely-typed input (JSON values, CLI text) into degrees,
//!   rejecting anything that is not a number
//! - Great-circle distance (`distance`) and grid binning (`binning`)

pub mod binning;
pub mod distance;

use crate::constants::geo::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        check_latitude("latitude", self.lat)?;
        check_longitude("longitude", self.lng)?;
        Ok(())
    }
}

fn ensure_within(name: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    // NaN fails `contains` and is reported as out of range
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Error::OutOfRange {
            name: name.to_string(),
            min,
            max,
            value,
        })
    }
}

/// Check a latitude against [-90, 90], both ends inclusive
pub fn check_latitude(name: &str, value: f64) -> Result<f64> {
    ensure_within(name, value, MIN_LATITUDE, MAX_LATITUDE)
}

/// Check a longitude against [-180, 180], both ends inclusive
pub fn check_longitude(name: &str, value: f64) -> Result<f64> {
    ensure_within(name, value, MIN_LONGITUDE, MAX_LONGITUDE)
}

/// Extract a number from a JSON value
///
/// Only JSON numbers are numeric. Strings (even "49"), booleans, null,
/// arrays and objects produce [`Error::NotNumeric`] naming the argument.
pub fn numeric(name: &str, value: &serde_json::Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| Error::not_numeric(name))
}

/// Like [`numeric`], but an absent value falls back to `default`
pub fn numeric_or(name: &str, value: Option<&serde_json::Value>, default: f64) -> Result<f64> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(default),
        Some(v) => numeric(name, v),
    }
}

/// Parse a number from command-line text
pub fn parse_numeric(name: &str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| Error::not_numeric(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(-90.0, -180.0).validate().is_ok());
        assert!(Coordinates::new(0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = Coordinates::new(90.00001, 0.0).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert!(err.to_string().contains("must be between"));
        assert!(err.to_string().starts_with("latitude"));

        let err = Coordinates::new(0.0, -180.00001).validate().unwrap_err();
        assert!(err.to_string().starts_with("longitude"));
    }

    #[test]
    fn test_nan_is_out_of_range() {
        let err = check_latitude("lat", f64::NAN).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));
    }

    #[test]
    fn test_numeric_json() {
        assert_eq!(numeric("lat", &json!(49)).unwrap(), 49.0);
        assert_eq!(numeric("lat", &json!(-49.25)).unwrap(), -49.25);

        for bad in [json!("49"), json!(null), json!(true), json!([1]), json!({})] {
            let err = numeric("lat", &bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Type);
            assert_eq!(err.to_string(), "lat must be numeric");
        }
    }

    #[test]
    fn test_numeric_or_default() {
        assert_eq!(numeric_or("g", None, 0.01).unwrap(), 0.01);
        assert_eq!(numeric_or("g", Some(&json!(null)), 0.01).unwrap(), 0.01);
        assert_eq!(numeric_or("g", Some(&json!(0.5)), 0.01).unwrap(), 0.5);
        assert!(numeric_or("g", Some(&json!("0.5")), 0.01).is_err());
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("lat", " 40.7128 ").unwrap(), 40.7128);
        assert_eq!(parse_numeric("lon", "-74").unwrap(), -74.0);

        let err = parse_numeric("longitude", "not_a_number").unwrap_err();
        assert_eq!(err.to_string(), "longitude must be numeric");
    }
}
