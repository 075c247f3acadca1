//! Latitude/longitude value type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GeoError, Result};

pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A geographic point in degrees.
///
/// Note the order: `Coordinate` is (latitude, longitude), whereas GeoJSON rings
/// store `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateRepr")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Accepted wire shapes: `{"latitude": .., "longitude": ..}` or `"lat,lon"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CoordinateRepr {
    Object { latitude: f64, longitude: f64 },
    Text(String),
}

impl TryFrom<CoordinateRepr> for Coordinate {
    type Error = GeoError;

    fn try_from(repr: CoordinateRepr) -> Result<Self> {
        match repr {
            CoordinateRepr::Object {
                latitude,
                longitude,
            } => Coordinate::new(latitude, longitude),
            CoordinateRepr::Text(s) => s.parse(),
        }
    }
}

impl Coordinate {
    /// Create a validated coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// GeoJSON-ordered position (`x` = longitude, `y` = latitude).
    pub fn to_coord(&self) -> geo_types::Coord<f64> {
        geo_types::Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    pub fn from_coord(coord: geo_types::Coord<f64>) -> Self {
        Self {
            latitude: coord.y,
            longitude: coord.x,
        }
    }
}

impl FromStr for Coordinate {
    type Err = GeoError;

    /// Parse `"lat,lon"`, tolerating whitespace around either component.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(GeoError::InvalidInput(format!(
                "expected \"lat,lon\", got {:?}",
                s
            )));
        }

        let latitude: f64 = parts[0].parse().map_err(|_| {
            GeoError::InvalidInput(format!("latitude {:?} is not a number", parts[0]))
        })?;
        let longitude: f64 = parts[1].parse().map_err(|_| {
            GeoError::InvalidInput(format!("longitude {:?} is not a number", parts[1]))
        })?;

        Coordinate::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
