//! Error types for the writer side of the engine.
//!
//! Query functions never fail; they degrade to `None`/`false`/`0.0`. Only setters
//! and parsers that accept external input return these errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude outside [-90, 90] or not finite
    #[error("invalid latitude {0}: must be a number between -90 and 90")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite
    #[error("invalid longitude {0}: must be a number between -180 and 180")]
    InvalidLongitude(f64),

    /// Any other malformed input (unparseable coordinate strings, unusable GeoJSON)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
