use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius (meters), the sphere the web-mercator map is drawn on.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Equatorial circumference of [`EARTH_RADIUS_M`].
pub const EARTH_CIRCUMFERENCE_M: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS_M;

/// Geographic coordinate in degrees.
///
/// The unchecked [`GeoCoordinate::new`] is the normal input path; range
/// checks belong to whoever produces the value (see [`GeoCoordinate::try_new`]).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CoordinateError {
    NonFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::NonFinite => write!(f, "coordinate is not finite"),
            CoordinateError::LatitudeOutOfRange(v) => {
                write!(f, "latitude {v} outside [-90, 90]")
            }
            CoordinateError::LongitudeOutOfRange(v) => {
                write!(f, "longitude {v} outside [-180, 180]")
            }
        }
    }
}

impl std::error::Error for CoordinateError {}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let coord = Self::new(latitude, longitude);
        coord.validate()?;
        Ok(coord)
    }

    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// Circumference of the parallel at `latitude_deg` (meters).
pub fn circumference_at_latitude(latitude_deg: f64) -> f64 {
    EARTH_CIRCUMFERENCE_M * latitude_deg.to_radians().cos()
}

/// Great-circle distance between two coordinates on the mean-radius sphere.
pub fn haversine_distance_m(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = lat_b - lat_a;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}
