use std::f64::consts::PI;

use super::geodesy::{EARTH_CIRCUMFERENCE_M, GeoCoordinate, circumference_at_latitude};

/// Normalized web-mercator coordinate.
///
/// `x` grows eastward and `y` southward, both spanning `[0, 1)` over the
/// whole map; `z` is altitude expressed in the same units at the point's
/// latitude. This is the coordinate space the map engine positions custom
/// 3D layers in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MercatorCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub fn mercator_x_from_lng(lng: f64) -> f64 {
    (180.0 + lng) / 360.0
}

pub fn mercator_y_from_lat(lat: f64) -> f64 {
    (180.0 - (180.0 / PI) * (PI / 4.0 + lat * PI / 360.0).tan().ln()) / 360.0
}

pub fn lng_from_mercator_x(x: f64) -> f64 {
    x * 360.0 - 180.0
}

pub fn lat_from_mercator_y(y: f64) -> f64 {
    let y2 = 180.0 - y * 360.0;
    360.0 / PI * (y2 * PI / 180.0).exp().atan() - 90.0
}

/// Stretch factor of the projection at `lat` degrees.
pub fn mercator_scale(lat: f64) -> f64 {
    1.0 / lat.to_radians().cos()
}

impl MercatorCoordinate {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_geo(coord: GeoCoordinate, altitude_m: f64) -> Self {
        Self {
            x: mercator_x_from_lng(coord.longitude),
            y: mercator_y_from_lat(coord.latitude),
            z: altitude_m / circumference_at_latitude(coord.latitude),
        }
    }

    pub fn to_geo(self) -> GeoCoordinate {
        GeoCoordinate::new(lat_from_mercator_y(self.y), lng_from_mercator_x(self.x))
    }

    pub fn altitude_m(self) -> f64 {
        self.z * circumference_at_latitude(lat_from_mercator_y(self.y))
    }

    /// Length of one real-world meter in mercator units at this coordinate's
    /// latitude.
    pub fn meter_in_mercator_units(self) -> f64 {
        (1.0 / EARTH_CIRCUMFERENCE_M) * mercator_scale(lat_from_mercator_y(self.y))
    }
}
