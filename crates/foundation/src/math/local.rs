use serde::{Deserialize, Serialize};

use super::geodesy::GeoCoordinate;
use super::mercator::MercatorCoordinate;
use super::vec::Vec3;

/// Displacement from the scene origin in scene units (meters at the anchor).
///
/// `y` is up. Ground placements always have `y == 0`; the mercator
/// north-south axis lands on `z`, so north is negative `z`.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneOffset {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SceneOffset {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn ground(x: f64, z: f64) -> Self {
        Self { x, y: 0.0, z }
    }
}

impl From<SceneOffset> for Vec3 {
    fn from(offset: SceneOffset) -> Self {
        Vec3::new(offset.x, offset.y, offset.z)
    }
}

/// Geographic anchor of a scene: the coordinate placed at the scene origin.
///
/// Fixed for the lifetime of the scene. Moving it would shift every offset
/// already handed out, so there is no setter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReferenceFrame {
    anchor: GeoCoordinate,
    origin: MercatorCoordinate,
    meter_units: f64,
}

impl ReferenceFrame {
    pub fn new(anchor: GeoCoordinate) -> Self {
        let origin = MercatorCoordinate::from_geo(anchor, 0.0);
        Self {
            anchor,
            origin,
            meter_units: origin.meter_in_mercator_units(),
        }
    }

    pub fn anchor(&self) -> GeoCoordinate {
        self.anchor
    }

    /// Mercator coordinate of the scene origin, as handed to the map engine
    /// when the 3D layer is attached.
    pub fn origin(&self) -> MercatorCoordinate {
        self.origin
    }

    /// Mercator units per meter, evaluated at the anchor.
    pub fn meter_units(&self) -> f64 {
        self.meter_units
    }

    /// Ground-level offset of `target` from the anchor.
    ///
    /// Longitudes are not unwrapped: a target across the antimeridian from
    /// the anchor lands almost a full map width away.
    pub fn project(&self, target: GeoCoordinate) -> SceneOffset {
        let target = MercatorCoordinate::from_geo(target, 0.0);
        SceneOffset::ground(
            target.x / self.meter_units - self.origin.x / self.meter_units,
            target.y / self.meter_units - self.origin.y / self.meter_units,
        )
    }

    /// Geographic coordinate under a ground-plane scene offset. `offset.y`
    /// is ignored.
    pub fn unproject(&self, offset: SceneOffset) -> GeoCoordinate {
        MercatorCoordinate::new(
            self.origin.x + offset.x * self.meter_units,
            self.origin.y + offset.z * self.meter_units,
            0.0,
        )
        .to_geo()
    }
}

/// Offset of `target` in a scene anchored at `reference`.
pub fn project(reference: GeoCoordinate, target: GeoCoordinate) -> SceneOffset {
    ReferenceFrame::new(reference).project(target)
}
