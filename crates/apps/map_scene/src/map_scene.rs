use std::fmt;

use foundation::math::{CoordinateError, GeoCoordinate, ReferenceFrame, SceneOffset};
use layers::{LabelsConfig, LabelsLayer, LabelsLayerSnapshot};
use scene::MarkerRegistry;
use scene::components::Label;
use tracing::{debug, info};
use uuid::Uuid;

use crate::building::Building;
use crate::config::{ConfigError, MapConfig};

const LABELS_LAYER_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum MapSceneError {
    /// `add_building` was called before any right-click was captured.
    NoCapturedCoordinate,
    InvalidCapturedCoordinate(CoordinateError),
    InvalidCoordinate { uid: String, error: CoordinateError },
}

impl fmt::Display for MapSceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapSceneError::NoCapturedCoordinate => {
                write!(f, "no map coordinate has been captured yet")
            }
            MapSceneError::InvalidCapturedCoordinate(error) => {
                write!(f, "captured map coordinate is invalid: {error}")
            }
            MapSceneError::InvalidCoordinate { uid, error } if uid.is_empty() => {
                write!(f, "building has an invalid coordinate: {error}")
            }
            MapSceneError::InvalidCoordinate { uid, error } => {
                write!(f, "building {uid:?} has an invalid coordinate: {error}")
            }
        }
    }
}

impl std::error::Error for MapSceneError {}

/// Building labels over a tilted map.
///
/// The map engine reports right-clicks through [`MapScene::on_context_menu`];
/// buildings are then placed as labels in a scene anchored at the configured
/// map center.
#[derive(Debug)]
pub struct MapScene {
    config: MapConfig,
    frame: ReferenceFrame,
    clicked: Option<GeoCoordinate>,
    markers: MarkerRegistry<String>,
    labels: LabelsLayer,
}

impl MapScene {
    pub fn new(config: MapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let frame = ReferenceFrame::new(config.center);
        debug!(
            lat = config.center.latitude,
            lng = config.center.longitude,
            "scene anchored"
        );
        Ok(Self {
            config,
            frame,
            clicked: None,
            markers: MarkerRegistry::new(),
            labels: LabelsLayer::new(LABELS_LAYER_ID, LabelsConfig::default()),
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    /// Records the coordinate under a right-click; the next
    /// [`MapScene::add_building`] places its building there.
    pub fn on_context_menu(&mut self, at: GeoCoordinate) {
        self.clicked = Some(at);
    }

    pub fn clicked_coordinate(&self) -> Option<GeoCoordinate> {
        self.clicked
    }

    pub fn add_building(&mut self, user_id: &str) -> Result<Building, MapSceneError> {
        let at = self.clicked.ok_or(MapSceneError::NoCapturedCoordinate)?;
        at.validate().map_err(MapSceneError::InvalidCapturedCoordinate)?;
        let mut placed = self.add_buildings(&[Building::new(user_id, at)])?;
        Ok(placed.remove(0))
    }

    /// Places every building, or none if any coordinate is invalid.
    ///
    /// Records without a uid get a fresh one; a uid that is already placed
    /// moves its label to the new coordinate.
    pub fn add_buildings(&mut self, buildings: &[Building]) -> Result<Vec<Building>, MapSceneError> {
        for building in buildings {
            building
                .coordinate()
                .validate()
                .map_err(|error| MapSceneError::InvalidCoordinate {
                    uid: building.uid.clone(),
                    error,
                })?;
        }

        let mut placed = Vec::with_capacity(buildings.len());
        for building in buildings {
            let mut building = building.clone();
            if building.uid.is_empty() {
                building.uid = Uuid::new_v4().to_string();
            }

            let offset = self.frame.project(building.coordinate());
            let placement = self
                .markers
                .insert(building.uid.clone(), offset, Label::building());
            debug!(
                uid = %building.uid,
                x = offset.x,
                z = offset.z,
                replaced = placement.replaced.is_some(),
                "building placed"
            );
            placed.push(building);
        }
        Ok(placed)
    }

    pub fn remove_building(&mut self, uid: &str) -> bool {
        let removed = self.markers.remove(uid);
        if removed {
            debug!(uid, "building removed");
        }
        removed
    }

    pub fn set_building_visible(&mut self, uid: &str, visible: bool) -> bool {
        self.markers.set_visible(uid, visible)
    }

    pub fn building_position(&self, uid: &str) -> Option<SceneOffset> {
        self.markers.position(uid)
    }

    pub fn building_count(&self) -> usize {
        self.markers.len()
    }

    pub fn labels(&self) -> LabelsLayerSnapshot {
        self.labels.extract_keyed(self.markers.world(), |entity| {
            self.markers.key_of(entity).cloned()
        })
    }

    /// Tears the scene down, removing every label. Returns how many were
    /// placed.
    pub fn dispose(mut self) -> usize {
        let removed = self.markers.clear();
        info!(removed, "map scene disposed");
        removed
    }
}
