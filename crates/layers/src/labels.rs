use foundation::math::SceneOffset;
use scene::World;
use scene::entity::EntityId;
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub font_size_px: f32,
    pub color: [f32; 4],
    pub halo_color: [f32; 4],
    pub halo_width_px: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size_px: 14.0,
            color: [1.0, 1.0, 1.0, 1.0],
            halo_color: [0.0, 0.0, 0.0, 0.85],
            halo_width_px: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelsConfig {
    pub style: LabelStyle,
    pub max_labels: usize,
    pub max_text_len: usize,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            style: LabelStyle::default(),
            max_labels: 10_000,
            max_text_len: 256,
        }
    }
}

/// A label ready for the host to pin at `position` in scene space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLabel {
    /// Identifier the marker was registered under, when the caller knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub entity_index: u32,
    pub text: String,
    pub class: String,
    pub position: SceneOffset,
    pub style: LabelStyle,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelsLayerSnapshot {
    pub labels: Vec<PlacedLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelsLayer {
    id: LayerId,
    pub config: LabelsConfig,
}

impl LabelsLayer {
    pub fn new(id: u64, config: LabelsConfig) -> Self {
        Self {
            id: LayerId(id),
            config,
        }
    }

    pub fn extract(&self, world: &World) -> LabelsLayerSnapshot {
        self.extract_keyed(world, |_| None)
    }

    /// Like [`LabelsLayer::extract`], tagging each label with `key_of(entity)`.
    pub fn extract_keyed<F>(&self, world: &World, key_of: F) -> LabelsLayerSnapshot
    where
        F: Fn(EntityId) -> Option<String>,
    {
        let mut out = Vec::new();
        for (entity, transform, label) in world.labels() {
            if out.len() >= self.config.max_labels {
                break;
            }

            let text = label.text.trim();
            if text.is_empty() || text.len() > self.config.max_text_len {
                continue;
            }

            let p = transform.position;
            out.push(PlacedLabel {
                key: key_of(entity),
                entity_index: entity.index(),
                text: text.to_string(),
                class: label.class.clone(),
                position: SceneOffset::new(p.x, p.y, p.z),
                style: self.config.style.clone(),
            });
        }

        LabelsLayerSnapshot { labels: out }
    }
}

impl Layer for LabelsLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
