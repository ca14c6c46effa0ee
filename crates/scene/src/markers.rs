use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use foundation::math::SceneOffset;

use crate::World;
use crate::components::{Label, Transform, Visibility};
use crate::entity::EntityId;

/// Result of [`MarkerRegistry::insert`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Placement {
    pub entity: EntityId,
    /// Marker previously registered under the same key, already despawned.
    pub replaced: Option<EntityId>,
}

/// Keyed markers living in a scene.
///
/// The registry owns the world its markers are spawned into. Every marker
/// leaves the world together with its key: removing, replacing or clearing
/// a key despawns the entity and drops its label.
#[derive(Debug)]
pub struct MarkerRegistry<K> {
    world: World,
    markers: HashMap<K, EntityId>,
    keys: HashMap<EntityId, K>,
}

impl<K> Default for MarkerRegistry<K> {
    fn default() -> Self {
        Self {
            world: World::new(),
            markers: HashMap::new(),
            keys: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> MarkerRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn insert(&mut self, key: K, offset: SceneOffset, label: Label) -> Placement {
        let replaced = self.markers.remove(&key);
        if let Some(old) = replaced {
            self.keys.remove(&old);
            self.world.despawn(old);
        }

        let entity = self.world.spawn();
        self.world.set_transform(entity, Transform::at_offset(offset));
        self.world.set_visibility(entity, Visibility::visible());
        self.world.set_label(entity, label);
        self.keys.insert(entity, key.clone());
        self.markers.insert(key, entity);

        Placement { entity, replaced }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.markers.remove(key) {
            Some(entity) => {
                self.keys.remove(&entity);
                self.world.despawn(entity)
            }
            None => false,
        }
    }

    /// Despawns every marker; returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.markers.len();
        self.keys.clear();
        for (_, entity) in self.markers.drain() {
            self.world.despawn(entity);
        }
        count
    }

    pub fn set_visible<Q>(&mut self, key: &Q, visible: bool) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(entity) = self.markers.get(key).copied() else {
            return false;
        };
        self.world.set_visibility(entity, visible.into());
        true
    }

    /// Key a live marker was inserted under. Stale ids resolve to `None`
    /// even when their slot has been reused.
    pub fn key_of(&self, entity: EntityId) -> Option<&K> {
        self.keys.get(&entity)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<EntityId>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.markers.get(key).copied()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.markers.contains_key(key)
    }

    pub fn position<Q>(&self, key: &Q) -> Option<SceneOffset>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let entity = self.get(key)?;
        let p = self.world.transform(entity)?.position;
        Some(SceneOffset::new(p.x, p.y, p.z))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.markers.keys()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
