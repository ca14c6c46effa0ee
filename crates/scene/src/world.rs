use crate::components::{Label, Transform, Visibility};
use crate::entity::EntityId;
use foundation::handles::Handle;

/// Slot-based entity store.
///
/// Despawning clears every component in the slot and bumps its generation,
/// so ids handed out before the despawn stop resolving even after the slot
/// is reused.
#[derive(Debug, Default)]
pub struct World {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
    transforms: Vec<Option<Transform>>,
    visibility: Vec<Option<Visibility>>,
    labels: Vec<Option<Label>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = self.generations.len() as u32;
                self.ensure_capacity(index as usize);
                index
            }
        };
        self.alive[index as usize] = true;
        EntityId(Handle::new(index, self.generations[index as usize]))
    }

    /// Returns `false` if `entity` was already gone.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        let Some(idx) = self.slot(entity) else {
            return false;
        };
        self.transforms[idx] = None;
        self.visibility[idx] = None;
        self.labels[idx] = None;
        self.alive[idx] = false;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free.push(idx as u32);
        true
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.slot(entity).is_some()
    }

    pub fn len(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        let Some(idx) = self.slot(entity) else { return };
        self.transforms[idx] = Some(transform);
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        let Some(idx) = self.slot(entity) else { return };
        self.visibility[idx] = Some(visibility);
    }

    pub fn set_label(&mut self, entity: EntityId, label: Label) {
        let Some(idx) = self.slot(entity) else { return };
        self.labels[idx] = Some(label);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.slot(entity).and_then(|idx| self.transforms[idx])
    }

    pub fn visibility(&self, entity: EntityId) -> Option<Visibility> {
        self.slot(entity).and_then(|idx| self.visibility[idx])
    }

    pub fn label(&self, entity: EntityId) -> Option<&Label> {
        self.slot(entity).and_then(|idx| self.labels[idx].as_ref())
    }

    /// Visible labelled entities that have a transform, in slot order.
    pub fn labels(&self) -> Vec<(EntityId, Transform, &Label)> {
        let mut out = Vec::new();
        for (idx, label) in self.labels.iter().enumerate() {
            let Some(label) = label else { continue };
            let Some(transform) = self.transforms[idx] else {
                continue;
            };
            let visible = self.visibility[idx].map(|v| v.visible).unwrap_or(true);
            if !visible {
                continue;
            }

            let id = EntityId(Handle::new(idx as u32, self.generations[idx]));
            out.push((id, transform, label));
        }
        out
    }

    fn slot(&self, entity: EntityId) -> Option<usize> {
        let idx = entity.index() as usize;
        let live = self.alive.get(idx).copied().unwrap_or(false)
            && self.generations[idx] == entity.generation();
        live.then_some(idx)
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.generations.len() <= idx {
            let new_len = idx + 1;
            self.generations.resize(new_len, 0);
            self.alive.resize(new_len, false);
            self.transforms.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.labels.resize(new_len, None);
        }
    }
}
