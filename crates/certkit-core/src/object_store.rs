//! Ordered store of canvas objects.
//!
//! The `Vec` order is the z-order: index 0 paints first (bottom), the last
//! index paints on top. Every mutation bumps a revision counter and invokes
//! the registered observers, which is how render surfaces learn they need a
//! repaint.

use tracing::warn;
use uuid::Uuid;

use crate::objects::{CanvasObject, CanvasObjectPatch};

/// Handle for unsubscribing an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type Observer = Box<dyn FnMut()>;

/// The canvas object list plus change notification.
#[derive(Default)]
pub struct CanvasObjectStore {
    objects: Vec<CanvasObject>,
    revision: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl std::fmt::Debug for CanvasObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasObjectStore")
            .field("objects", &self.objects)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CanvasObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in z-order, bottom first.
    pub fn list(&self) -> &[CanvasObject] {
        &self.objects
    }

    pub fn get(&self, id: &str) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Z-index of an object, 0 = bottom.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }

    /// Monotonic change counter. Bumped once per mutating call that changed
    /// anything.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Appends an object on top of the z-order and returns its id.
    ///
    /// An empty incoming id gets a fresh uuid. An id that collides with an
    /// existing object also gets a fresh uuid, keeping ids pairwise unique.
    pub fn append(&mut self, mut object: CanvasObject) -> String {
        let needs_id = {
            let id = object.id();
            id.is_empty() || self.index_of(id).is_some()
        };
        if needs_id {
            if !object.id().is_empty() {
                warn!(id = %object.id(), "duplicate object id on append, regenerating");
            }
            object.common_mut().id = Uuid::new_v4().to_string();
        }
        object.clamp_invariants();
        let id = object.id().to_string();
        self.objects.push(object);
        self.notify();
        id
    }

    /// Shallow-merges a patch into the object with `id`.
    ///
    /// Unknown ids and empty patches are silent no-ops; a completion for an
    /// object deleted in the meantime must not fault. Returns whether
    /// anything changed.
    pub fn update(&mut self, id: &str, patch: &CanvasObjectPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let applied = self.objects[index].apply_patch(patch);
        if applied {
            self.notify();
        }
        applied
    }

    /// Removes the object with `id`. Idempotent; returns whether it existed.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.objects.remove(index);
        self.notify();
        true
    }

    /// Moves an object to a new z-index, clamped to the valid range. The
    /// relative order of all other objects is preserved.
    pub fn set_layer_index(&mut self, id: &str, new_index: usize) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let new_index = new_index.min(self.objects.len() - 1);
        if new_index == index {
            return false;
        }
        let object = self.objects.remove(index);
        self.objects.insert(new_index, object);
        self.notify();
        true
    }

    /// Clears every object. Used when leaving the editor and before a
    /// generation pass repopulates the canvas.
    pub fn reset(&mut self) {
        if self.objects.is_empty() {
            return;
        }
        self.objects.clear();
        self.notify();
    }

    /// Registers an observer invoked after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer; unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(sub, _)| *sub != id);
    }

    fn notify(&mut self) {
        self.revision += 1;
        for (_, observer) in &mut self.observers {
            observer();
        }
    }
}
