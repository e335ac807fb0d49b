//! Active-object selection.
//!
//! The editor has at most one selected object. Selection stores the id, not a
//! copy of the object, so it can never disagree with the store; a stale id
//! (the object was deleted) simply resolves to `None`.

use crate::object_store::CanvasObjectStore;
use crate::objects::CanvasObject;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active_object_id: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_object_id(&self) -> Option<&str> {
        self.active_object_id.as_deref()
    }

    pub fn set(&mut self, id: impl Into<String>) {
        self.active_object_id = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.active_object_id = None;
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.active_object_id.as_deref() == Some(id)
    }

    /// Looks up the selected object in the store. Drops silently to `None`
    /// when nothing is selected or the id no longer resolves.
    pub fn resolve<'a>(&self, store: &'a CanvasObjectStore) -> Option<&'a CanvasObject> {
        store.get(self.active_object_id.as_deref()?)
    }
}
