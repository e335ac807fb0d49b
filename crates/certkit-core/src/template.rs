//! Template persistence and attendee binding.
//!
//! A certificate template is the design-space size plus the element list, as
//! one JSON document. Generation binds the template against an attendee
//! record: every attribute element's property key is replaced with the
//! attendee's value for that key, and the result renders at 100% zoom.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::object_store::CanvasObjectStore;
use crate::objects::CanvasObject;
use crate::viewport::CanvasWorkingSize;

/// A persisted certificate design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateTemplate {
    /// Design-space (and export) pixel size.
    pub size: CanvasWorkingSize,
    /// Elements in z-order, bottom first.
    pub elements: Vec<CanvasObject>,
}

impl CertificateTemplate {
    pub fn new(size: CanvasWorkingSize) -> Self {
        Self {
            size,
            elements: Vec::new(),
        }
    }

    /// Snapshots the live store into a template.
    pub fn from_store(size: CanvasWorkingSize, store: &CanvasObjectStore) -> Self {
        Self {
            size,
            elements: store.list().to_vec(),
        }
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize certificate template")
    }

    /// Parses a template document. An element with an unrecognized `type`
    /// tag fails the parse; documents only ever contain the nine known kinds.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse certificate template")
    }

    /// Writes the template to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write template to {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Reads a template from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read template from {}", path.as_ref().display()))?;
        Self::from_json(&json)
    }

    /// Resolves every attribute element against an attendee and returns the
    /// bound element list, order preserved. Non-attribute elements pass
    /// through untouched; the template itself is not modified.
    pub fn bind(&self, record: &AttendeeRecord) -> Vec<CanvasObject> {
        self.elements
            .iter()
            .map(|element| match element {
                CanvasObject::Attribute(attribute) => {
                    let mut bound = attribute.clone();
                    bound.text = record.resolve(&attribute.text);
                    debug!(key = %attribute.text, value = %bound.text, "bound attribute");
                    CanvasObject::Attribute(bound)
                }
                other => other.clone(),
            })
            .collect()
    }

    /// Replaces the store contents with this template's elements (reset, then
    /// append each element in order).
    pub fn populate_store(&self, store: &mut CanvasObjectStore) {
        store.reset();
        for element in &self.elements {
            store.append(element.clone());
        }
    }
}

/// The attendee-side input to generation: a flat bag of member properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl AttendeeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The display text for a property key.
    ///
    /// Strings pass through as-is; numbers and booleans are stringified; a
    /// missing key or a null value resolves to the empty string, so a
    /// certificate never renders literal placeholder junk.
    pub fn resolve(&self, key: &str) -> String {
        match self.properties.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
