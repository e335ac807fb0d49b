//! Decoding image element bitmaps.
//!
//! Image bytes arrive from whatever transport the host uses (file picker,
//! HTTP fetch); this module decodes them and applies the result to the store
//! through the normal patch path, so a completion for an object that was
//! deleted in the meantime is a silent no-op rather than a fault.

use std::sync::Arc;

use image::RgbaImage;
use tracing::debug;

use certkit_core::{CanvasObjectPatch, CanvasObjectStore};

use crate::error::RenderError;

/// Decodes encoded image bytes (PNG, JPEG, GIF, ...) into straight-alpha
/// RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, RenderError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Decodes `bytes` and attaches the bitmap to the image object with `id`.
///
/// Returns `Ok(true)` when the object received the bitmap, `Ok(false)` when
/// it no longer exists (or is not an image object); decode failures are the
/// only error. Until this completes the renderer simply skips the object.
pub fn load_image_into_store(
    store: &mut CanvasObjectStore,
    id: &str,
    bytes: &[u8],
) -> Result<bool, RenderError> {
    let bitmap = Arc::new(decode_image(bytes)?);
    let patch = CanvasObjectPatch {
        bitmap: Some(bitmap),
        ..CanvasObjectPatch::default()
    };
    let applied = store.update(id, &patch);
    if !applied {
        debug!(%id, "decoded bitmap had no target object, dropping");
    }
    Ok(applied)
}
