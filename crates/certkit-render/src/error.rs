//! Error types for rendering and export.

use thiserror::Error;

/// Errors the render and export paths can surface.
///
/// Per-element problems (a malformed color, a missing font, an undecoded
/// bitmap) never reach this type; those degrade to skipping the paint so one
/// bad element cannot take down a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested output surface could not be allocated (zero or
    /// overflowing dimensions).
    #[error("failed to allocate a {width}x{height} pixel surface")]
    PixmapAllocation { width: u32, height: u32 },

    /// An image codec failed while decoding an element bitmap or encoding
    /// export output.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
}
