//! # CertKit Render
//!
//! Raster pipeline for the certificate designer. Takes the object model from
//! `certkit-core` and paints it with tiny-skia: the zoomed/panned editor
//! surface, exact-size export output, and generated certificates with bound
//! attendee attributes.
//!
//! ## Core Components
//!
//! - **Renderer**: full-repaint frame painting with per-variant painters and
//!   the selection overlay
//! - **Text layout**: word wrap, alignment and justification with rusttype
//!   glyph rasterization and fontdb system font lookup
//! - **SVG paths**: icon path-data parsing into tiny-skia paths
//! - **Export**: PNG, JPEG and single-page PDF encoding
//! - **Image loading**: bitmap decode with store-patch completion
//!
//! Editor and export share every painter; only the transform differs, which
//! is what makes exports match the on-screen preview pixel for pixel.

pub mod color;
pub mod error;
pub mod export;
pub mod font_manager;
pub mod image_loader;
pub mod renderer;
pub mod svg_path;
pub mod text_layout;

pub use color::parse_color;
pub use error::RenderError;
pub use export::{
    encode_jpeg, encode_pdf, encode_png, generate_certificate, render_template,
    DEFAULT_JPEG_QUALITY,
};
pub use image_loader::{decode_image, load_image_into_store};
pub use renderer::{render, RenderFrame};
pub use svg_path::parse_svg_path;
pub use text_layout::{draw_text_block, TextBlock};
