//! Template export and certificate generation.
//!
//! Export renders the template at 100% zoom with zero pan into a pixmap the
//! exact size of the working area, through the same painters as the editor
//! surface, then encodes PNG, JPEG or a single-page PDF. Generation is the
//! same pipeline with the attribute elements bound to an attendee first.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};
use tiny_skia::Pixmap;
use tracing::debug;

use certkit_core::{AttendeeRecord, CertificateTemplate};

use crate::error::RenderError;
use crate::renderer::{render, RenderFrame};

/// Default JPEG quality for exports, also used inside PDF pages.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Renders a template into a pixmap sized exactly to its working area.
pub fn render_template(
    template: &CertificateTemplate,
    background_color_hex: &str,
) -> Result<Pixmap, RenderError> {
    let width = template.size.width.round() as u32;
    let height = template.size.height.round() as u32;
    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation { width, height })?;

    let frame = RenderFrame::for_export(template.size, background_color_hex, &template.elements);
    render(&mut pixmap, &frame);
    debug!(width, height, elements = template.elements.len(), "template rendered");
    Ok(pixmap)
}

/// Binds a template against an attendee and renders it. This is the whole
/// generation flow: every attribute's property key becomes the attendee's
/// value (or the empty string), then the bound elements render as usual.
pub fn generate_certificate(
    template: &CertificateTemplate,
    record: &AttendeeRecord,
    background_color_hex: &str,
) -> Result<Pixmap, RenderError> {
    let bound = CertificateTemplate {
        size: template.size,
        elements: template.bind(record),
    };
    render_template(&bound, background_color_hex)
}

/// Encodes a rendered pixmap as PNG, preserving transparency.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    let image = rgba_from_pixmap(pixmap);
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Encodes a rendered pixmap as JPEG. JPEG has no alpha channel, so the
/// image is flattened onto white first.
pub fn encode_jpeg(pixmap: &Pixmap, quality: u8) -> Result<Vec<u8>, RenderError> {
    let image = rgb_on_white_from_pixmap(pixmap);
    let mut buffer = Cursor::new(Vec::new());
    image.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality))?;
    Ok(buffer.into_inner())
}

/// Wraps the rendered canvas in a single-page PDF.
///
/// The page uses pixel units and matches the canvas size exactly (certificate
/// templates are landscape), with the canvas embedded as one JPEG XObject
/// covering the whole page.
pub fn encode_pdf(pixmap: &Pixmap, quality: u8) -> Result<Vec<u8>, RenderError> {
    let jpeg = encode_jpeg(pixmap, quality)?;
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let image_name = Name(b"Im0");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, width, height));
        page.parent(pages_id);
        page.contents(content_id);
        page.resources().x_objects().pair(image_name, image_id);
        page.finish();
    }

    let mut image = pdf.image_xobject(image_id, &jpeg);
    image.filter(Filter::DctDecode);
    image.width(pixmap.width() as i32);
    image.height(pixmap.height() as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([width, 0.0, 0.0, height, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}

fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        match pixmap.pixel(x, y) {
            Some(pixel) => {
                let c = pixel.demultiply();
                Rgba([c.red(), c.green(), c.blue(), c.alpha()])
            }
            None => Rgba([0, 0, 0, 0]),
        }
    })
}

fn rgb_on_white_from_pixmap(pixmap: &Pixmap) -> RgbImage {
    RgbImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        match pixmap.pixel(x, y) {
            // Premultiplied source over a white background: each channel
            // gains 255 * (1 - alpha), which cannot overflow u8.
            Some(pixel) => {
                let inverse = 255 - pixel.alpha();
                Rgb([
                    pixel.red().saturating_add(inverse),
                    pixel.green().saturating_add(inverse),
                    pixel.blue().saturating_add(inverse),
                ])
            }
            None => Rgb([255, 255, 255]),
        }
    })
}
