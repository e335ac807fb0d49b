//! Canvas renderer.
//!
//! Full repaint of a frame into a tiny-skia pixmap. The same per-variant
//! painters draw the editor surface (zoomed and panned) and export output
//! (100% zoom, zero pan), which is what makes export WYSIWYG: only the
//! transform differs.
//!
//! Per-element failures degrade: a malformed color, an unparsable icon path,
//! a missing font or an undecoded bitmap skip that paint and the frame
//! carries on.

use tiny_skia::{
    FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};
use tracing::debug;

use certkit_core::{
    geometry, ActionMode, CanvasObject, CanvasWorkingSize, Editor, ObjectDimensions, Point,
    ScrollPosition,
};

use crate::color::parse_color;
use crate::svg_path::parse_svg_path;
use crate::text_layout::{draw_text_block, TextBlock};

fn selection_color() -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(59, 130, 246, 255)
}

/// Everything one repaint needs, borrowed from the editor (or assembled
/// directly for export).
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub working_size: CanvasWorkingSize,
    /// Working-area fill; `"transparent"` leaves the surface unfilled.
    pub background_color_hex: &'a str,
    /// Objects in z-order, bottom first.
    pub objects: &'a [CanvasObject],
    pub active_object_id: Option<&'a str>,
    pub action_mode: ActionMode,
    pub zoom: f64,
    pub scroll: ScrollPosition,
}

impl<'a> RenderFrame<'a> {
    /// Snapshot of an editor for its on-screen surface.
    pub fn from_editor(editor: &'a Editor, background_color_hex: &'a str) -> Self {
        Self {
            working_size: editor.viewport().working_size(),
            background_color_hex,
            objects: editor.store().list(),
            active_object_id: editor.selection().active_object_id(),
            action_mode: editor.action_mode(),
            zoom: editor.viewport().zoom(),
            scroll: editor.viewport().scroll_position(),
        }
    }

    /// Frame for export/generation: 100% zoom, no pan, no selection.
    pub fn for_export(
        working_size: CanvasWorkingSize,
        background_color_hex: &'a str,
        objects: &'a [CanvasObject],
    ) -> Self {
        Self {
            working_size,
            background_color_hex,
            objects,
            active_object_id: None,
            action_mode: ActionMode::Idle,
            zoom: 100.0,
            scroll: ScrollPosition::default(),
        }
    }

    fn scale(&self) -> f64 {
        self.zoom / 100.0
    }

    fn transform(&self) -> Transform {
        let scale = self.scale() as f32;
        Transform::from_scale(scale, scale)
            .post_translate(self.scroll.x as f32, self.scroll.y as f32)
    }
}

/// Repaints the whole frame into `pixmap`.
pub fn render(pixmap: &mut Pixmap, frame: &RenderFrame) {
    pixmap.fill(tiny_skia::Color::TRANSPARENT);
    let transform = frame.transform();

    if let Some(color) = parse_color(frame.background_color_hex, 100.0) {
        if let Some(rect) = Rect::from_xywh(
            0.0,
            0.0,
            frame.working_size.width as f32,
            frame.working_size.height as f32,
        ) {
            let mut paint = Paint::default();
            paint.set_color(color);
            let path = PathBuilder::from_rect(rect);
            pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
    }

    for object in frame.objects {
        render_object(pixmap, object, frame, transform);
    }

    render_selection_overlay(pixmap, frame);
}

fn render_object(pixmap: &mut Pixmap, object: &CanvasObject, frame: &RenderFrame, transform: Transform) {
    let common = object.common();
    let opacity = common.opacity;

    match object {
        CanvasObject::Rectangle(rect) => {
            let path = if rect.border_radius > 0.0 {
                rounded_rect_path(common.x, common.y, common.width, common.height, rect.border_radius)
            } else {
                Rect::from_xywh(
                    common.x as f32,
                    common.y as f32,
                    common.width as f32,
                    common.height as f32,
                )
                .map(PathBuilder::from_rect)
            };
            let Some(path) = path else { return };
            fill(pixmap, &path, &rect.background_color_hex, opacity, transform);
            stroke(
                pixmap,
                &path,
                &rect.stroke_color_hex,
                rect.stroke_width,
                opacity,
                transform,
            );
        }
        CanvasObject::Ellipse(ellipse) => {
            let Some(oval) = Rect::from_xywh(
                common.x as f32,
                common.y as f32,
                common.width as f32,
                common.height as f32,
            ) else {
                return;
            };
            let mut pb = PathBuilder::new();
            pb.push_oval(oval);
            let Some(path) = pb.finish() else { return };
            fill(pixmap, &path, &ellipse.background_color_hex, opacity, transform);
            stroke(
                pixmap,
                &path,
                &ellipse.stroke_color_hex,
                ellipse.stroke_width,
                opacity,
                transform,
            );
        }
        CanvasObject::FreeDraw(free_draw) => {
            if free_draw.free_draw_points.len() < 2 {
                return;
            }
            let mut pb = PathBuilder::new();
            let first = free_draw.free_draw_points[0];
            pb.move_to(first.x as f32, first.y as f32);
            for p in &free_draw.free_draw_points[1..] {
                pb.line_to(p.x as f32, p.y as f32);
            }
            let Some(path) = pb.finish() else { return };
            stroke(
                pixmap,
                &path,
                &free_draw.stroke_color_hex,
                free_draw.stroke_width,
                opacity,
                transform,
            );
        }
        CanvasObject::Line(line) => {
            let Some(path) = segment_path(common.x, common.y, common.width, common.height) else {
                return;
            };
            stroke(pixmap, &path, &line.stroke_color_hex, line.stroke_width, opacity, transform);
        }
        CanvasObject::Arrow(arrow) => {
            let Some(path) = segment_path(common.x, common.y, common.width, common.height) else {
                return;
            };
            stroke(pixmap, &path, &arrow.stroke_color_hex, arrow.stroke_width, opacity, transform);
            if let Some(head) =
                arrow_head_path(common.x, common.y, common.width, common.height, arrow.stroke_width)
            {
                stroke(pixmap, &head, &arrow.stroke_color_hex, arrow.stroke_width, opacity, transform);
            }
        }
        CanvasObject::Text(text) => {
            draw_text_block(
                pixmap,
                &TextBlock {
                    text: &text.text,
                    x: common.x,
                    y: common.y,
                    width: common.width,
                    height: common.height,
                    font: &text.font,
                    align_horizontal: text.text_align_horizontal,
                    align_vertical: text.text_align_vertical,
                    justify: text.text_justify,
                    opacity,
                },
                frame.scale(),
                frame.scroll,
            );
        }
        CanvasObject::Attribute(attribute) => {
            // Attributes always render centered both ways, regardless of any
            // alignment fields a document might carry.
            draw_text_block(
                pixmap,
                &TextBlock {
                    text: &attribute.text,
                    x: common.x,
                    y: common.y,
                    width: common.width,
                    height: common.height,
                    font: &attribute.font,
                    align_horizontal: certkit_core::TextAlignHorizontal::Center,
                    align_vertical: certkit_core::TextAlignVertical::Middle,
                    justify: false,
                    opacity,
                },
                frame.scale(),
                frame.scroll,
            );
        }
        CanvasObject::Icon(icon) => {
            let Some(path) = parse_svg_path(&icon.svg_path) else {
                debug!(id = %common.id, "icon path did not parse, skipping");
                return;
            };
            let bounds = path.bounds();
            if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
                return;
            }
            let fit = Transform::from_translate(-bounds.x(), -bounds.y())
                .post_scale(
                    (common.width / bounds.width() as f64) as f32,
                    (common.height / bounds.height() as f64) as f32,
                )
                .post_translate(common.x as f32, common.y as f32)
                .post_concat(transform);
            if let Some(color) = parse_color(&icon.background_color_hex, opacity) {
                let mut paint = Paint::default();
                paint.set_color(color);
                paint.anti_alias = true;
                pixmap.fill_path(&path, &paint, FillRule::Winding, fit, None);
            }
        }
        CanvasObject::Image(image) => {
            let Some(bitmap) = &image.bitmap else {
                // Decode still in flight; the object reappears once the
                // completion patches the store.
                debug!(id = %common.id, "image bitmap not decoded yet, skipping");
                return;
            };
            let Some(source) = pixmap_from_rgba(bitmap) else {
                return;
            };
            if common.width <= 0.0 || common.height <= 0.0 {
                return;
            }
            let fit = Transform::from_scale(
                (common.width / bitmap.width() as f64) as f32,
                (common.height / bitmap.height() as f64) as f32,
            )
            .post_translate(common.x as f32, common.y as f32)
            .post_concat(transform);
            let paint = PixmapPaint {
                opacity: (opacity / 100.0).clamp(0.0, 1.0) as f32,
                ..PixmapPaint::default()
            };
            pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, fit, None);
        }
    }
}

/// Selection frame, the eight resize handles and the rotate handle, painted
/// in screen space. Suppressed while a draw gesture is in flight so the
/// growing provisional object is not boxed in.
fn render_selection_overlay(pixmap: &mut Pixmap, frame: &RenderFrame) {
    if frame.action_mode == ActionMode::Drawing {
        return;
    }
    let Some(active_id) = frame.active_object_id else {
        return;
    };
    let Some(object) = frame.objects.iter().find(|o| o.id() == active_id) else {
        return;
    };

    let dims = object.dimensions();
    let scale = frame.scale();
    let bounds = ObjectDimensions::new(
        dims.x * scale + frame.scroll.x,
        dims.y * scale + frame.scroll.y,
        dims.width * scale,
        dims.height * scale,
    );

    let mut paint = Paint::default();
    paint.set_color(selection_color());
    paint.anti_alias = true;

    if let Some(rect) = Rect::from_xywh(
        bounds.x as f32,
        bounds.y as f32,
        bounds.width.max(1.0) as f32,
        bounds.height.max(1.0) as f32,
    ) {
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width: 1.5,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    let half = (geometry::HANDLE_SIZE / 2.0) as f32;
    for (_, center) in geometry::handle_positions(bounds) {
        if let Some(rect) = Rect::from_xywh(
            center.x as f32 - half,
            center.y as f32 - half,
            geometry::HANDLE_SIZE as f32,
            geometry::HANDLE_SIZE as f32,
        ) {
            let path = PathBuilder::from_rect(rect);
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    let rotate = geometry::rotate_handle_position(bounds);
    if let Some(circle) = PathBuilder::from_circle(rotate.x as f32, rotate.y as f32, half) {
        pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn fill(pixmap: &mut Pixmap, path: &tiny_skia::Path, color_hex: &str, opacity: f64, transform: Transform) {
    let Some(color) = parse_color(color_hex, opacity) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
}

fn stroke(
    pixmap: &mut Pixmap,
    path: &tiny_skia::Path,
    color_hex: &str,
    width: f64,
    opacity: f64,
    transform: Transform,
) {
    if width <= 0.0 {
        return;
    }
    let Some(color) = parse_color(color_hex, opacity) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    let stroke = Stroke {
        width: width as f32,
        ..Stroke::default()
    };
    pixmap.stroke_path(path, &paint, &stroke, transform, None);
}

/// Rounded rectangle via quadratic corner curves, radius clamped to half the
/// shorter side.
fn rounded_rect_path(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Option<tiny_skia::Path> {
    let x = x as f32;
    let y = y as f32;
    let w = w as f32;
    let h = h as f32;
    let r = (radius as f32).min(w / 2.0).min(h / 2.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

/// The straight segment from `(x, y)` to `(x + w, y + h)`.
fn segment_path(x: f64, y: f64, w: f64, h: f64) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x as f32, y as f32);
    pb.line_to((x + w) as f32, (y + h) as f32);
    pb.finish()
}

/// Two barbs at the arrow's endpoint, swept back 30 degrees either side of
/// the shaft.
fn arrow_head_path(x: f64, y: f64, w: f64, h: f64, stroke_width: f64) -> Option<tiny_skia::Path> {
    let tip = Point::new(x + w, y + h);
    let shaft = h.atan2(w);
    let length = (stroke_width * 3.0).max(10.0);
    let sweep = std::f64::consts::PI / 6.0;

    let mut pb = PathBuilder::new();
    for side in [-1.0, 1.0] {
        let angle = shaft + std::f64::consts::PI + side * sweep;
        pb.move_to(tip.x as f32, tip.y as f32);
        pb.line_to(
            (tip.x + angle.cos() * length) as f32,
            (tip.y + angle.sin() * length) as f32,
        );
    }
    pb.finish()
}

/// Converts straight-alpha RGBA pixels to a premultiplied tiny-skia pixmap.
fn pixmap_from_rgba(image: &image::RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let mut data = image.as_raw().clone();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        px[0] = (px[0] as u16 * a / 255) as u8;
        px[1] = (px[1] as u16 * a / 255) as u8;
        px[2] = (px[2] as u16 * a / 255) as u8;
    }
    Pixmap::from_vec(data, size)
}
