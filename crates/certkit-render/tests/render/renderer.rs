use std::sync::Arc;

use tiny_skia::Pixmap;

use certkit_core::{
    ActionMode, CanvasObject, CanvasObjectStore, CanvasWorkingSize, ObjectKind, ScrollPosition,
};
use certkit_render::{render, RenderFrame};

fn rect_with_fill(x: f64, y: f64, width: f64, height: f64, fill: &str) -> CanvasObject {
    let mut object = CanvasObject::new_at(ObjectKind::Rectangle, x, y);
    object.common_mut().width = width;
    object.common_mut().height = height;
    if let CanvasObject::Rectangle(rect) = &mut object {
        rect.background_color_hex = fill.to_string();
    }
    object
}

fn frame<'a>(objects: &'a [CanvasObject], background: &'a str) -> RenderFrame<'a> {
    RenderFrame {
        working_size: CanvasWorkingSize::new(800.0, 600.0),
        background_color_hex: background,
        objects,
        active_object_id: None,
        action_mode: ActionMode::Idle,
        zoom: 100.0,
        scroll: ScrollPosition::default(),
    }
}

fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let p = pixmap.pixel(x, y).unwrap();
    (p.red(), p.green(), p.blue(), p.alpha())
}

#[test]
fn test_red_rectangle_at_zoom_100() {
    let objects = [rect_with_fill(0.0, 0.0, 100.0, 50.0, "#ff0000")];
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    render(&mut pixmap, &frame(&objects, "transparent"));

    assert_eq!(pixel(&pixmap, 50, 25), (255, 0, 0, 255));
    assert_eq!(pixel(&pixmap, 150, 25).3, 0);
    assert_eq!(pixel(&pixmap, 50, 80).3, 0);
}

#[test]
fn test_zoom_200_scales_the_same_scene() {
    let objects = [rect_with_fill(0.0, 0.0, 100.0, 50.0, "#ff0000")];
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    let mut frame = frame(&objects, "transparent");
    frame.zoom = 200.0;
    render(&mut pixmap, &frame);

    // Design (50, 25) lands at screen (100, 50); the box now covers 200x100.
    assert_eq!(pixel(&pixmap, 100, 50), (255, 0, 0, 255));
    assert_eq!(pixel(&pixmap, 190, 90), (255, 0, 0, 255));
    assert_eq!(pixel(&pixmap, 210, 50).3, 0);
}

#[test]
fn test_scroll_translates_after_scaling() {
    let objects = [rect_with_fill(0.0, 0.0, 100.0, 50.0, "#ff0000")];
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    let mut frame = frame(&objects, "transparent");
    frame.scroll = ScrollPosition { x: 300.0, y: 200.0 };
    render(&mut pixmap, &frame);

    assert_eq!(pixel(&pixmap, 350, 225), (255, 0, 0, 255));
    assert_eq!(pixel(&pixmap, 50, 25).3, 0);
}

#[test]
fn test_background_fill_and_transparency() {
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    render(&mut pixmap, &frame(&[], "#ffffff"));
    assert_eq!(pixel(&pixmap, 10, 10), (255, 255, 255, 255));

    render(&mut pixmap, &frame(&[], "transparent"));
    assert_eq!(pixel(&pixmap, 10, 10).3, 0);
}

#[test]
fn test_store_order_is_paint_order() {
    let mut store = CanvasObjectStore::new();
    store.append(rect_with_fill(0.0, 0.0, 100.0, 100.0, "#ff0000"));
    let blue = store.append(rect_with_fill(50.0, 50.0, 100.0, 100.0, "#0000ff"));

    let mut pixmap = Pixmap::new(800, 600).unwrap();
    render(&mut pixmap, &frame(store.list(), "transparent"));
    // Later in the list paints on top.
    assert_eq!(pixel(&pixmap, 75, 75), (0, 0, 255, 255));

    store.set_layer_index(&blue, 0);
    render(&mut pixmap, &frame(store.list(), "transparent"));
    assert_eq!(pixel(&pixmap, 75, 75), (255, 0, 0, 255));
}

#[test]
fn test_opacity_is_paint_alpha() {
    let mut object = rect_with_fill(0.0, 0.0, 100.0, 50.0, "#ff0000");
    object.common_mut().opacity = 50.0;
    let objects = [object];
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    render(&mut pixmap, &frame(&objects, "transparent"));

    let (r, _, _, a) = pixel(&pixmap, 50, 25);
    assert!((115..=140).contains(&a), "alpha was {a}");
    assert!((115..=140).contains(&r), "premultiplied red was {r}");
}

#[test]
fn test_malformed_fill_skips_paint() {
    let objects = [rect_with_fill(0.0, 0.0, 100.0, 50.0, "definitely-not-a-color")];
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    render(&mut pixmap, &frame(&objects, "transparent"));
    assert_eq!(pixel(&pixmap, 50, 25).3, 0);
}

#[test]
fn test_line_and_arrow_stroke() {
    let mut line = CanvasObject::new_at(ObjectKind::Line, 10.0, 10.0);
    line.common_mut().width = 100.0;
    if let CanvasObject::Line(l) = &mut line {
        l.stroke_width = 4.0;
    }
    let mut arrow = CanvasObject::new_at(ObjectKind::Arrow, 10.0, 100.0);
    arrow.common_mut().width = 100.0;
    if let CanvasObject::Arrow(a) = &mut arrow {
        a.stroke_width = 4.0;
    }
    let objects = [line, arrow];
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    render(&mut pixmap, &frame(&objects, "transparent"));

    assert!(pixel(&pixmap, 60, 10).3 > 0);
    assert!(pixel(&pixmap, 60, 100).3 > 0);
    // Arrow head barbs sweep back from the tip.
    assert!(pixel(&pixmap, 103, 96).3 > 0);
    assert!(pixel(&pixmap, 103, 104).3 > 0);
}

#[test]
fn test_icon_fits_path_into_box() {
    let mut icon = CanvasObject::new_at(ObjectKind::Icon, 100.0, 100.0);
    icon.common_mut().width = 50.0;
    icon.common_mut().height = 50.0;
    if let CanvasObject::Icon(i) = &mut icon {
        i.svg_path = "M0 0 L10 0 L10 10 L0 10 Z".to_string();
        i.background_color_hex = "#0000ff".to_string();
    }
    let objects = [icon];
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    render(&mut pixmap, &frame(&objects, "transparent"));

    assert_eq!(pixel(&pixmap, 125, 125), (0, 0, 255, 255));
    assert_eq!(pixel(&pixmap, 160, 125).3, 0);
}

#[test]
fn test_undecoded_image_is_skipped() {
    let mut image = CanvasObject::new_at(ObjectKind::Image, 0.0, 0.0);
    image.common_mut().width = 100.0;
    image.common_mut().height = 100.0;
    let objects = [image];
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    render(&mut pixmap, &frame(&objects, "transparent"));
    assert_eq!(pixel(&pixmap, 50, 50).3, 0);
}

#[test]
fn test_decoded_image_scales_into_box() {
    let bitmap = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255]));
    let mut object = CanvasObject::new_at(ObjectKind::Image, 0.0, 0.0);
    object.common_mut().width = 100.0;
    object.common_mut().height = 100.0;
    if let CanvasObject::Image(i) = &mut object {
        i.bitmap = Some(Arc::new(bitmap));
    }
    let objects = [object];
    let mut pixmap = Pixmap::new(800, 600).unwrap();
    render(&mut pixmap, &frame(&objects, "transparent"));

    assert_eq!(pixel(&pixmap, 50, 50), (0, 255, 0, 255));
    assert_eq!(pixel(&pixmap, 150, 50).3, 0);
}

#[test]
fn test_selection_overlay_suppressed_while_drawing() {
    // Invisible body so only the overlay could touch these pixels.
    let mut object = rect_with_fill(100.0, 100.0, 100.0, 50.0, "transparent");
    object.common_mut().id = "sel".to_string();
    let objects = [object];

    let mut pixmap = Pixmap::new(800, 600).unwrap();
    let mut selected = frame(&objects, "transparent");
    selected.active_object_id = Some("sel");
    render(&mut pixmap, &selected);
    // Top-left resize handle is a filled square centered on the corner.
    assert_eq!(pixel(&pixmap, 100, 100), (59, 130, 246, 255));

    selected.action_mode = ActionMode::Drawing;
    render(&mut pixmap, &selected);
    assert_eq!(pixel(&pixmap, 100, 100).3, 0);
}
