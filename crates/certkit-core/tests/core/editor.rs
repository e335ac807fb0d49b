use certkit_core::{
    ActionMode, AnchorX, AnchorY, CanvasObject, CanvasWorkingSize, Editor, ObjectKind,
    PointerInput, UserMode, WindowSize,
};

/// Window matching the working area: zoom 100 and zero scroll, so screen and
/// design coordinates coincide and gestures are easy to reason about.
fn editor() -> Editor {
    Editor::new(CanvasWorkingSize::new(800.0, 600.0), WindowSize::new(800.0, 600.0))
}

fn sized(kind: ObjectKind, x: f64, y: f64, width: f64, height: f64) -> CanvasObject {
    let mut object = CanvasObject::new_at(kind, x, y);
    object.common_mut().width = width;
    object.common_mut().height = height;
    object
}

fn select_at(editor: &mut Editor, x: f64, y: f64) {
    editor.pointer_down(PointerInput::at(x, y));
    editor.pointer_up(PointerInput::at(x, y));
}

#[test]
fn test_draw_rectangle_gesture() {
    let mut editor = editor();
    editor.set_user_mode(UserMode::Draw(ObjectKind::Rectangle));

    editor.pointer_down(PointerInput::at(100.0, 100.0));
    assert_eq!(editor.action_mode(), ActionMode::Drawing);
    assert_eq!(editor.store().len(), 1);
    // Property panels stay empty while the gesture is in flight.
    assert!(editor.active_object_for_panels().is_none());

    editor.pointer_move(PointerInput::at(200.0, 160.0));
    editor.pointer_up(PointerInput::at(200.0, 160.0));

    assert_eq!(editor.action_mode(), ActionMode::Idle);
    assert_eq!(editor.user_mode(), UserMode::Select);
    let object = editor.active_object_for_panels().expect("drawn object selected");
    let dims = object.dimensions();
    assert_eq!((dims.x, dims.y, dims.width, dims.height), (100.0, 100.0, 100.0, 60.0));
}

#[test]
fn test_draw_normalizes_leftward_drag() {
    let mut editor = editor();
    editor.set_user_mode(UserMode::Draw(ObjectKind::Ellipse));
    editor.pointer_down(PointerInput::at(300.0, 300.0));
    editor.pointer_move(PointerInput::at(250.0, 280.0));
    editor.pointer_up(PointerInput::at(250.0, 280.0));

    let dims = editor.active_object_for_panels().unwrap().dimensions();
    assert_eq!((dims.x, dims.y, dims.width, dims.height), (250.0, 280.0, 50.0, 20.0));
}

#[test]
fn test_tiny_drag_is_discarded() {
    let mut editor = editor();
    editor.set_user_mode(UserMode::Draw(ObjectKind::Rectangle));
    editor.pointer_down(PointerInput::at(100.0, 100.0));
    editor.pointer_move(PointerInput::at(102.0, 101.0));
    editor.pointer_up(PointerInput::at(102.0, 101.0));

    assert!(editor.store().is_empty());
    assert!(editor.selection().active_object_id().is_none());
    assert_eq!(editor.user_mode(), UserMode::Select);
}

#[test]
fn test_thin_line_survives_draw_threshold() {
    let mut editor = editor();
    editor.set_user_mode(UserMode::Draw(ObjectKind::Line));
    editor.pointer_down(PointerInput::at(100.0, 100.0));
    editor.pointer_move(PointerInput::at(200.0, 101.0));
    editor.pointer_up(PointerInput::at(200.0, 101.0));

    // One axis over the threshold is enough.
    assert_eq!(editor.store().len(), 1);
}

#[test]
fn test_free_draw_collects_points_and_bounds() {
    let mut editor = editor();
    editor.set_user_mode(UserMode::Draw(ObjectKind::FreeDraw));
    editor.pointer_down(PointerInput::at(100.0, 100.0));
    editor.pointer_move(PointerInput::at(120.0, 90.0));
    editor.pointer_move(PointerInput::at(140.0, 130.0));
    editor.pointer_up(PointerInput::at(140.0, 130.0));

    let object = editor.active_object_for_panels().unwrap();
    let CanvasObject::FreeDraw(free_draw) = object else {
        panic!("expected a free-draw object");
    };
    assert_eq!(free_draw.free_draw_points.len(), 3);
    let dims = object.dimensions();
    assert_eq!((dims.x, dims.y, dims.width, dims.height), (100.0, 90.0, 40.0, 40.0));
}

#[test]
fn test_click_selects_topmost_and_moves() {
    let mut editor = editor();
    editor.store_mut().append(sized(ObjectKind::Rectangle, 50.0, 50.0, 100.0, 50.0));
    let top = editor
        .store_mut()
        .append(sized(ObjectKind::Ellipse, 80.0, 60.0, 100.0, 50.0));

    editor.pointer_down(PointerInput::at(100.0, 80.0)); // overlap region
    assert_eq!(editor.action_mode(), ActionMode::Moving);
    assert_eq!(editor.selection().active_object_id(), Some(top.as_str()));

    editor.pointer_move(PointerInput::at(130.0, 100.0));
    editor.pointer_up(PointerInput::at(130.0, 100.0));

    let dims = editor.store().get(&top).unwrap().dimensions();
    assert_eq!((dims.x, dims.y), (110.0, 80.0));
    assert_eq!(editor.action_mode(), ActionMode::Idle);
}

#[test]
fn test_click_empty_clears_selection() {
    let mut editor = editor();
    editor.store_mut().append(sized(ObjectKind::Rectangle, 50.0, 50.0, 100.0, 50.0));
    select_at(&mut editor, 100.0, 75.0);
    assert!(editor.selection().active_object_id().is_some());

    select_at(&mut editor, 700.0, 500.0);
    assert!(editor.selection().active_object_id().is_none());
}

#[test]
fn test_resize_via_bottom_right_handle() {
    let mut editor = editor();
    let id = editor
        .store_mut()
        .append(sized(ObjectKind::Rectangle, 50.0, 50.0, 100.0, 50.0));
    select_at(&mut editor, 100.0, 75.0);

    editor.pointer_down(PointerInput::at(150.0, 100.0));
    assert!(matches!(editor.action_mode(), ActionMode::Resizing(_)));

    editor.pointer_move(PointerInput::at(170.0, 110.0));
    editor.pointer_up(PointerInput::at(170.0, 110.0));

    let dims = editor.store().get(&id).unwrap().dimensions();
    assert_eq!((dims.x, dims.y, dims.width, dims.height), (50.0, 50.0, 120.0, 60.0));
}

#[test]
fn test_rotate_never_mutates_the_store() {
    let mut editor = editor();
    let id = editor
        .store_mut()
        .append(sized(ObjectKind::Rectangle, 50.0, 50.0, 100.0, 50.0));
    select_at(&mut editor, 100.0, 75.0);
    let before = editor.store().get(&id).unwrap().clone();
    let revision = editor.store().revision();

    // Rotate handle floats above the top-center handle.
    editor.pointer_down(PointerInput::at(100.0, 26.0));
    assert_eq!(editor.action_mode(), ActionMode::Rotating);

    editor.pointer_move(PointerInput::at(150.0, 75.0)); // due right of center
    let angle = editor.rotation_angle().expect("live angle while rotating");
    assert!((angle - 90.0).abs() < 1e-9);

    editor.pointer_up(PointerInput::at(150.0, 75.0));
    assert_eq!(editor.rotation_angle(), None);
    assert_eq!(editor.store().revision(), revision);
    assert_eq!(editor.store().get(&id).unwrap(), &before);
}

#[test]
fn test_pan_modifier_scrolls_screen_space() {
    let mut editor = editor();
    editor.pointer_down(PointerInput::panning(400.0, 300.0));
    assert_eq!(editor.action_mode(), ActionMode::Panning);

    editor.pointer_move(PointerInput::panning(420.0, 310.0));
    editor.pointer_up(PointerInput::panning(420.0, 310.0));

    let scroll = editor.viewport().scroll_position();
    assert_eq!((scroll.x, scroll.y), (20.0, 10.0));
}

#[test]
fn test_drawing_respects_zoom_transform() {
    let mut editor = editor();
    editor.viewport_mut().set_zoom(200.0);
    editor.viewport_mut().set_scroll_position(0.0, 0.0);
    editor.set_user_mode(UserMode::Draw(ObjectKind::Rectangle));

    editor.pointer_down(PointerInput::at(100.0, 100.0));
    editor.pointer_move(PointerInput::at(200.0, 160.0));
    editor.pointer_up(PointerInput::at(200.0, 160.0));

    // Screen deltas are halved into design space at 200% zoom.
    let dims = editor.active_object_for_panels().unwrap().dimensions();
    assert_eq!((dims.x, dims.y, dims.width, dims.height), (50.0, 50.0, 50.0, 30.0));
}

#[test]
fn test_double_click_writes_text() {
    let mut editor = editor();
    let mut text = sized(ObjectKind::Text, 10.0, 10.0, 200.0, 50.0);
    if let CanvasObject::Text(t) = &mut text {
        t.text = "Hi".to_string();
    }
    editor.store_mut().append(text);

    editor.double_click(PointerInput::at(50.0, 30.0));
    assert_eq!(editor.action_mode(), ActionMode::Writing);

    editor.type_char('!');
    assert_eq!(editor.active_object_for_panels().unwrap().text(), Some("Hi!"));

    editor.backspace();
    editor.backspace();
    assert_eq!(editor.active_object_for_panels().unwrap().text(), Some("H"));

    editor.finish_writing();
    assert_eq!(editor.action_mode(), ActionMode::Idle);
}

#[test]
fn test_double_click_ignores_non_text() {
    let mut editor = editor();
    editor.store_mut().append(sized(ObjectKind::Rectangle, 10.0, 10.0, 200.0, 50.0));
    editor.double_click(PointerInput::at(50.0, 30.0));
    assert_eq!(editor.action_mode(), ActionMode::Idle);
}

#[test]
fn test_pointer_down_ends_writing() {
    let mut editor = editor();
    editor.store_mut().append(sized(ObjectKind::Attribute, 10.0, 10.0, 200.0, 50.0));
    editor.double_click(PointerInput::at(50.0, 30.0));
    assert_eq!(editor.action_mode(), ActionMode::Writing);

    select_at(&mut editor, 700.0, 500.0);
    assert_ne!(editor.action_mode(), ActionMode::Writing);
    editor.type_char('x'); // no target, must not panic or mutate
}

#[test]
fn test_delete_selected_clears_selection() {
    let mut editor = editor();
    editor.store_mut().append(sized(ObjectKind::Rectangle, 50.0, 50.0, 100.0, 50.0));
    select_at(&mut editor, 100.0, 75.0);

    assert!(editor.delete_selected());
    assert!(editor.store().is_empty());
    assert!(editor.selection().active_object_id().is_none());
    assert!(!editor.delete_selected());
}

#[test]
fn test_align_center_is_exact_and_idempotent() {
    let mut editor = editor();
    let id = editor
        .store_mut()
        .append(sized(ObjectKind::Rectangle, 0.0, 0.0, 100.0, 50.0));
    select_at(&mut editor, 50.0, 25.0);

    editor.align_selected_x(AnchorX::Center);
    assert_eq!(editor.store().get(&id).unwrap().common().x, 350.0);
    assert!(editor.is_anchor_x_active(AnchorX::Center));

    editor.align_selected_x(AnchorX::Center);
    assert_eq!(editor.store().get(&id).unwrap().common().x, 350.0);

    editor.align_selected_y(AnchorY::Bottom);
    assert_eq!(editor.store().get(&id).unwrap().common().y, 550.0);
    assert!(editor.is_anchor_y_active(AnchorY::Bottom));
}

#[test]
fn test_layer_command_routes_through_selection() {
    let mut editor = editor();
    let a = editor
        .store_mut()
        .append(sized(ObjectKind::Rectangle, 0.0, 0.0, 50.0, 50.0));
    editor
        .store_mut()
        .append(sized(ObjectKind::Ellipse, 200.0, 200.0, 50.0, 50.0));

    select_at(&mut editor, 25.0, 25.0);
    editor.set_selected_layer_index(5);
    assert_eq!(editor.store().index_of(&a), Some(1));
}
