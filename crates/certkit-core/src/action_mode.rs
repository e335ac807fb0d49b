//! The pointer-driven interaction state machine.
//!
//! [`Editor`] aggregates the store, selection and viewport and interprets
//! pointer events against them. At any moment exactly one [`ActionMode`] is
//! active; entering a new mode always goes through Idle first, so a stray
//! pointer-down can never leave two gestures running.

use tracing::debug;

use crate::geometry::{self, AnchorX, AnchorY, ObjectDimensions, Point, ResizeHandle};
use crate::object_store::CanvasObjectStore;
use crate::objects::{CanvasObject, CanvasObjectPatch, ObjectKind};
use crate::selection::Selection;
use crate::viewport::{CanvasWorkingSize, Viewport, WindowSize};

/// A draw gesture whose box stays under this size on both axes is discarded
/// on pointer-up, so an accidental click with a draw tool leaves no debris.
/// One axis over the threshold is enough to keep the object; deliberately
/// thin lines survive.
pub const MIN_DRAW_SIZE: f64 = 4.0;

/// The toolbar state: selecting/manipulating, or drawing one object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMode {
    Select,
    Draw(ObjectKind),
}

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMode {
    Idle,
    /// Dragging out a provisional object.
    Drawing,
    /// Dragging the canvas itself (screen-space scroll).
    Panning,
    /// Dragging the selected object's body.
    Moving,
    /// Dragging one of the eight resize handles.
    Resizing(ResizeHandle),
    /// Dragging the rotate handle. Display-only; see [`Editor::rotation_angle`].
    Rotating,
    /// Inline text editing after a double-click.
    Writing,
}

/// One pointer event's worth of input, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    pub position: Point,
    /// Pan modifier held (space key / middle button).
    pub pan_modifier: bool,
}

impl PointerInput {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            pan_modifier: false,
        }
    }

    pub fn panning(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            pan_modifier: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct GestureState {
    last_screen: Point,
    last_design: Point,
    draw_origin: Point,
    draft_id: Option<String>,
    rotation_angle: Option<f64>,
}

/// The certificate editor: object store, selection, viewport and the
/// interaction state machine over them.
#[derive(Debug)]
pub struct Editor {
    store: CanvasObjectStore,
    selection: Selection,
    viewport: Viewport,
    user_mode: UserMode,
    mode: ActionMode,
    gesture: GestureState,
}

impl Editor {
    pub fn new(working_size: CanvasWorkingSize, window_size: WindowSize) -> Self {
        Self {
            store: CanvasObjectStore::new(),
            selection: Selection::new(),
            viewport: Viewport::new(working_size, window_size),
            user_mode: UserMode::Select,
            mode: ActionMode::Idle,
            gesture: GestureState::default(),
        }
    }

    pub fn store(&self) -> &CanvasObjectStore {
        &self.store
    }

    /// Mutable store access for flows outside the pointer protocol (template
    /// loading, property panels, image decode completions).
    pub fn store_mut(&mut self) -> &mut CanvasObjectStore {
        &mut self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn user_mode(&self) -> UserMode {
        self.user_mode
    }

    /// Switches tools. Any in-flight gesture is ended first.
    pub fn set_user_mode(&mut self, mode: UserMode) {
        if self.mode != ActionMode::Idle {
            self.end_gesture();
        }
        self.user_mode = mode;
    }

    pub fn action_mode(&self) -> ActionMode {
        self.mode
    }

    /// The object the property panels should show.
    ///
    /// `None` while a draw gesture is in flight: the provisional object is
    /// live in the store (the renderer shows it growing) but must not surface
    /// in the panels until the gesture commits.
    pub fn active_object_for_panels(&self) -> Option<&CanvasObject> {
        if self.mode == ActionMode::Drawing {
            return None;
        }
        self.selection.resolve(&self.store)
    }

    /// Live angle of an in-flight rotate gesture, in degrees. The angle is
    /// never written to any object; it exists only for cursor feedback.
    pub fn rotation_angle(&self) -> Option<f64> {
        self.gesture.rotation_angle
    }

    /// Starts a gesture. Targets are checked in priority order: the selected
    /// object's rotate handle, then its resize handles, then object bodies
    /// (select mode), then a new draw gesture, then the pan modifier.
    pub fn pointer_down(&mut self, input: PointerInput) {
        if self.mode != ActionMode::Idle {
            self.end_gesture();
        }

        let screen = input.position;
        let design = self.viewport.screen_to_design(screen);
        self.gesture = GestureState {
            last_screen: screen,
            last_design: design,
            draw_origin: design,
            draft_id: None,
            rotation_angle: None,
        };

        if let Some(active) = self.selection.resolve(&self.store) {
            let bounds = self.screen_bounds(active.dimensions());
            if geometry::hit_rotate_handle(bounds, screen) {
                self.mode = ActionMode::Rotating;
                return;
            }
            if let Some(handle) = geometry::hit_resize_handle(bounds, screen) {
                self.mode = ActionMode::Resizing(handle);
                return;
            }
        }

        match self.user_mode {
            UserMode::Select => {
                let hit = self
                    .store
                    .list()
                    .iter()
                    .rev()
                    .find(|o| geometry::hit_test(o, design))
                    .map(|o| o.id().to_string());
                if let Some(id) = hit {
                    self.selection.set(id);
                    self.mode = ActionMode::Moving;
                } else if input.pan_modifier {
                    self.mode = ActionMode::Panning;
                } else {
                    self.selection.clear();
                }
            }
            UserMode::Draw(kind) => {
                let draft = CanvasObject::new_at(kind, design.x, design.y);
                let id = self.store.append(draft);
                debug!(%kind, %id, "draw gesture started");
                self.gesture.draft_id = Some(id);
                self.selection.clear();
                self.mode = ActionMode::Drawing;
            }
        }
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        let screen = input.position;
        let design = self.viewport.screen_to_design(screen);
        let screen_dx = screen.x - self.gesture.last_screen.x;
        let screen_dy = screen.y - self.gesture.last_screen.y;
        let dx = design.x - self.gesture.last_design.x;
        let dy = design.y - self.gesture.last_design.y;

        match self.mode {
            ActionMode::Idle | ActionMode::Writing => {}
            ActionMode::Panning => self.viewport.scroll_by(screen_dx, screen_dy),
            ActionMode::Moving => {
                let target = self
                    .selection
                    .resolve(&self.store)
                    .map(|o| (o.id().to_string(), o.dimensions()));
                if let Some((id, dims)) = target {
                    self.store
                        .update(&id, &CanvasObjectPatch::position(dims.x + dx, dims.y + dy));
                }
            }
            ActionMode::Resizing(handle) => {
                let target = self
                    .selection
                    .resolve(&self.store)
                    .map(|o| (o.id().to_string(), o.dimensions()));
                if let Some((id, dims)) = target {
                    let next = geometry::resize(dims, handle, dx, dy);
                    self.store.update(
                        &id,
                        &CanvasObjectPatch::bounds(next.x, next.y, next.width, next.height),
                    );
                }
            }
            ActionMode::Rotating => {
                if let Some(active) = self.selection.resolve(&self.store) {
                    self.gesture.rotation_angle =
                        Some(geometry::rotation_angle(active.dimensions().center(), design));
                }
            }
            ActionMode::Drawing => self.grow_draft(design),
        }

        self.gesture.last_screen = screen;
        self.gesture.last_design = design;
    }

    pub fn pointer_up(&mut self, _input: PointerInput) {
        match self.mode {
            ActionMode::Drawing => self.finish_drawing(),
            ActionMode::Panning
            | ActionMode::Moving
            | ActionMode::Resizing(_)
            | ActionMode::Rotating => {
                self.gesture.rotation_angle = None;
                self.mode = ActionMode::Idle;
            }
            // Writing survives pointer-up; it ends on blur/Escape or the
            // next pointer-down.
            ActionMode::Idle | ActionMode::Writing => {}
        }
    }

    /// Double-click on a text or attribute object opens inline editing.
    pub fn double_click(&mut self, input: PointerInput) {
        if self.mode != ActionMode::Idle {
            self.end_gesture();
        }
        let design = self.viewport.screen_to_design(input.position);
        let hit = self
            .store
            .list()
            .iter()
            .rev()
            .find(|o| o.is_editable_text() && geometry::hit_test(o, design))
            .map(|o| o.id().to_string());
        if let Some(id) = hit {
            self.selection.set(id);
            self.mode = ActionMode::Writing;
        }
    }

    /// Appends a character to the object being written. Each keystroke is a
    /// store update, so the canvas re-renders the text as it is typed.
    pub fn type_char(&mut self, ch: char) {
        if self.mode != ActionMode::Writing {
            return;
        }
        self.edit_text(|text| text.push(ch));
    }

    /// Removes the last character of the object being written.
    pub fn backspace(&mut self) {
        if self.mode != ActionMode::Writing {
            return;
        }
        self.edit_text(|text| {
            text.pop();
        });
    }

    /// Ends inline editing (blur or Escape). The text is already committed;
    /// keystrokes mutate the store as they happen.
    pub fn finish_writing(&mut self) {
        if self.mode == ActionMode::Writing {
            self.mode = ActionMode::Idle;
        }
    }

    /// Deletes the selected object and clears the selection. No-op when
    /// nothing is selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection.active_object_id().map(str::to_string) else {
            return false;
        };
        if self.mode != ActionMode::Idle {
            self.end_gesture();
        }
        let deleted = self.store.delete(&id);
        self.selection.clear();
        deleted
    }

    /// Snaps the selected object to a horizontal anchor of the working area.
    pub fn align_selected_x(&mut self, anchor: AnchorX) {
        let working = self.viewport.working_size();
        let target = self
            .selection
            .resolve(&self.store)
            .map(|o| (o.id().to_string(), o.dimensions()));
        if let Some((id, dims)) = target {
            let x = geometry::anchor_x(anchor, working.width, dims.width);
            self.store.update(
                &id,
                &CanvasObjectPatch {
                    x: Some(x),
                    ..CanvasObjectPatch::default()
                },
            );
        }
    }

    /// Snaps the selected object to a vertical anchor of the working area.
    pub fn align_selected_y(&mut self, anchor: AnchorY) {
        let working = self.viewport.working_size();
        let target = self
            .selection
            .resolve(&self.store)
            .map(|o| (o.id().to_string(), o.dimensions()));
        if let Some((id, dims)) = target {
            let y = geometry::anchor_y(anchor, working.height, dims.height);
            self.store.update(
                &id,
                &CanvasObjectPatch {
                    y: Some(y),
                    ..CanvasObjectPatch::default()
                },
            );
        }
    }

    /// Whether the selected object sits exactly on a horizontal anchor.
    pub fn is_anchor_x_active(&self, anchor: AnchorX) -> bool {
        let working = self.viewport.working_size();
        self.selection
            .resolve(&self.store)
            .map(|o| {
                let dims = o.dimensions();
                geometry::is_anchor_x_active(anchor, dims.x, working.width, dims.width)
            })
            .unwrap_or(false)
    }

    /// Whether the selected object sits exactly on a vertical anchor.
    pub fn is_anchor_y_active(&self, anchor: AnchorY) -> bool {
        let working = self.viewport.working_size();
        self.selection
            .resolve(&self.store)
            .map(|o| {
                let dims = o.dimensions();
                geometry::is_anchor_y_active(anchor, dims.y, working.height, dims.height)
            })
            .unwrap_or(false)
    }

    /// Moves the selected object to a new z-index.
    pub fn set_selected_layer_index(&mut self, index: usize) {
        if let Some(id) = self.selection.active_object_id().map(str::to_string) {
            self.store.set_layer_index(&id, index);
        }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let target = self
            .selection
            .resolve(&self.store)
            .and_then(|o| o.text().map(|t| (o.id().to_string(), t.to_string())));
        if let Some((id, mut text)) = target {
            edit(&mut text);
            self.store.update(
                &id,
                &CanvasObjectPatch {
                    text: Some(text),
                    ..CanvasObjectPatch::default()
                },
            );
        }
    }

    fn grow_draft(&mut self, design: Point) {
        let Some(id) = self.gesture.draft_id.clone() else {
            return;
        };
        let origin = self.gesture.draw_origin;
        let patch = match self.store.get(&id) {
            Some(CanvasObject::FreeDraw(free_draw)) => {
                let mut points = free_draw.free_draw_points.clone();
                points.push(design);
                let (min_x, max_x, min_y, max_y) = points.iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
                    |(min_x, max_x, min_y, max_y), p| {
                        (
                            min_x.min(p.x),
                            max_x.max(p.x),
                            min_y.min(p.y),
                            max_y.max(p.y),
                        )
                    },
                );
                CanvasObjectPatch {
                    free_draw_points: Some(points),
                    ..CanvasObjectPatch::bounds(min_x, min_y, max_x - min_x, max_y - min_y)
                }
            }
            Some(_) => {
                let x = origin.x.min(design.x);
                let y = origin.y.min(design.y);
                CanvasObjectPatch::bounds(
                    x,
                    y,
                    (design.x - origin.x).abs(),
                    (design.y - origin.y).abs(),
                )
            }
            None => return,
        };
        self.store.update(&id, &patch);
    }

    fn finish_drawing(&mut self) {
        self.mode = ActionMode::Idle;
        let Some(id) = self.gesture.draft_id.take() else {
            return;
        };
        let keep = self
            .store
            .get(&id)
            .map(|o| {
                let dims = o.dimensions();
                dims.width >= MIN_DRAW_SIZE || dims.height >= MIN_DRAW_SIZE
            })
            .unwrap_or(false);
        if keep {
            self.selection.set(id);
        } else {
            debug!(%id, "draw gesture below minimum size, discarding");
            self.store.delete(&id);
            self.selection.clear();
        }
        self.user_mode = UserMode::Select;
    }

    /// Returns the machine to Idle, committing or discarding whatever gesture
    /// was in flight.
    fn end_gesture(&mut self) {
        match self.mode {
            ActionMode::Drawing => self.finish_drawing(),
            _ => {
                self.gesture.rotation_angle = None;
                self.mode = ActionMode::Idle;
            }
        }
    }

    fn screen_bounds(&self, dims: ObjectDimensions) -> ObjectDimensions {
        let scale = self.viewport.scale();
        let origin = self.viewport.design_to_screen(Point::new(dims.x, dims.y));
        ObjectDimensions::new(origin.x, origin.y, dims.width * scale, dims.height * scale)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(CanvasWorkingSize::default(), WindowSize::new(1280.0, 800.0))
    }
}
