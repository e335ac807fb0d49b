//! Pure geometry for the canvas editor.
//!
//! Hit-testing, resize-handle math, rotation angles and the alignment anchors.
//! Everything here operates on design-space coordinates unless a function says
//! otherwise; screen-space helpers take pre-transformed bounds.

use serde::{Deserialize, Serialize};

use crate::objects::CanvasObject;

/// Minimum width/height an object can be resized to, in design pixels.
/// Prevents a resize drag from inverting the box through its anchor.
pub const MIN_OBJECT_SIZE: f64 = 1.0;

/// Side length of a selection resize handle, in screen pixels.
pub const HANDLE_SIZE: f64 = 12.0;

/// Distance from the top-center handle to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET: f64 = 24.0;

/// A 2D point. Serialized with `x`/`y` keys (free-draw point lists reuse it).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position and size of an object's axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObjectDimensions {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ObjectDimensions {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Tests whether a design-space point hits an object.
///
/// All object kinds use their axis-aligned bounding box, including lines and
/// free-draw strokes. A degenerate box (zero width or height) still hits on
/// its edge so freshly drawn thin objects stay selectable.
pub fn hit_test(object: &CanvasObject, point: Point) -> bool {
    object.dimensions().contains(point)
}

/// The eight resize handles around a selected object's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ResizeHandle {
    /// All handles, in paint order (top row, middle row, bottom row).
    pub fn all() -> [ResizeHandle; 8] {
        [
            ResizeHandle::TopLeft,
            ResizeHandle::TopCenter,
            ResizeHandle::TopRight,
            ResizeHandle::MiddleLeft,
            ResizeHandle::MiddleRight,
            ResizeHandle::BottomLeft,
            ResizeHandle::BottomCenter,
            ResizeHandle::BottomRight,
        ]
    }

    fn moves_left_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::MiddleLeft | ResizeHandle::BottomLeft
        )
    }

    fn moves_right_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopRight | ResizeHandle::MiddleRight | ResizeHandle::BottomRight
        )
    }

    fn moves_top_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::TopCenter | ResizeHandle::TopRight
        )
    }

    fn moves_bottom_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft | ResizeHandle::BottomCenter | ResizeHandle::BottomRight
        )
    }
}

/// Applies a resize drag to a bounding box.
///
/// `dx`/`dy` are the pointer delta in design space. The edge (or corner) under
/// the handle follows the pointer; the opposite edge stays fixed. Width and
/// height are clamped to [`MIN_OBJECT_SIZE`] against the fixed edge, so the
/// box can never invert.
pub fn resize(dims: ObjectDimensions, handle: ResizeHandle, dx: f64, dy: f64) -> ObjectDimensions {
    let right = dims.x + dims.width;
    let bottom = dims.y + dims.height;

    let mut out = dims;

    if handle.moves_left_edge() {
        out.width = (dims.width - dx).max(MIN_OBJECT_SIZE);
        out.x = right - out.width;
    } else if handle.moves_right_edge() {
        out.width = (dims.width + dx).max(MIN_OBJECT_SIZE);
    }

    if handle.moves_top_edge() {
        out.height = (dims.height - dy).max(MIN_OBJECT_SIZE);
        out.y = bottom - out.height;
    } else if handle.moves_bottom_edge() {
        out.height = (dims.height + dy).max(MIN_OBJECT_SIZE);
    }

    out
}

/// Angle in degrees from a box center to the pointer.
///
/// Measured clockwise from straight up, so a pointer resting on the rotate
/// handle (above the top edge) reads 0. Display-only; nothing in the object
/// schema stores an angle.
pub fn rotation_angle(center: Point, pointer: Point) -> f64 {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    (dx.atan2(-dy)).to_degrees()
}

/// Horizontal alignment anchors against the working area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorX {
    Left,
    Center,
    Right,
}

/// Vertical alignment anchors against the working area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Top,
    Middle,
    Bottom,
}

/// X coordinate that places an object of `object_width` at the anchor inside
/// a working area of `working_width`.
pub fn anchor_x(anchor: AnchorX, working_width: f64, object_width: f64) -> f64 {
    match anchor {
        AnchorX::Left => 0.0,
        AnchorX::Center => (working_width - object_width) / 2.0,
        AnchorX::Right => working_width - object_width,
    }
}

/// Y coordinate that places an object of `object_height` at the anchor.
pub fn anchor_y(anchor: AnchorY, working_height: f64, object_height: f64) -> f64 {
    match anchor {
        AnchorY::Top => 0.0,
        AnchorY::Middle => (working_height - object_height) / 2.0,
        AnchorY::Bottom => working_height - object_height,
    }
}

/// Whether an object already sits exactly on a horizontal anchor.
///
/// Exact equality is intentional: alignment writes the same expression this
/// compares against, so a just-aligned object always reads as active.
pub fn is_anchor_x_active(
    anchor: AnchorX,
    object_x: f64,
    working_width: f64,
    object_width: f64,
) -> bool {
    object_x == anchor_x(anchor, working_width, object_width)
}

/// Whether an object already sits exactly on a vertical anchor.
pub fn is_anchor_y_active(
    anchor: AnchorY,
    object_y: f64,
    working_height: f64,
    object_height: f64,
) -> bool {
    object_y == anchor_y(anchor, working_height, object_height)
}

/// Screen-space center of each resize handle for a selection frame.
///
/// `bounds` is the selected object's box already transformed to screen space.
/// The renderer paints handles at these points and the editor hit-tests
/// against them, so the two can never disagree.
pub fn handle_positions(bounds: ObjectDimensions) -> [(ResizeHandle, Point); 8] {
    let left = bounds.x;
    let right = bounds.x + bounds.width;
    let top = bounds.y;
    let bottom = bounds.y + bounds.height;
    let cx = bounds.x + bounds.width / 2.0;
    let cy = bounds.y + bounds.height / 2.0;

    [
        (ResizeHandle::TopLeft, Point::new(left, top)),
        (ResizeHandle::TopCenter, Point::new(cx, top)),
        (ResizeHandle::TopRight, Point::new(right, top)),
        (ResizeHandle::MiddleLeft, Point::new(left, cy)),
        (ResizeHandle::MiddleRight, Point::new(right, cy)),
        (ResizeHandle::BottomLeft, Point::new(left, bottom)),
        (ResizeHandle::BottomCenter, Point::new(cx, bottom)),
        (ResizeHandle::BottomRight, Point::new(right, bottom)),
    ]
}

/// Screen-space center of the rotate handle, above the top edge.
pub fn rotate_handle_position(bounds: ObjectDimensions) -> Point {
    Point::new(bounds.x + bounds.width / 2.0, bounds.y - ROTATE_HANDLE_OFFSET)
}

/// Finds the resize handle under a screen-space point, if any.
pub fn hit_resize_handle(bounds: ObjectDimensions, point: Point) -> Option<ResizeHandle> {
    let half = HANDLE_SIZE / 2.0;
    handle_positions(bounds)
        .into_iter()
        .find(|(_, center)| (point.x - center.x).abs() <= half && (point.y - center.y).abs() <= half)
        .map(|(handle, _)| handle)
}

/// Whether a screen-space point hits the rotate handle.
pub fn hit_rotate_handle(bounds: ObjectDimensions, point: Point) -> bool {
    let center = rotate_handle_position(bounds);
    let half = HANDLE_SIZE / 2.0;
    (point.x - center.x).abs() <= half && (point.y - center.y).abs() <= half
}
