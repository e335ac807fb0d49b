//! # CertKit Core
//!
//! Headless core of the certificate designer: the canvas object model, the
//! ordered object store, selection, viewport transforms, the pointer-driven
//! interaction state machine, and template persistence with per-attendee
//! attribute binding.
//!
//! ## Core Components
//!
//! - **Objects**: the nine canvas element kinds (shapes, strokes, text,
//!   icons, images, attribute placeholders) as one tagged union
//! - **Store**: z-ordered object list with patch updates and change
//!   notification
//! - **Viewport**: zoom/scroll camera with screen <-> design conversion
//! - **Editor**: the interaction state machine tying it all together
//! - **Templates**: JSON persistence and attendee binding for generation
//!
//! Rendering lives in `certkit-render`; this crate has no drawing code and
//! can back any surface that can feed it pointer events.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use certkit_core::{CanvasWorkingSize, Editor, PointerInput, UserMode, WindowSize};
//!
//! let mut editor = Editor::new(
//!     CanvasWorkingSize::new(1920.0, 1080.0),
//!     WindowSize::new(1280.0, 800.0),
//! );
//! editor.set_user_mode(UserMode::Draw(certkit_core::ObjectKind::Rectangle));
//! editor.pointer_down(PointerInput::at(100.0, 100.0));
//! editor.pointer_move(PointerInput::at(300.0, 200.0));
//! editor.pointer_up(PointerInput::at(300.0, 200.0));
//! ```

pub mod action_mode;
pub mod geometry;
pub mod object_store;
pub mod objects;
pub mod selection;
pub mod template;
pub mod viewport;

pub use action_mode::{ActionMode, Editor, PointerInput, UserMode, MIN_DRAW_SIZE};
pub use geometry::{
    AnchorX, AnchorY, ObjectDimensions, Point, ResizeHandle, HANDLE_SIZE, MIN_OBJECT_SIZE,
    ROTATE_HANDLE_OFFSET,
};
pub use object_store::{CanvasObjectStore, SubscriptionId};
pub use objects::{
    ArrowObject, AttributeObject, CanvasObject, CanvasObjectPatch, EllipseObject, FontSpec,
    FontStyle, FontVariant, FontWeight, FreeDrawObject, IconObject, ImageObject, LineObject,
    ObjectCommon, ObjectKind, RectangleObject, TextAlignHorizontal, TextAlignVertical, TextObject,
};
pub use selection::Selection;
pub use template::{AttendeeRecord, CertificateTemplate};
pub use viewport::{CanvasWorkingSize, ScrollPosition, Viewport, WindowSize, DEFAULT_ZOOM, MIN_ZOOM};
