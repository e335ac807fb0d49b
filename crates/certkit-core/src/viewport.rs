//! Viewport and coordinate transformation for the editor surface.
//!
//! Handles conversion between screen coordinates (the surface the pointer
//! lives on) and design coordinates (the certificate's own pixel space).
//! Zoom is expressed as a percentage, matching the editor UI, and pan is a
//! screen-space scroll offset applied after scaling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Default zoom percentage.
pub const DEFAULT_ZOOM: f64 = 100.0;

/// Lowest accepted zoom percentage. Keeps the screen/design transform
/// invertible when hostile input asks for zoom 0.
pub const MIN_ZOOM: f64 = 1.0;

/// Largest accepted working size per axis, in design pixels.
pub const MAX_WORKING_AXIS: f64 = 5000.0;

/// Size of the certificate's design area, in design pixels. This is also the
/// pixel size of exported output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasWorkingSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasWorkingSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasWorkingSize {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Screen-space pan offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

/// Size of the on-screen drawing surface, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

impl WindowSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The editor camera: zoom percentage, scroll offset, and the two sizes the
/// centering math needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    scroll: ScrollPosition,
    working_size: CanvasWorkingSize,
    window_size: WindowSize,
}

impl Viewport {
    /// Creates a viewport at 100% zoom with the design centered in the
    /// window.
    pub fn new(working_size: CanvasWorkingSize, window_size: WindowSize) -> Self {
        let mut viewport = Self {
            zoom: DEFAULT_ZOOM,
            scroll: ScrollPosition::default(),
            working_size: clamp_working_size(working_size),
            window_size,
        };
        viewport.set_center();
        viewport
    }

    /// Current zoom percentage (100.0 = 1:1).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom percentage, floored at [`MIN_ZOOM`], and recenters the
    /// design. Non-finite input is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.max(MIN_ZOOM);
        self.set_center();
    }

    /// Zooms in by `step` percentage points.
    pub fn increment_zoom(&mut self, step: f64) {
        self.set_zoom(self.zoom + step);
    }

    /// Zooms out by `step` percentage points, stopping at [`MIN_ZOOM`].
    pub fn decrement_zoom(&mut self, step: f64) {
        self.set_zoom(self.zoom - step);
    }

    /// Scale factor applied to design coordinates (zoom / 100).
    pub fn scale(&self) -> f64 {
        self.zoom / 100.0
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    /// Sets the scroll offset directly. Non-finite input is ignored.
    pub fn set_scroll_position(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.scroll = ScrollPosition { x, y };
    }

    /// Pans by a screen-space delta. Pan deltas are not divided by zoom; one
    /// pointer pixel is one scroll pixel at any zoom level.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.set_scroll_position(self.scroll.x + dx, self.scroll.y + dy);
    }

    pub fn working_size(&self) -> CanvasWorkingSize {
        self.working_size
    }

    /// Sets the design area size, clamped to 0..=[`MAX_WORKING_AXIS`] per
    /// axis, and recenters. Non-finite axes are ignored.
    pub fn set_working_size(&mut self, size: CanvasWorkingSize) {
        if !size.width.is_finite() || !size.height.is_finite() {
            return;
        }
        self.working_size = clamp_working_size(size);
        self.set_center();
    }

    pub fn window_size(&self) -> WindowSize {
        self.window_size
    }

    /// Updates the on-screen surface size (window resize) and recenters.
    pub fn set_window_size(&mut self, size: WindowSize) {
        if !size.width.is_finite() || !size.height.is_finite() {
            return;
        }
        self.window_size = size;
        self.set_center();
    }

    /// Centers the scaled design inside the window.
    ///
    /// Called whenever zoom or either size changes so the design stays
    /// visually centered; an explicit pan afterwards moves it freely.
    pub fn set_center(&mut self) {
        let scale = self.scale();
        self.scroll = ScrollPosition {
            x: (self.window_size.width - self.working_size.width * scale) / 2.0,
            y: (self.window_size.height - self.working_size.height * scale) / 2.0,
        };
    }

    /// Converts a screen-space point to design space.
    ///
    /// Formula:
    /// ```text
    /// design_x = (screen_x - scroll_x) / (zoom / 100)
    /// design_y = (screen_y - scroll_y) / (zoom / 100)
    /// ```
    pub fn screen_to_design(&self, point: Point) -> Point {
        let scale = self.scale();
        Point::new(
            (point.x - self.scroll.x) / scale,
            (point.y - self.scroll.y) / scale,
        )
    }

    /// Converts a design-space point to screen space (inverse of
    /// [`screen_to_design`](Self::screen_to_design)).
    pub fn design_to_screen(&self, point: Point) -> Point {
        let scale = self.scale();
        Point::new(
            point.x * scale + self.scroll.x,
            point.y * scale + self.scroll.y,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(CanvasWorkingSize::default(), WindowSize::new(1280.0, 800.0))
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Scroll: ({:.1}, {:.1})",
            self.zoom, self.scroll.x, self.scroll.y
        )
    }
}

fn clamp_working_size(size: CanvasWorkingSize) -> CanvasWorkingSize {
    CanvasWorkingSize {
        width: size.width.clamp(0.0, MAX_WORKING_AXIS),
        height: size.height.clamp(0.0, MAX_WORKING_AXIS),
    }
}
