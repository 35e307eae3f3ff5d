#![forbid(unsafe_code)]

//! Rendering surface contract.
//!
//! The view treats the host toolkit as an opaque surface: it pushes
//! interactivity and the visible scene rectangle, and asks for the
//! viewport size. Everything else (painting, input dispatch, widget
//! chrome) stays on the host side.

use gmorph_core::geometry::{Rect, Vec2};

/// Host-toolkit surface the view drives.
pub trait Surface {
    /// Enable or disable user interaction with the scene.
    ///
    /// Disabled for the whole duration of a transition so no input can
    /// mutate a generation mid-flight.
    fn set_interactive(&mut self, interactive: bool);

    /// Set the visible scene rectangle.
    fn set_scene_rect(&mut self, rect: Rect);

    /// Current viewport size.
    fn view_size(&self) -> Vec2;
}

/// Surface that records what the view pushed, with a fixed viewport.
///
/// The default backend for hosts without a canvas, and the probe used
/// by the crate's own tests.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurface {
    /// Last interactivity pushed by the view. Starts `true`.
    pub interactive: bool,
    /// Last scene rectangle pushed by the view.
    pub scene_rect: Rect,
    /// Reported viewport size.
    pub size: Vec2,
}

impl HeadlessSurface {
    /// Create a headless surface with the given viewport size.
    pub fn new(size: Vec2) -> Self {
        Self {
            interactive: true,
            scene_rect: Rect::default(),
            size,
        }
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(Vec2::new(1280.0, 720.0))
    }
}

impl Surface for HeadlessSurface {
    fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    fn set_scene_rect(&mut self, rect: Rect) {
        self.scene_rect = rect;
    }

    fn view_size(&self) -> Vec2 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadlessSurface, Surface};
    use gmorph_core::geometry::{Rect, Vec2};

    #[test]
    fn headless_records_pushes() {
        let mut surface = HeadlessSurface::default();
        assert!(surface.interactive);
        surface.set_interactive(false);
        surface.set_scene_rect(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert!(!surface.interactive);
        assert_eq!(surface.scene_rect, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(surface.view_size(), Vec2::new(1280.0, 720.0));
    }
}
