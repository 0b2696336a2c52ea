//! Drawing backend contract.
//!
//! The engine never touches pixels itself: every frame it issues a short list
//! of primitive calls (lines, rectangles, polygons, images, text) against a
//! `Renderer`. The web crate implements it on top of a 2D canvas; tests use
//! `RecordingRenderer`.

use glam::Vec2;
use crate::components::anchor::Anchor;
use crate::components::color::Color;
use crate::error::LoadError;

/// Opaque handle to an image owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// How a text label is drawn. `anchor` says which point of the text box sits
/// on the given coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: f32,
    pub font: String,
    pub anchor: Anchor,
}

impl TextStyle {
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            font: "Arial".to_string(),
            anchor: Anchor::Center,
        }
    }
}

/// Immediate-mode 2D drawing surface.
///
/// # Example Implementation
///
/// ```ignore
/// struct SvgRenderer { out: String }
///
/// impl Renderer for SvgRenderer {
///     fn backend(&self) -> &'static str { "svg" }
///     fn clear(&mut self) { self.out.clear(); }
///     fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: &Color, filled: bool) {
///         // <rect .../>
///     }
///     // ...
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g. "canvas2d", "recording").
    fn backend(&self) -> &'static str;

    /// Wipe the surface to the background color.
    fn clear(&mut self);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: &Color, width: f32);

    /// Axis-aligned rectangle with its top-left corner at `pos`.
    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: &Color, filled: bool);

    fn draw_oval(&mut self, center: Vec2, radii: Vec2, color: &Color, filled: bool);

    /// Filled closed polygon.
    fn draw_polygon(&mut self, points: &[Vec2], color: &Color);

    /// Image scaled into the box at `pos` with `size`.
    fn draw_image(&mut self, pos: Vec2, size: Vec2, image: ImageHandle);

    fn draw_text(&mut self, pos: Vec2, text: &str, style: &TextStyle);

    /// Update the window or page title.
    fn set_title(&mut self, _title: &str) {}

    /// Release backend resources once the game has stopped.
    fn release(&mut self) {}
}

/// Backends that can turn an image path into a drawable handle.
pub trait ImageLoader {
    /// Load `path`, scaled for display at `size`.
    fn load_image(&mut self, path: &str, size: Vec2) -> Result<ImageHandle, LoadError>;
}
