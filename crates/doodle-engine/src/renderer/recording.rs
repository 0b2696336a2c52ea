use std::collections::HashSet;
use glam::Vec2;
use crate::components::color::Color;
use crate::error::LoadError;
use super::traits::{ImageHandle, ImageLoader, Renderer, TextStyle};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Line { from: Vec2, to: Vec2, color: Color, width: f32 },
    Rect { pos: Vec2, size: Vec2, color: Color, filled: bool },
    Oval { center: Vec2, radii: Vec2, color: Color, filled: bool },
    Polygon { points: Vec<Vec2>, color: Color },
    Image { pos: Vec2, size: Vec2, image: ImageHandle },
    Text { pos: Vec2, text: String, style: TextStyle },
}

/// Headless backend that records the calls of the current frame.
///
/// `clear` starts a new frame, so `commands()` always holds the most recent
/// frame, beginning with `DrawCommand::Clear`.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    frames: u64,
    title: Option<String>,
    missing: HashSet<String>,
    loads: Vec<(String, Vec2)>,
    released: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loading `path` fail with `LoadError::NotFound`.
    pub fn with_missing_image(mut self, path: impl Into<String>) -> Self {
        self.missing.insert(path.into());
        self
    }

    /// Calls recorded since the last `clear`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Every image load request, in order.
    pub fn loads(&self) -> &[(String, Vec2)] {
        &self.loads
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Renderer for RecordingRenderer {
    fn backend(&self) -> &'static str {
        "recording"
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: &Color, width: f32) {
        self.commands.push(DrawCommand::Line { from, to, color: color.clone(), width });
    }

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: &Color, filled: bool) {
        self.commands.push(DrawCommand::Rect { pos, size, color: color.clone(), filled });
    }

    fn draw_oval(&mut self, center: Vec2, radii: Vec2, color: &Color, filled: bool) {
        self.commands.push(DrawCommand::Oval { center, radii, color: color.clone(), filled });
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: &Color) {
        self.commands.push(DrawCommand::Polygon { points: points.to_vec(), color: color.clone() });
    }

    fn draw_image(&mut self, pos: Vec2, size: Vec2, image: ImageHandle) {
        self.commands.push(DrawCommand::Image { pos, size, image });
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text { pos, text: text.to_string(), style: style.clone() });
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn release(&mut self) {
        self.released = true;
    }
}

impl ImageLoader for RecordingRenderer {
    fn load_image(&mut self, path: &str, size: Vec2) -> Result<ImageHandle, LoadError> {
        self.loads.push((path.to_string(), size));
        if self.missing.contains(path) {
            return Err(LoadError::NotFound(path.to_string()));
        }
        Ok(ImageHandle(self.loads.len() as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_starts_a_new_frame() {
        let mut r = RecordingRenderer::new();
        r.clear();
        r.draw_line(Vec2::ZERO, Vec2::ONE, &Color::BLACK, 1.0);
        r.clear();
        assert_eq!(r.frames(), 2);
        assert_eq!(r.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn missing_images_fail_to_load() {
        let mut r = RecordingRenderer::new().with_missing_image("gone.png");
        assert!(r.load_image("tank.png", Vec2::splat(40.0)).is_ok());
        assert_eq!(
            r.load_image("gone.png", Vec2::ONE),
            Err(LoadError::NotFound("gone.png".into()))
        );
        assert_eq!(r.loads().len(), 2);
    }
}
