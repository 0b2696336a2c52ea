use std::collections::HashSet;
use glam::Vec2;
use super::queue::InputEvent;

/// Snapshot of held keys and the pointer, folded from input events.
///
/// Key names are compared case-insensitively, so "A" and "a" are the same
/// key.
#[derive(Debug, Default)]
pub struct InputState {
    keys: HashSet<String>,
    pointer: Vec2,
    pointer_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key } => {
                self.keys.insert(key.to_lowercase());
            }
            InputEvent::KeyUp { key } => {
                self.keys.remove(&key.to_lowercase());
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer = Vec2::new(*x, *y);
            }
            InputEvent::PointerDown { x, y } => {
                self.pointer = Vec2::new(*x, *y);
                self.pointer_pressed = true;
            }
            InputEvent::PointerUp { x, y } => {
                self.pointer = Vec2::new(*x, *y);
                self.pointer_pressed = false;
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys.contains(&key.to_lowercase())
    }

    /// Last known pointer position in canvas coordinates.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn pointer_pressed(&self) -> bool {
        self.pointer_pressed
    }
}
