//! Pen trails: line segments traced by a sprite's anchor point.

use glam::Vec2;
use crate::components::color::Color;

/// One traced segment. Never mutated after it is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct PenLine {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
    pub width: f32,
}

/// Per-sprite pen settings and the last traced point.
#[derive(Debug, Clone)]
pub struct PenState {
    pub active: bool,
    pub color: Color,
    pub width: f32,
    /// Anchor point at the end of the last trace.
    pub last: Vec2,
}

impl PenState {
    pub fn new(last: Vec2) -> Self {
        Self {
            active: false,
            color: Color::BLACK,
            width: 1.0,
            last,
        }
    }

    /// Trace from `from` to `to`. Returns a segment only when the point moved
    /// and the sprite is visible; the last point is refreshed either way.
    pub fn trace(&mut self, from: Vec2, to: Vec2, visible: bool) -> Option<PenLine> {
        if !self.active {
            return None;
        }
        self.last = to;
        (visible && from != to).then(|| PenLine {
            from,
            to,
            color: self.color.clone(),
            width: self.width,
        })
    }
}

/// Append-only store of every segment traced in a scene.
#[derive(Debug, Default)]
pub struct PenTrail {
    lines: Vec<PenLine>,
}

impl PenTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: PenLine) {
        self.lines.push(line);
    }

    /// Append a segment if one was produced.
    pub fn extend_one(&mut self, line: Option<PenLine>) {
        if let Some(line) = line {
            self.lines.push(line);
        }
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = PenLine>) {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[PenLine] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &PenLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
