use glam::Vec2;
use serde::Deserialize;
use crate::error::ConfigWarning;

/// One of the nine reference points of a box.
///
/// Sprites use it as pivot and pen point; text drawing uses the same
/// vocabulary to position a label relative to its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    Center,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Self::Center, Self::Left, Self::Right, Self::Top, Self::Bottom,
        Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight,
    ];

    /// Offset of this point from the top-left corner of a box of `size`.
    pub fn offset(self, size: Vec2) -> Vec2 {
        let (fx, fy) = self.fractions();
        Vec2::new(size.x * fx, size.y * fy)
    }

    /// Horizontal and vertical position as fractions of the box size.
    pub fn fractions(self) -> (f32, f32) {
        match self {
            Anchor::Center => (0.5, 0.5),
            Anchor::Left => (0.0, 0.5),
            Anchor::Right => (1.0, 0.5),
            Anchor::Top => (0.5, 0.0),
            Anchor::Bottom => (0.5, 1.0),
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::TopRight => (1.0, 0.0),
            Anchor::BottomLeft => (0.0, 1.0),
            Anchor::BottomRight => (1.0, 1.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
        }
    }

    /// Parse a preset name. Case-insensitive; "top left", "top-left",
    /// "top_left" and "topleft" are all accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let squashed: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|a| a.name().replace('-', "") == squashed)
    }

    /// Like `from_name`, but unknown names degrade to `Center` with a warning.
    pub fn from_name_or_center(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            ConfigWarning::UnknownAnchor(name.to_string()).log();
            Anchor::Center
        })
    }
}
