// extensions/transform.rs
//
// Property transforms: interpolate a sprite's properties towards target
// values over a duration with an easing curve.
//
// Usage:
//   let t = Transform::start(&sprite, now, 2.0, Easing::EaseInOut,
//       [(Property::Width, 100.0_f32.into()), (Property::Color, "#00ff00".into())]);
//   t.tick(&mut sprite, later);  // Writes interpolated values back

use crate::components::color::Color;
use crate::components::sprite::Sprite;
use crate::error::{ConfigWarning, TransformError};
use super::easing::{Easing, lerp};

/// Sprite properties a transform may animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    Width,
    Height,
    /// Facing direction in degrees.
    Direction,
    Speed,
    /// Visual rotation in degrees. Animating it turns on rotated drawing.
    Rotation,
    Color,
}

impl Property {
    pub const ALL: [Property; 8] = [
        Self::X, Self::Y, Self::Width, Self::Height,
        Self::Direction, Self::Speed, Self::Rotation, Self::Color,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::X => "x",
            Property::Y => "y",
            Property::Width => "width",
            Property::Height => "height",
            Property::Direction => "direction",
            Property::Speed => "speed",
            Property::Rotation => "rotation",
            Property::Color => "color",
        }
    }

    /// Look up a property by name. `rotate` is accepted for `rotation`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name == "rotate" {
            return Some(Property::Rotation);
        }
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    fn expects_color(self) -> bool {
        self == Property::Color
    }
}

/// A snapshot or target value for a property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f32),
    Color(Color),
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        PropertyValue::Number(v)
    }
}

impl From<Color> for PropertyValue {
    fn from(c: Color) -> Self {
        PropertyValue::Color(c)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Color(Color::parse(s))
    }
}

#[derive(Debug, Clone)]
struct Track {
    property: Property,
    from: PropertyValue,
    to: PropertyValue,
}

/// An in-flight interpolation of one or more sprite properties.
#[derive(Debug, Clone)]
pub struct Transform {
    tracks: Vec<Track>,
    /// Start timestamp in seconds.
    start: f64,
    /// Duration in seconds.
    duration: f32,
    easing: Easing,
    active: bool,
}

impl Transform {
    /// Snapshot the current values of `targets` from `sprite` and start
    /// interpolating towards them at `now`.
    ///
    /// Targets whose value has the wrong kind, or colors that are not hex
    /// codes, are skipped with a warning; the remaining targets still run.
    pub fn start<I>(sprite: &Sprite, now: f64, duration: f32, easing: Easing, targets: I) -> Self
    where
        I: IntoIterator<Item = (Property, PropertyValue)>,
    {
        let mut tracks: Vec<Track> = Vec::new();
        for (property, to) in targets {
            if let Err(warning) = Self::check_target(property, &to) {
                warning.log();
                continue;
            }
            let track = Track { property, from: sprite.property(property), to };
            // A repeated property keeps the last target.
            match tracks.iter_mut().find(|t| t.property == property) {
                Some(existing) => *existing = track,
                None => tracks.push(track),
            }
        }

        Self {
            tracks,
            start: now,
            duration,
            easing,
            active: true,
        }
    }

    /// Same as `start`, with the easing and properties given by name.
    /// Unknown names are reported and skipped individually.
    pub fn start_named<'a, I>(
        sprite: &Sprite,
        now: f64,
        duration: f32,
        easing: &str,
        targets: I,
    ) -> Self
    where
        I: IntoIterator<Item = (&'a str, PropertyValue)>,
    {
        let easing = Easing::from_name_or_linear(easing);
        let typed = targets.into_iter().filter_map(|(name, value)| {
            match Property::from_name(name) {
                Some(property) => Some((property, value)),
                None => {
                    ConfigWarning::UnknownProperty(name.to_string()).log();
                    None
                }
            }
        });
        Self::start(sprite, now, duration, easing, typed.collect::<Vec<_>>())
    }

    fn check_target(property: Property, value: &PropertyValue) -> Result<(), ConfigWarning> {
        match (property.expects_color(), value) {
            (true, PropertyValue::Color(c)) if c.rgb().is_none() => {
                Err(ConfigWarning::NonHexTargetColor(c.to_string()))
            }
            (true, PropertyValue::Color(_)) | (false, PropertyValue::Number(_)) => Ok(()),
            (true, PropertyValue::Number(_)) => Err(ConfigWarning::PropertyKindMismatch {
                property: property.name(),
                expected: "color",
            }),
            (false, PropertyValue::Color(_)) => Err(ConfigWarning::PropertyKindMismatch {
                property: property.name(),
                expected: "numeric",
            }),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Properties being animated, in the order they were requested.
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.tracks.iter().map(|t| t.property)
    }

    /// Normalized progress [0, 1] at `now`. Non-positive durations are
    /// complete immediately.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            ((now - self.start) as f32 / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Write interpolated values for `now` into `sprite`.
    /// Returns whether the transform is still running afterwards; once it has
    /// finished (or aborted) further ticks do nothing.
    pub fn tick(&mut self, sprite: &mut Sprite, now: f64) -> bool {
        if !self.active {
            return false;
        }

        if let Err(err) = self.check_color_start() {
            log::warn!("{}", err);
            self.active = false;
            return false;
        }

        let progress = self.progress(now);
        if progress >= 1.0 {
            // Land exactly on the targets rather than on a lerp at t = 1.
            for track in &self.tracks {
                sprite.set_property(track.property, &track.to);
            }
            self.active = false;
            return false;
        }

        let eased = self.easing.apply(progress);
        for track in &self.tracks {
            match (&track.from, &track.to) {
                (PropertyValue::Number(a), PropertyValue::Number(b)) => {
                    sprite.set_property(track.property, &PropertyValue::Number(lerp(*a, *b, eased)));
                }
                (PropertyValue::Color(a), PropertyValue::Color(b)) => {
                    if let (Some(from), Some(to)) = (a.rgb(), b.rgb()) {
                        let mixed = Color::lerp_rgb(from, to, eased);
                        sprite.set_property(track.property, &PropertyValue::Color(mixed));
                    }
                }
                _ => {}
            }
        }
        true
    }

    fn check_color_start(&self) -> Result<(), TransformError> {
        for track in &self.tracks {
            if let PropertyValue::Color(c) = &track.from {
                if c.rgb().is_none() {
                    return Err(TransformError::NonHexStartColor(c.to_string()));
                }
            }
        }
        Ok(())
    }
}
