// extensions/easing.rs
//
// Pure easing functions for transform interpolation.
// No dependencies on Sprite/Scene, just math.

use std::f32::consts::PI;
use serde::Deserialize;
use crate::error::ConfigWarning;

/// Easing curve applied to transform progress.
///
/// Every curve maps [0, 1] into [0, 1] with `apply(0) == 0` and `apply(1) == 1`;
/// none of them overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start (quadratic).
    EaseIn,
    /// Slow end (quadratic).
    EaseOut,
    /// Slow start and end (quadratic).
    EaseInOut,
    /// Stronger slow start.
    CubicIn,
    /// Stronger slow end.
    CubicOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Sine wave easing (smooth).
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    pub const ALL: [Easing; 10] = [
        Self::Linear, Self::EaseIn, Self::EaseOut, Self::EaseInOut,
        Self::CubicIn, Self::CubicOut, Self::CubicInOut,
        Self::SineIn, Self::SineOut, Self::SineInOut,
    ];

    /// Apply the easing function to a normalized progress value `t`.
    /// Input outside [0, 1] is clamped first.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            // Quadratic
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            // Cubic
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            // Sine. Endpoints are pinned so float error in cos/sin cannot leak
            // past the [0, 1] range.
            Easing::SineIn if t >= 1.0 => 1.0,
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut if t >= 1.0 => 1.0,
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut if t >= 1.0 => 1.0,
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// The snake_case name accepted by `from_name`.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease_in",
            Easing::EaseOut => "ease_out",
            Easing::EaseInOut => "ease_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
            Easing::SineIn => "sine_in",
            Easing::SineOut => "sine_out",
            Easing::SineInOut => "sine_in_out",
        }
    }

    /// Look up an easing by name. Case-insensitive; `-` and spaces are
    /// accepted in place of `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        Self::ALL.into_iter().find(|e| e.name() == normalized)
    }

    /// Like `from_name`, but unknown names degrade to `Linear` with a warning.
    pub fn from_name_or_linear(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            ConfigWarning::UnknownEasing(name.to_string()).log();
            Easing::Linear
        })
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for easing in Easing::ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn stays_within_unit_range() {
        for easing in Easing::ALL {
            for i in 0..=100 {
                let e = easing.apply(i as f32 / 100.0);
                assert!((0.0..=1.0).contains(&e), "{:?} produced {}", easing, e);
            }
        }
    }

    #[test]
    fn quadratic_curves_match_formulas() {
        assert!((Easing::EaseIn.apply(0.5) - 0.25).abs() < 1e-6);
        assert!((Easing::EaseOut.apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Easing::EaseInOut.apply(0.25) - 0.125).abs() < 1e-6);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::EaseInOut.apply(0.75) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::EaseIn.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseIn.apply(2.0), 1.0);
    }

    #[test]
    fn names_round_trip() {
        for easing in Easing::ALL {
            assert_eq!(Easing::from_name(easing.name()), Some(easing));
        }
        assert_eq!(Easing::from_name("Ease-In-Out"), Some(Easing::EaseInOut));
    }

    #[test]
    fn unknown_name_falls_back_to_linear() {
        assert_eq!(Easing::from_name("bouncy"), None);
        assert_eq!(Easing::from_name_or_linear("bouncy"), Easing::Linear);
    }

    #[test]
    fn deserializes_from_snake_case() {
        let e: Easing = serde_json::from_str("\"ease_out\"").unwrap();
        assert_eq!(e, Easing::EaseOut);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
