// extensions/mod.rs
//
// Animation helpers layered on top of sprites: easing curves and property
// transforms. Sprites embed at most one transform; everything here is plain
// data plus math and can be used on its own.

pub mod easing;
pub mod transform;

pub use easing::{Easing, lerp, ease};
pub use transform::{Transform, Property, PropertyValue};
