/// Handle to a sprite slot in a `Scene`.
///
/// Ids are never reused within a scene, so a handle to a removed sprite
/// resolves to `None` instead of aliasing a newer sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u32);
