pub mod anchor;
pub mod color;
pub mod pen;
pub mod sprite;
