pub mod api;
pub mod core;
pub mod components;
pub mod error;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, DrawContext, LoopState};
pub use api::runner::GameRunner;
pub use api::types::SpriteId;
pub use components::anchor::Anchor;
pub use components::color::Color;
pub use components::pen::{PenLine, PenState};
pub use components::sprite::{Sprite, SpriteImage, AnchorMode};
pub use core::collision::{Aabb, distance};
pub use core::rng::Rng;
pub use core::scene::{Scene, SpriteMut};
pub use core::schedule::TimerQueue;
pub use core::time::{Clock, SystemClock, ManualClock, FpsCounter};
pub use error::{EngineError, ConfigWarning, LoadError, TransformError, HookError, HookResult};
pub use input::queue::{InputEvent, InputQueue};
pub use input::state::InputState;
pub use renderer::{Renderer, ImageLoader, ImageHandle, TextStyle, RecordingRenderer, DrawCommand};

// Extensions: animation helpers
pub use extensions::{
    Easing, lerp, ease,
    Transform, Property, PropertyValue,
};
