pub mod recording;
pub mod traits;

// Re-export key types for convenient access
pub use recording::{DrawCommand, RecordingRenderer};
pub use traits::{ImageHandle, ImageLoader, Renderer, TextStyle};
