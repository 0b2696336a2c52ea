//! Error taxonomy.
//!
//! Only `EngineError` ever stops the loop. The other kinds are recoverable:
//! the engine logs them and carries on with a safe default.

use thiserror::Error;

/// Error type user hooks may return. Anything implementing `std::error::Error`
/// converts into it with `?`.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Return type of `Game::start`, `Game::update` and `Game::draw`.
pub type HookResult = Result<(), HookError>;

/// Fatal errors surfaced by the game runner.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A user hook failed. The runner is stopped when this is returned.
    #[error("{hook} hook failed: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },

    /// Game configuration could not be parsed.
    #[error("invalid game config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Non-fatal configuration problems. Logged, never returned to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigWarning {
    #[error("unknown anchor '{0}', using center")]
    UnknownAnchor(String),

    #[error("unknown easing '{0}', using linear")]
    UnknownEasing(String),

    #[error("sprite has no animatable property '{0}'")]
    UnknownProperty(String),

    #[error("property '{property}' expects a {expected} value")]
    PropertyKindMismatch {
        property: &'static str,
        expected: &'static str,
    },

    #[error("cannot transform color towards {0}: target must be a hex code")]
    NonHexTargetColor(String),

    #[error("{field} must be positive, using {fallback}")]
    OutOfRange { field: &'static str, fallback: u32 },
}

impl ConfigWarning {
    /// Emit the warning through the `log` facade.
    pub fn log(&self) {
        log::warn!("{}", self);
    }
}

/// Image loading/decoding failure reported by an `ImageLoader`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("failed to decode '{path}': {details}")]
    Decode { path: String, details: String },

    #[error("renderer could not create image '{path}': {details}")]
    Backend { path: String, details: String },
}

/// A transform that had to be abandoned mid-flight.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("cannot transform color from {0}: start color must be a hex code")]
    NonHexStartColor(String),
}
