//! Error types shared by actors and the runtime.

/// Alias for `Result<T, StageError>`.
pub type StageResult<T> = Result<T, StageError>;

/// Errors raised by actor commands and runtime setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    /// The command needs a tick source but the actor was never connected
    /// (or has been disconnected).
    #[error("actor {0} is not connected to a render loop")]
    NotConnected(crate::actor::ActorId),

    /// A visual effect key that no effect answers to.
    #[error("invalid effect name: \"{0}\"")]
    InvalidEffectName(String),

    /// A rotation style key that no style answers to.
    #[error("invalid rotation style: \"{0}\"")]
    InvalidRotationStyle(String),

    /// No costume with the given name exists on the sprite.
    #[error("unknown costume: \"{0}\"")]
    UnknownCostume(String),

    /// The tick rate must be at least one frame per second.
    #[error("invalid tick rate: {0} fps")]
    InvalidTickRate(u32),

    /// Stage half extents must not be negative.
    #[error("invalid bounds: half extents {half_width}x{half_height}")]
    InvalidBounds {
        /// Requested half width.
        half_width: i32,
        /// Requested half height.
        half_height: i32,
    },

    /// A key name that no key answers to.
    #[error("invalid key name: \"{0}\"")]
    InvalidKey(String),

    /// The async runtime scripts run on could not be started.
    #[error("failed to start async runtime: {0}")]
    AsyncRuntime(String),
}
