//! Error types for rainyard_runtime

use rainyard_scene::ParticleError;
use thiserror::Error;

/// Errors reported by a renderer
#[derive(Error, Debug)]
pub enum RenderError {
    /// The presentation surface could not provide a frame
    #[error("Surface error: {0}")]
    Surface(String),

    /// The GPU ran out of memory
    #[error("Out of GPU memory")]
    OutOfMemory,

    /// A buffer would exceed what the device can bind
    #[error("{size} byte buffer exceeds the device limit of {limit} bytes")]
    BufferTooLarge { size: u64, limit: u64 },

    /// Generic render failure
    #[error("{0}")]
    Other(String),
}

/// Errors that end the frame loop
#[derive(Error, Debug)]
pub enum FrameError {
    /// The particle simulation found a corrupted buffer
    #[error("Simulation failed: {0}")]
    Simulation(#[from] ParticleError),

    /// The renderer failed to draw the frame
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    /// The shared camera/renderer context was already borrowed
    #[error("Frame context is already in use")]
    ContextBusy,

    /// `start` was called on a loop that has already started
    #[error("Render loop already started")]
    AlreadyStarted,

    /// `tick` was called before `start`
    #[error("Render loop not started")]
    NotStarted,

    /// `tick` was called after a frame failed
    #[error("Render loop stopped after a failed frame")]
    Stopped,
}

/// Errors loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize the effective config
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for frame operations
pub type Result<T> = std::result::Result<T, FrameError>;
