//! Error types for rainyard_app

use rainyard_runtime::{ConfigError, FrameError};
use rainyard_scene::ParticleError;
use thiserror::Error;

/// Errors that can occur in the Rainyard viewer
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to initialize the GPU
    #[error("GPU initialization failed: {0}")]
    GpuInit(String),

    /// Platform error (windowing, event loop)
    #[error("Platform error: {0}")]
    Platform(String),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The rain field could not be built
    #[error("Failed to create rain: {0}")]
    Rain(#[from] ParticleError),

    /// The render loop stopped on a failed frame
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Result type for rainyard_app operations
pub type Result<T> = std::result::Result<T, AppError>;
