//! Rainyard Desktop Viewer
//!
//! Renders the rain scene into a desktop window with wgpu.
//!
//! - [`GpuRenderer`] - wgpu implementation of [`rainyard_runtime::Renderer`]
//! - [`windowed::WindowedApp`] - wires platform events to the render loop and
//!   the viewport synchronizer
//!
//! # Example
//!
//! ```ignore
//! use rainyard_app::windowed::WindowedApp;
//! use rainyard_runtime::RainyardConfig;
//!
//! fn main() -> rainyard_app::Result<()> {
//!     WindowedApp::run(RainyardConfig::default())
//! }
//! ```

mod error;
mod renderer;
mod shaders;

#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub mod windowed;

pub use error::{AppError, Result};
pub use renderer::GpuRenderer;
