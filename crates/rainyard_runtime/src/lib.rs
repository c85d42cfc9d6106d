//! Rainyard Runtime
//!
//! The per-frame core of the Rainyard viewer:
//!
//! - [`RenderLoop`] - self-rescheduling frame driver (simulate, control, render)
//! - [`ViewportSynchronizer`] - keeps camera aspect and renderer size in step with the window
//! - [`FrameClock`] - monotonic elapsed time
//! - [`RainyardConfig`] - TOML configuration
//!
//! Both the loop and the synchronizer hold the same [`SharedFrameContext`]
//! (camera + renderer). It is an `Rc<RefCell<_>>`, so everything here runs
//! on the one thread that owns the event loop.
//!
//! # Example
//!
//! ```ignore
//! use rainyard_runtime::prelude::*;
//!
//! let context = FrameContext::shared(camera, renderer);
//! let mut viewport = ViewportSynchronizer::new(context.clone(), 1280, 720, 2.0, 2.0)?;
//! let mut render_loop = RenderLoop::new(context, scene, rain, settings, rng, controls);
//!
//! render_loop.start(&window_frames)?;          // first frame
//! // on Event::Frame:     render_loop.tick(&window_frames)?
//! // on resize:           viewport.on_resize(w, h, dpr)?
//! ```

mod clock;
mod config;
mod context;
mod error;
mod frame_loop;
mod viewport;

#[cfg(test)]
mod tests;

pub use clock::FrameClock;
pub use config::{
    CameraConfig, ControlsConfig, RainConfig, RainyardConfig, SceneConfig, ViewportConfig,
    WindowSection, DEFAULT_CONFIG_FILE,
};
pub use context::{FrameContext, FrameRequester, Renderer, SharedFrameContext};
pub use error::{ConfigError, FrameError, RenderError, Result};
pub use frame_loop::{FrameStats, LoopState, RenderLoop};
pub use viewport::{ViewportState, ViewportSynchronizer, DEFAULT_MAX_PIXEL_RATIO};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::clock::FrameClock;
    pub use crate::config::RainyardConfig;
    pub use crate::context::{FrameContext, FrameRequester, Renderer, SharedFrameContext};
    pub use crate::error::{ConfigError, FrameError, RenderError, Result};
    pub use crate::frame_loop::{FrameStats, LoopState, RenderLoop};
    pub use crate::viewport::{ViewportState, ViewportSynchronizer, DEFAULT_MAX_PIXEL_RATIO};

    pub use rainyard_scene::prelude::*;
}
