//! Viewport synchronization
//!
//! Keeps the camera's aspect ratio and the renderer's surface in step with
//! the window. Every resize is applied immediately; there is no debouncing.

use crate::context::{Renderer, SharedFrameContext};
use crate::error::{FrameError, Result};

/// Upper bound on the applied pixel ratio
pub const DEFAULT_MAX_PIXEL_RATIO: f32 = 2.0;

/// Current output dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Width in logical pixels (at least 1)
    pub width: u32,
    /// Height in logical pixels (at least 1)
    pub height: u32,
    /// Applied pixel ratio, `min(device ratio, max)`
    pub pixel_ratio: f32,
}

impl ViewportState {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Applies display size changes to the shared camera and renderer
pub struct ViewportSynchronizer<R: Renderer> {
    context: SharedFrameContext<R>,
    state: ViewportState,
    max_pixel_ratio: f32,
}

impl<R: Renderer> ViewportSynchronizer<R> {
    /// Create a synchronizer and apply the initial display size
    pub fn new(
        context: SharedFrameContext<R>,
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
        max_pixel_ratio: f32,
    ) -> Result<Self> {
        let max_pixel_ratio = if max_pixel_ratio.is_finite() && max_pixel_ratio > 0.0 {
            max_pixel_ratio
        } else {
            DEFAULT_MAX_PIXEL_RATIO
        };
        let mut sync = Self {
            context,
            state: ViewportState {
                width: 1,
                height: 1,
                pixel_ratio: 1.0,
            },
            max_pixel_ratio,
        };
        sync.on_resize(width, height, device_pixel_ratio)?;
        Ok(sync)
    }

    /// Handle a display resize
    ///
    /// Zero dimensions are clamped to 1. Camera aspect, projection, surface
    /// size and pixel ratio are all updated under one borrow of the context.
    pub fn on_resize(&mut self, width: u32, height: u32, device_pixel_ratio: f64) -> Result<()> {
        let mut ctx = self
            .context
            .try_borrow_mut()
            .map_err(|_| FrameError::ContextBusy)?;

        self.state.width = width.max(1);
        self.state.height = height.max(1);
        self.state.pixel_ratio = self.clamp_pixel_ratio(device_pixel_ratio);

        let aspect = self.state.aspect();
        ctx.camera.set_aspect(aspect);
        ctx.camera.update_projection_matrix();
        ctx.renderer.set_size(self.state.width, self.state.height);
        ctx.renderer.set_pixel_ratio(self.state.pixel_ratio);

        tracing::debug!(
            "Viewport {}x{} @{} (aspect {:.3})",
            self.state.width,
            self.state.height,
            self.state.pixel_ratio,
            aspect
        );
        Ok(())
    }

    /// Handle a display density change without a size change
    pub fn on_scale_factor_changed(&mut self, device_pixel_ratio: f64) -> Result<()> {
        let ViewportState { width, height, .. } = self.state;
        self.on_resize(width, height, device_pixel_ratio)
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn max_pixel_ratio(&self) -> f32 {
        self.max_pixel_ratio
    }

    fn clamp_pixel_ratio(&self, device_pixel_ratio: f64) -> f32 {
        let ratio = device_pixel_ratio as f32;
        if ratio.is_finite() && ratio > 0.0 {
            ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        }
    }
}
