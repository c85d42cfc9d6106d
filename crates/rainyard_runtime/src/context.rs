//! Shared frame context and collaborator traits

use crate::error::RenderError;
use rainyard_scene::{ParticleField, PerspectiveCamera, Scene};
use std::cell::RefCell;
use std::rc::Rc;

/// Draws frames and owns the output surface
///
/// Sizes are in logical pixels; the surface resolution is
/// `size * pixel_ratio`.
pub trait Renderer {
    /// Draw one frame of `scene` seen through `camera`, with the rain on top
    ///
    /// `rain.needs_update()` tells whether positions changed since the last
    /// successful render.
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        rain: &ParticleField,
    ) -> Result<(), RenderError>;

    /// Resize the output surface
    fn set_size(&mut self, width: u32, height: u32);

    /// Set the output scale (physical pixels per logical pixel)
    fn set_pixel_ratio(&mut self, ratio: f32);
}

/// Asks the display for the next frame callback
pub trait FrameRequester {
    fn request_frame(&self);
}

/// Camera and renderer shared by the render loop and the viewport synchronizer
pub struct FrameContext<R> {
    pub camera: PerspectiveCamera,
    pub renderer: R,
}

/// Single-threaded shared handle to a [`FrameContext`]
pub type SharedFrameContext<R> = Rc<RefCell<FrameContext<R>>>;

impl<R: Renderer> FrameContext<R> {
    pub fn new(camera: PerspectiveCamera, renderer: R) -> Self {
        Self { camera, renderer }
    }

    /// Wrap a new context in a shared handle
    pub fn shared(camera: PerspectiveCamera, renderer: R) -> SharedFrameContext<R> {
        Rc::new(RefCell::new(Self::new(camera, renderer)))
    }
}
