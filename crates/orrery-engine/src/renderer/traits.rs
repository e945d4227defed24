//! Seams between the headless engine and the platform that shows it.
//!
//! The engine never touches a window, canvas, or event loop directly. A
//! [`RenderHost`] owns those; the lifecycle manager drives it.

use glam::Vec2;

use super::sdf_instance::SDFInstance;
use crate::api::error::OrreryError;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorVertex;

/// Screen-space marker for the selected body.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionMarker {
    pub name: String,
    pub center: Vec2,
    /// Ring radius in pixels.
    pub radius: f32,
}

/// Everything a presenter needs to draw one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameData {
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// Star and planets, sorted back to front.
    pub spheres: Vec<SDFInstance>,
    /// Orbit guides and selection ring as a triangle list.
    #[cfg(feature = "vectors")]
    pub vector_vertices: Vec<VectorVertex>,
    pub selection: Option<SelectionMarker>,
    /// Animation ticks applied so far.
    pub tick: u64,
}

/// Opaque id of a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Platform services the lifecycle manager needs.
///
/// Callbacks registered through `attach_listeners` and `request_frame` must
/// pass the generation they were created with back into the manager, which
/// ignores callbacks from an older generation.
pub trait RenderHost {
    /// Owned drawing target (a canvas, a swap chain).
    type Surface;

    /// Backend identifier for logs (e.g. "canvas2d").
    fn backend(&self) -> &'static str;

    /// Size of the mount container in pixels, or `None` if it is not in the
    /// document yet.
    fn container_size(&self) -> Option<Vec2>;

    fn create_surface(&mut self, size: Vec2) -> Result<Self::Surface, OrreryError>;

    fn resize_surface(&mut self, surface: &mut Self::Surface, size: Vec2);

    fn present(&mut self, surface: &mut Self::Surface, frame: &FrameData);

    /// Detach and free the surface.
    fn release_surface(&mut self, surface: Self::Surface);

    /// Hook up resize and pointer listeners.
    fn attach_listeners(&mut self, generation: u64);

    fn detach_listeners(&mut self);

    /// Schedule one frame callback.
    fn request_frame(&mut self, generation: u64) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);
}
