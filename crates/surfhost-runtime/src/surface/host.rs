use crate::assets::AssetManager;

use super::config::SurfaceConfig;
use super::error::SurfaceError;

/// A live rendering surface together with its graphics context.
///
/// Dropping the value releases both. Surfaces are never reused across a
/// suspend; a fresh one is created for every generation.
pub trait RenderSurface: Send + 'static {
    /// Configuration the surface was created with.
    fn config(&self) -> &SurfaceConfig;

    /// Current drawable size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Reconfigures the drawable for a new size.
    fn resize(&mut self, width: u32, height: u32);
}

/// Environment capability that creates surfaces.
///
/// A host is built on the control thread and then moved onto the rendering
/// thread, where all of its methods are called.
pub trait SurfaceHost: Send + 'static {
    type Surface: RenderSurface;

    /// Asset-access capability forwarded to the engine at init.
    fn assets(&self) -> AssetManager;

    /// Selects a configuration for `requested` and creates a surface with it.
    fn create_surface(&mut self, requested: &SurfaceConfig) -> Result<Self::Surface, SurfaceError>;
}
