//! External engine contract.
//!
//! The runtime drives an opaque rendering engine through six commands. The
//! engine is generic over the surface type `S` supplied by the host so that
//! commands needing the graphics context receive it explicitly; everything
//! else about the engine is its own business.

mod error;

pub use error::{EngineCommand, EngineError};

use crate::assets::AssetManager;
use crate::surface::SurfaceConfig;

pub type EngineResult = Result<(), EngineError>;

/// Command surface consumed by the runtime.
///
/// All commands run on the rendering thread, strictly serially.
pub trait Engine<S>: Send + 'static {
    /// One-time setup for a surface generation. Called again after `destroy`.
    fn init(&mut self, surface: &mut S, assets: &AssetManager, config: &SurfaceConfig) -> EngineResult;

    /// Drawable size changed. Dimensions are always positive.
    fn resize(&mut self, width: u32, height: u32) -> EngineResult;

    /// Advances simulation state. Runs every frame, before `render`.
    fn update(&mut self) -> EngineResult;

    /// Draws the current frame into `surface`.
    fn render(&mut self, surface: &mut S) -> EngineResult;

    /// Applies a relative camera translation.
    fn move_camera(&mut self, dx: f32, dy: f32, dz: f32);

    /// Releases engine-owned resources while the context is still alive.
    ///
    /// A failure is reported, but the engine counts as torn down regardless.
    fn destroy(&mut self, surface: &mut S) -> EngineResult;
}
