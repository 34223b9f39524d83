use std::marker::PhantomData;

use crate::assets::AssetManager;
use crate::engine::{Engine, EngineResult};
use crate::gesture::CameraDelta;
use crate::surface::RenderSurface;

/// Issues engine commands in frame order.
///
/// Lives on the rendering thread. Tracks whether the engine holds state for
/// the current surface so `destroy` is issued exactly once per `init`.
pub struct FrameDriver<S, E> {
    engine: E,
    initialized: bool,
    size: Option<(u32, u32)>,
    failures: u64,
    _surface: PhantomData<fn() -> S>,
}

impl<S, E> FrameDriver<S, E>
where
    S: RenderSurface,
    E: Engine<S>,
{
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            initialized: false,
            size: None,
            failures: 0,
            _surface: PhantomData,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Whether `init` has been issued without a matching `destroy`.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Last size forwarded to the engine.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Engine command failures seen so far.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// A graphics context became current for a new surface.
    pub fn on_surface_ready(&mut self, surface: &mut S, assets: &AssetManager) {
        if self.initialized {
            log::warn!("surface ready while engine still initialized; previous destroy was skipped");
        }

        let config = *surface.config();
        log::info!("engine init ({config})");
        let result = self.engine.init(surface, assets, &config);
        // Init was issued even if it failed; destroy must still pair with it.
        self.initialized = true;
        self.size = None;
        self.report(result);
    }

    /// The drawable changed size. Repeats are forwarded; zero sizes are not.
    pub fn on_surface_resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring zero-sized resize {width}x{height}");
            return;
        }
        if !self.initialized {
            log::debug!("resize {width}x{height} before init; dropped");
            return;
        }

        self.size = Some((width, height));
        let result = self.engine.resize(width, height);
        self.report(result);
    }

    /// One display refresh: update, then render.
    pub fn on_frame(&mut self, surface: &mut S) {
        if !self.initialized {
            return;
        }

        let result = self.engine.update();
        self.report(result);

        let result = self.engine.render(surface);
        self.report(result);
    }

    pub fn move_camera(&mut self, delta: CameraDelta) {
        if !self.initialized {
            log::debug!("camera move {delta:?} with no engine; dropped");
            return;
        }
        self.engine.move_camera(delta.dx, delta.dy, delta.dz);
    }

    /// The surface is about to be released.
    pub fn on_surface_destroyed(&mut self, surface: &mut S) {
        if !self.initialized {
            return;
        }
        log::info!("engine destroy");
        let result = self.engine.destroy(surface);
        self.initialized = false;
        self.size = None;
        self.report(result);
    }

    fn report(&mut self, result: EngineResult) {
        if let Err(e) = result {
            self.failures += 1;
            log::error!("{e}");
        }
    }
}
