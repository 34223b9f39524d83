use anyhow::Result;

use crate::engine::Engine;
use crate::gesture::CameraDelta;
use crate::render::{FrameMode, RenderTask, RenderThread};
use crate::surface::{SurfaceConfig, SurfaceHost};

use super::error::LifecycleError;
use super::phase::LifecyclePhase;

/// Lifecycle controller configuration.
#[derive(Debug, Clone, Default)]
pub struct LifecycleConfig {
    /// Configuration requested for every surface generation.
    pub surface: SurfaceConfig,
    pub frame_mode: FrameMode,
}

/// Owns the rendering surface across foreground/background transitions.
///
/// Runs on the control thread. Every operation that touches the surface or
/// the engine is queued onto the rendering thread; teardown is awaited so
/// the engine is always destroyed before its context is released.
///
/// A surface is never resumed in place: each `create`/`resume` starts a new
/// generation with a freshly selected configuration and a fresh engine init.
pub struct SurfaceLifecycle<H: SurfaceHost> {
    config: LifecycleConfig,
    phase: LifecyclePhase,
    generation: u64,
    /// Teardown already ran for the current generation.
    torn_down: bool,
    render: RenderThread<H>,
}

impl<H: SurfaceHost> SurfaceLifecycle<H> {
    /// Spawns the rendering thread that will own `engine`.
    pub fn new<E>(engine: E, config: LifecycleConfig) -> Result<Self>
    where
        E: Engine<H::Surface>,
    {
        let render = RenderThread::spawn(engine, config.frame_mode)?;
        Ok(Self {
            config,
            phase: LifecyclePhase::Uninitialized,
            generation: 0,
            torn_down: true,
            render,
        })
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Number of surface generations brought up so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// `Uninitialized → Active`.
    pub fn create(&mut self, host: H) -> Result<(), LifecycleError> {
        match self.phase {
            LifecyclePhase::Uninitialized => self.establish(host),
            LifecyclePhase::Active => {
                log::debug!("create while active; ignored");
                Ok(())
            }
            LifecyclePhase::Suspended => {
                log::debug!("create while suspended; resuming instead");
                self.establish(host)
            }
            LifecyclePhase::Destroyed => {
                log::warn!("create after destroy; ignored");
                Ok(())
            }
        }
    }

    /// `Active → Suspended`. Repeated calls are no-ops.
    pub fn suspend(&mut self) {
        if self.phase != LifecyclePhase::Active {
            log::debug!("suspend in phase {}; nothing to tear down", self.phase);
            return;
        }

        self.teardown();
        self.phase = LifecyclePhase::Suspended;
        log::info!("surface generation {} suspended", self.generation);
    }

    /// `Suspended → Active`, rebuilding everything from `host`.
    pub fn resume(&mut self, host: H) -> Result<(), LifecycleError> {
        match self.phase {
            LifecyclePhase::Suspended | LifecyclePhase::Uninitialized => self.establish(host),
            LifecyclePhase::Active => {
                log::debug!("resume while active; ignored");
                Ok(())
            }
            LifecyclePhase::Destroyed => {
                log::warn!("resume after destroy; ignored");
                Ok(())
            }
        }
    }

    /// Moves to the terminal `Destroyed` phase and stops the rendering thread.
    pub fn destroy(&mut self) {
        match self.phase {
            LifecyclePhase::Destroyed => {
                log::debug!("destroy while already destroyed; ignored");
                return;
            }
            LifecyclePhase::Active => self.teardown(),
            LifecyclePhase::Uninitialized | LifecyclePhase::Suspended => {}
        }

        self.phase = LifecyclePhase::Destroyed;
        self.render.shutdown();
        log::info!("surface lifecycle destroyed after {} generation(s)", self.generation);
    }

    /// Forwards a drawable size change to the rendering thread.
    pub fn resize(&self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring zero-sized resize {width}x{height}");
            return;
        }
        self.post(RenderTask::Resize { width, height });
    }

    pub fn move_camera(&self, delta: CameraDelta) {
        self.post(RenderTask::MoveCamera(delta));
    }

    /// Asks for one frame. Only meaningful in on-demand frame mode.
    pub fn request_render(&self) {
        self.post(RenderTask::RequestFrame);
    }

    /// Blocks until every task queued so far, including a requested frame,
    /// has run. Returns false if the rendering thread is gone.
    pub fn sync(&self) -> bool {
        self.render.call(|reply| RenderTask::Sync { reply }).is_some()
    }

    fn post(&self, task: RenderTask<H>) {
        if !self.phase.is_active() {
            return;
        }
        if !self.render.post(task) {
            log::error!("rendering thread is gone; task dropped");
        }
    }

    fn establish(&mut self, host: H) -> Result<(), LifecycleError> {
        let config = self.config.surface;
        let reply = self
            .render
            .call(|reply| RenderTask::Attach { host, config, reply })
            .ok_or(LifecycleError::RenderThreadGone)?;
        reply?;

        self.generation += 1;
        self.torn_down = false;
        self.phase = LifecyclePhase::Active;
        log::info!("surface generation {} active", self.generation);
        Ok(())
    }

    fn teardown(&mut self) {
        if self.torn_down {
            log::debug!("generation {} already torn down", self.generation);
            return;
        }

        if self.render.call(|reply| RenderTask::Teardown { reply }).is_none() {
            log::error!("rendering thread gone during teardown of generation {}", self.generation);
        }
        self.torn_down = true;
    }
}

impl<H: SurfaceHost> Drop for SurfaceLifecycle<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}
