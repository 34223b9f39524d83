use anyhow::{Context, Result};

use crate::surface::SurfaceHost;

use super::controller::SurfaceLifecycle;
use super::error::LifecycleError;

/// Maps application lifecycle signals onto the surface lifecycle.
///
/// The application host may deliver `stop` several times without a `resume`
/// in between; only the first one tears anything down. A `resume` after a
/// stop rebuilds the surface host, since the previous one went away with the
/// old surface.
pub struct LifecycleAdapter<H: SurfaceHost> {
    lifecycle: SurfaceLifecycle<H>,
    stopped: bool,
}

impl<H: SurfaceHost> LifecycleAdapter<H> {
    pub fn new(lifecycle: SurfaceLifecycle<H>) -> Self {
        Self {
            lifecycle,
            stopped: false,
        }
    }

    pub fn lifecycle(&self) -> &SurfaceLifecycle<H> {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut SurfaceLifecycle<H> {
        &mut self.lifecycle
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn on_create(&mut self, host: H) -> Result<(), LifecycleError> {
        log::info!("application created");
        self.lifecycle.create(host)
    }

    pub fn on_stop(&mut self) {
        if self.stopped {
            log::debug!("application already stopped");
            return;
        }
        log::info!("application stopping");
        self.lifecycle.suspend();
        self.stopped = true;
    }

    /// Resumes after a stop. `rebuild` is only invoked when actually stopped.
    ///
    /// On failure the adapter stays stopped so a later resume retries.
    pub fn on_resume<F>(&mut self, rebuild: F) -> Result<()>
    where
        F: FnOnce() -> Result<H>,
    {
        if !self.stopped {
            log::debug!("resume without prior stop; nothing to rebuild");
            return Ok(());
        }

        log::info!("application resuming");
        let host = rebuild().context("failed to rebuild surface host")?;
        self.lifecycle.resume(host)?;
        self.stopped = false;
        Ok(())
    }

    pub fn on_destroy(&mut self) {
        log::info!("application destroyed");
        self.lifecycle.destroy();
    }
}
