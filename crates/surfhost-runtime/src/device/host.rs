use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::Window;

use crate::assets::AssetManager;
use crate::surface::{SurfaceConfig, SurfaceError, SurfaceHost};

use super::{GpuInit, GpuSurface};

/// Surface host backed by a winit window and wgpu.
///
/// Window-system calls happen in `new`, on the control thread; adapter and
/// device acquisition happen in `create_surface`, on the rendering thread.
/// One host serves one surface generation, so a fresh host is built on every
/// resume.
pub struct WgpuHost {
    window: Arc<Window>,
    init: GpuInit,
    assets: AssetManager,
    instance: wgpu::Instance,
    /// Taken by the first `create_surface`.
    surface: Option<wgpu::Surface<'static>>,
    size: (u32, u32),
}

impl WgpuHost {
    pub fn new(window: Arc<Window>, init: GpuInit, assets: AssetManager) -> Result<Self> {
        let size = window.inner_size();

        // Use all backends to allow wgpu to select the optimal platform backend.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create wgpu surface")?;

        Ok(Self {
            window,
            init,
            assets,
            instance,
            surface: Some(surface),
            size: (size.width, size.height),
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl SurfaceHost for WgpuHost {
    type Surface = GpuSurface;

    fn assets(&self) -> AssetManager {
        self.assets.clone()
    }

    fn create_surface(&mut self, requested: &SurfaceConfig) -> Result<GpuSurface, SurfaceError> {
        let surface = self
            .surface
            .take()
            .ok_or_else(|| SurfaceError::Backend("window surface already consumed".to_string()))?;

        pollster::block_on(GpuSurface::new(
            &self.instance,
            surface,
            self.size,
            &self.init,
            requested,
        ))
    }
}
