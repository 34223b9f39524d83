use crate::surface::{choose_config, RenderSurface, SurfaceConfig, SurfaceError};

use super::formats::{self, Candidate, WGPU_API_VERSION};
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// Depth attachment sized to the swapchain.
struct DepthTarget {
    format: wgpu::TextureFormat,
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTarget {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("surfhost depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            format,
            _texture: texture,
            view,
        }
    }
}

/// A wgpu surface plus the device that draws into it.
///
/// Created on the rendering thread by [`super::WgpuHost`] and dropped there
/// on teardown, which releases the swapchain and the device together.
pub struct GpuSurface {
    /// Surface bound to the window. The `Arc<Window>` it was created from keeps it alive.
    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    chosen: SurfaceConfig,
    depth: Option<DepthTarget>,
    size: (u32, u32),
}

impl GpuSurface {
    /// Configures `surface` with a pixel format that satisfies `requested`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub(crate) async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        size: (u32, u32),
        init: &GpuInit,
        requested: &SurfaceConfig,
    ) -> Result<Self, SurfaceError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| backend("failed to find a suitable GPU adapter", e))?;

        let caps = surface.get_capabilities(&adapter);
        let alpha_mode = formats::choose_alpha_mode(&caps.alpha_modes, requested.alpha_bits > 0);
        let candidates = formats::enumerate_candidates(
            &caps.formats,
            formats::is_opaque(alpha_mode),
            init.prefer_srgb,
            WGPU_API_VERSION,
        );
        let Candidate { config: chosen, color, depth } = select(requested, &candidates)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("surfhost device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| backend("failed to create wgpu device/queue", e))?;

        let present_mode = if caps.present_modes.contains(&init.present_mode) {
            init.present_mode
        } else {
            wgpu::PresentMode::Fifo
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: color,
            width: size.0.max(1),
            height: size.1.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        let depth = depth.map(|format| DepthTarget::new(&device, format, config.width, config.height));

        log::info!(
            "surface created on {:?} ({color:?}, depth {depth_format:?})",
            adapter.get_info().name,
            depth_format = depth.as_ref().map(|d| d.format),
        );

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            config,
            chosen,
            depth,
            size,
        })
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Depth attachment format, if the chosen configuration has depth bits.
    pub fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        self.depth.as_ref().map(|d| d.format)
    }

    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth.as_ref().map(|d| &d.view)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Acquires the next surface texture and creates an encoder.
    ///
    /// The returned frame owns the surface texture. Releasing it (after submission)
    /// presents the frame.
    pub fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("surfhost frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the frame.
    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }

    /// Converts a frame acquisition error into a higher-level action.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        formats::map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }
}

impl RenderSurface for GpuSurface {
    fn config(&self) -> &SurfaceConfig {
        &self.chosen
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    /// wgpu cannot configure a 0x0 surface; the size is recorded and
    /// configuration deferred until it is non-zero again.
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        if let Some(format) = self.depth_format() {
            self.depth = Some(DepthTarget::new(&self.device, format, width, height));
        }
    }
}

fn select(requested: &SurfaceConfig, candidates: &[Candidate]) -> Result<Candidate, SurfaceError> {
    let supported: Vec<SurfaceConfig> = candidates.iter().map(|c| c.config).collect();
    let chosen = choose_config(requested, &supported)?;

    // `choose_config` returns the first match, so the first candidate with
    // that configuration is the one it picked.
    candidates
        .iter()
        .find(|c| c.config == chosen)
        .copied()
        .ok_or(SurfaceError::ConfigMismatch {
            requested: *requested,
            supported: supported.len(),
        })
}

fn backend(context: &str, err: impl std::fmt::Display) -> SurfaceError {
    SurfaceError::Backend(format!("{context}: {err}"))
}
