use surfhost_runtime::assets::AssetManager;
use surfhost_runtime::device::{GpuSurface, SurfaceErrorAction};
use surfhost_runtime::engine::{Engine, EngineCommand, EngineError, EngineResult};
use surfhost_runtime::surface::SurfaceConfig;

/// Scene description looked up in the asset root at init.
const SCENE_ASSET: &str = "data.xml";

const START_CAMERA: [f32; 3] = [0.0, 4.0, 28.0];
const STEP: f32 = 1.0 / 60.0;

/// Minimal engine: the camera position and a clock tint the clear colour.
pub struct OrbitScene {
    camera: [f32; 3],
    clock: f32,
    aspect: f32,
    scene_len: Option<usize>,
}

impl Default for OrbitScene {
    fn default() -> Self {
        Self {
            camera: START_CAMERA,
            clock: 0.0,
            aspect: 1.0,
            scene_len: None,
        }
    }
}

impl OrbitScene {
    fn clear_color(&self) -> wgpu::Color {
        let [x, y, _] = self.camera;
        let pulse = 0.5 + 0.5 * self.clock.sin();
        wgpu::Color {
            r: wave(x * 0.1),
            g: wave(y * 0.1),
            b: 0.2 + 0.3 * f64::from(pulse),
            a: 1.0,
        }
    }
}

/// Maps any real onto [0, 1] smoothly.
fn wave(v: f32) -> f64 {
    f64::from(0.5 + 0.5 * v.sin())
}

impl Engine<GpuSurface> for OrbitScene {
    fn init(&mut self, surface: &mut GpuSurface, assets: &AssetManager, config: &SurfaceConfig) -> EngineResult {
        self.clock = 0.0;

        self.scene_len = if assets.exists(SCENE_ASSET) {
            let text = assets
                .load_text(SCENE_ASSET)
                .map_err(|e| EngineError::new(EngineCommand::Init, format!("{e:#}")))?;
            Some(text.len())
        } else {
            None
        };

        log::info!(
            "scene init on {} ({config}); {SCENE_ASSET}: {:?} bytes",
            surface.adapter_info().name,
            self.scene_len,
        );
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> EngineResult {
        self.aspect = width as f32 / height as f32;
        log::debug!("viewport {width}x{height}, aspect {:.3}", self.aspect);
        Ok(())
    }

    fn update(&mut self) -> EngineResult {
        self.clock += STEP;
        Ok(())
    }

    fn render(&mut self, surface: &mut GpuSurface) -> EngineResult {
        let mut frame = match surface.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match surface.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        Err(EngineError::new(EngineCommand::Render, "surface out of memory"))
                    }
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(()),
                };
            }
        };

        let depth = surface.depth_view().map(|view| wgpu::RenderPassDepthStencilAttachment {
            view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        });

        {
            let _pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("surfhost clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: depth,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        surface.submit(frame);
        Ok(())
    }

    fn move_camera(&mut self, dx: f32, dy: f32, dz: f32) {
        self.camera[0] += dx;
        self.camera[1] += dy;
        self.camera[2] += dz;
    }

    fn destroy(&mut self, _surface: &mut GpuSurface) -> EngineResult {
        log::info!("scene destroyed at t={:.2}s", self.clock);
        self.scene_len = None;
        Ok(())
    }
}
