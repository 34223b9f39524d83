use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::AssetManager;
use crate::device::{GpuInit, GpuSurface, WgpuHost};
use crate::engine::Engine;
use crate::gesture::platform::winit::{translate_window_event, MousePointer};
use crate::gesture::{GestureConfig, GestureTracker};
use crate::lifecycle::{LifecycleAdapter, LifecycleConfig, SurfaceLifecycle};
use crate::render::FrameMode;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Root directory handed to the engine as its `AssetManager`.
    pub assets_root: PathBuf,
    pub gpu: GpuInit,
    pub lifecycle: LifecycleConfig,
    pub gesture: GestureConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "surfhost".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            assets_root: PathBuf::from("assets"),
            gpu: GpuInit::default(),
            lifecycle: LifecycleConfig::default(),
            gesture: GestureConfig::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the window closes.
    ///
    /// `engine` moves onto the rendering thread when the first surface is
    /// created and is destroyed there before the window goes away.
    pub fn run<E>(config: RuntimeConfig, engine: E) -> Result<()>
    where
        E: Engine<GpuSurface>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, engine);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct AppState<E> {
    config: RuntimeConfig,
    /// Consumed when the lifecycle is first created.
    engine: Option<E>,
    window: Option<Arc<Window>>,
    adapter: Option<LifecycleAdapter<WgpuHost>>,
    tracker: GestureTracker,
    mouse: MousePointer,
    fatal: Option<anyhow::Error>,
}

impl<E> AppState<E>
where
    E: Engine<GpuSurface>,
{
    fn new(config: RuntimeConfig, engine: E) -> Self {
        let tracker = GestureTracker::new(config.gesture);
        Self {
            config,
            engine: Some(engine),
            window: None,
            adapter: None,
            tracker,
            mouse: MousePointer::default(),
            fatal: None,
        }
    }

    /// Surface teardown happens in `exiting`.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        event_loop.exit();
    }

    fn window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        if let Some(window) = &self.window {
            return Ok(Arc::clone(window));
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        self.window = Some(Arc::clone(&window));
        Ok(window)
    }

    /// First call creates the lifecycle; later calls resume it.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = self.window(event_loop)?;
        let host = || {
            WgpuHost::new(
                Arc::clone(&window),
                self.config.gpu.clone(),
                AssetManager::new(self.config.assets_root.clone()),
            )
        };

        if let Some(adapter) = self.adapter.as_mut() {
            return adapter.on_resume(host);
        }

        let engine = self.engine.take().context("engine already consumed")?;
        let lifecycle = SurfaceLifecycle::new(engine, self.config.lifecycle.clone())?;
        let adapter = self.adapter.insert(LifecycleAdapter::new(lifecycle));
        adapter.on_create(host()?)?;
        Ok(())
    }

    fn lifecycle(&self) -> Option<&SurfaceLifecycle<WgpuHost>> {
        self.adapter.as_ref().map(LifecycleAdapter::lifecycle)
    }

    fn on_demand(&self) -> bool {
        self.config.lifecycle.frame_mode == FrameMode::OnDemand
    }
}

impl<E> ApplicationHandler for AppState<E>
where
    E: Engine<GpuSurface>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // Contacts do not survive a trip to the background.
        self.tracker.reset();
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.on_stop();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // The rendering thread paces itself.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(ev) = translate_window_event(&self.tracker, &mut self.mouse, &event) {
            if let Some(delta) = self.tracker.on_pointer_event(ev) {
                if let Some(lifecycle) = self.lifecycle() {
                    lifecycle.move_camera(delta);
                    if self.on_demand() {
                        lifecycle.request_render();
                    }
                }
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(lifecycle) = self.lifecycle() {
                    lifecycle.resize(size.width, size.height);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.window.as_ref().map(|w| w.inner_size());
                if let (Some(size), Some(lifecycle)) = (size, self.lifecycle()) {
                    lifecycle.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(lifecycle) = self.lifecycle() {
                    lifecycle.request_render();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.on_destroy();
        }
    }
}
