use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::engine::Engine;
use crate::gesture::CameraDelta;
use crate::surface::{RenderSurface, SurfaceConfig, SurfaceError, SurfaceHost};
use crate::time::FramePacer;

use super::driver::FrameDriver;

/// When the rendering thread draws.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameMode {
    /// A frame every `interval` while a surface exists.
    Continuous { interval: Duration },
    /// A frame only after `request_render`; repeated requests coalesce.
    OnDemand,
}

impl Default for FrameMode {
    fn default() -> Self {
        Self::Continuous {
            interval: Duration::from_micros(16_667),
        }
    }
}

/// Work marshalled onto the rendering thread, executed in send order.
pub(crate) enum RenderTask<H: SurfaceHost> {
    Attach {
        host: H,
        config: SurfaceConfig,
        reply: Sender<Result<(), SurfaceError>>,
    },
    Resize {
        width: u32,
        height: u32,
    },
    MoveCamera(CameraDelta),
    RequestFrame,
    Teardown {
        reply: Sender<()>,
    },
    Sync {
        reply: Sender<()>,
    },
    Shutdown,
}

/// Control-side handle to the rendering thread.
pub(crate) struct RenderThread<H: SurfaceHost> {
    tasks: Sender<RenderTask<H>>,
    join: Option<JoinHandle<()>>,
}

impl<H: SurfaceHost> RenderThread<H> {
    pub fn spawn<E>(engine: E, mode: FrameMode) -> Result<Self>
    where
        E: Engine<H::Surface>,
    {
        let (tx, rx) = crossbeam_channel::unbounded();

        let join = std::thread::Builder::new()
            .name("surfhost-render".to_string())
            .spawn(move || RenderLoop::<H, E>::new(rx, engine, mode).run())
            .context("failed to spawn rendering thread")?;

        Ok(Self {
            tasks: tx,
            join: Some(join),
        })
    }

    /// Queues a task without waiting. Returns false if the thread is gone.
    pub fn post(&self, task: RenderTask<H>) -> bool {
        self.tasks.send(task).is_ok()
    }

    /// Queues a task and blocks until the thread replies.
    ///
    /// `None` means the thread exited before replying.
    pub fn call<T>(&self, task: impl FnOnce(Sender<T>) -> RenderTask<H>) -> Option<T> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.tasks.send(task(tx)).ok()?;
        rx.recv().ok()
    }

    /// Tears down any live surface and joins the thread.
    pub fn shutdown(&mut self) {
        let Some(join) = self.join.take() else {
            return;
        };

        let _ = self.tasks.send(RenderTask::Shutdown);
        if join.join().is_err() {
            log::error!("rendering thread panicked");
        }
    }
}

impl<H: SurfaceHost> Drop for RenderThread<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

enum Received<H: SurfaceHost> {
    Task(RenderTask<H>),
    Idle,
    Disconnected,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Flow {
    Continue,
    Exit,
}

/// State owned by the rendering thread.
///
/// Queued tasks are always drained before a frame runs, so a teardown that has
/// been queued preempts every later frame.
struct RenderLoop<H: SurfaceHost, E> {
    tasks: Receiver<RenderTask<H>>,
    driver: FrameDriver<H::Surface, E>,
    mode: FrameMode,
    pacer: FramePacer,
    host: Option<H>,
    surface: Option<H::Surface>,
    frame_requested: bool,
}

impl<H, E> RenderLoop<H, E>
where
    H: SurfaceHost,
    E: Engine<H::Surface>,
{
    fn new(tasks: Receiver<RenderTask<H>>, engine: E, mode: FrameMode) -> Self {
        let pacer = match mode {
            FrameMode::Continuous { interval } => FramePacer::new(interval),
            FrameMode::OnDemand => FramePacer::new(Duration::ZERO),
        };

        Self {
            tasks,
            driver: FrameDriver::new(engine),
            mode,
            pacer,
            host: None,
            surface: None,
            frame_requested: false,
        }
    }

    fn run(mut self) {
        log::debug!("rendering thread started ({:?})", self.mode);

        loop {
            match self.wait() {
                Received::Task(task) => {
                    if self.handle(task) == Flow::Exit {
                        break;
                    }
                }
                Received::Idle => {}
                Received::Disconnected => break,
            }

            if self.frame_due() {
                self.frame();
            }
        }

        self.teardown();
        log::debug!("rendering thread stopped");
    }

    fn wait(&self) -> Received<H> {
        let result = match self.mode {
            _ if self.surface.is_none() => self.tasks.recv().map_err(|_| RecvTimeoutError::Disconnected),
            FrameMode::OnDemand if !self.frame_requested => {
                self.tasks.recv().map_err(|_| RecvTimeoutError::Disconnected)
            }
            FrameMode::OnDemand => self.tasks.try_recv().map_err(|e| match e {
                TryRecvError::Empty => RecvTimeoutError::Timeout,
                TryRecvError::Disconnected => RecvTimeoutError::Disconnected,
            }),
            FrameMode::Continuous { .. } => self.tasks.recv_deadline(self.pacer.next_deadline()),
        };

        match result {
            Ok(task) => Received::Task(task),
            Err(RecvTimeoutError::Timeout) => Received::Idle,
            Err(RecvTimeoutError::Disconnected) => Received::Disconnected,
        }
    }

    fn frame_due(&self) -> bool {
        if self.surface.is_none() || !self.tasks.is_empty() {
            return false;
        }
        match self.mode {
            FrameMode::OnDemand => self.frame_requested,
            FrameMode::Continuous { .. } => self.pacer.is_due(Instant::now()),
        }
    }

    fn handle(&mut self, task: RenderTask<H>) -> Flow {
        match task {
            RenderTask::Attach { host, config, reply } => {
                let result = self.attach(host, &config);
                let _ = reply.send(result);
            }

            RenderTask::Resize { width, height } => self.resize(width, height),

            RenderTask::MoveCamera(delta) => self.driver.move_camera(delta),

            RenderTask::RequestFrame => {
                if self.surface.is_some() {
                    self.frame_requested = true;
                }
            }

            RenderTask::Teardown { reply } => {
                self.teardown();
                let _ = reply.send(());
            }

            RenderTask::Sync { reply } => {
                // A requested frame counts as queued work.
                if self.frame_requested {
                    self.frame();
                }
                let _ = reply.send(());
            }

            RenderTask::Shutdown => return Flow::Exit,
        }

        Flow::Continue
    }

    fn attach(&mut self, mut host: H, requested: &SurfaceConfig) -> Result<(), SurfaceError> {
        if self.surface.is_some() {
            log::warn!("attach while a surface is live; releasing it first");
            self.teardown();
        }

        let mut surface = host.create_surface(requested).inspect_err(|e| {
            log::error!("surface creation failed: {e}");
        })?;
        log::info!("surface created with {}", surface.config());

        let assets = host.assets();
        self.driver.on_surface_ready(&mut surface, &assets);

        let (width, height) = surface.size();
        self.driver.on_surface_resized(width, height);

        self.pacer.reset();
        self.host = Some(host);
        self.surface = Some(surface);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("resize {width}x{height} with no surface; dropped");
            return;
        };
        if width == 0 || height == 0 {
            log::debug!("ignoring zero-sized resize {width}x{height}");
            return;
        }

        surface.resize(width, height);
        self.driver.on_surface_resized(width, height);
    }

    fn frame(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        self.pacer.tick(Instant::now());

        self.driver.on_frame(surface);
        self.frame_requested = false;
    }

    /// Destroys engine state, then releases the surface and host, in that order.
    fn teardown(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            self.driver.on_surface_destroyed(&mut surface);
            drop(surface);
            log::info!("surface released");
        }
        self.host = None;
        self.frame_requested = false;
    }
}
