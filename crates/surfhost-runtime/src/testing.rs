//! Recording doubles shared by the unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::assets::AssetManager;
use crate::engine::{Engine, EngineCommand, EngineError, EngineResult};
use crate::surface::{choose_config, RenderSurface, SurfaceConfig, SurfaceError, SurfaceHost};

/// Everything observable across the engine and host boundary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    SurfaceCreated(u64),
    SurfaceReleased(u64),
    /// Init against the surface with this id.
    Init(u64),
    Resize(u32, u32),
    Update,
    Render,
    MoveCamera(f32, f32, f32),
    Destroy,
}

impl Call {
    fn is_engine(&self) -> bool {
        !matches!(self, Call::SurfaceCreated(_) | Call::SurfaceReleased(_))
    }
}

/// Ordered log shared between threads.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<Call>>>);

impl Journal {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn engine_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_engine).collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    /// Index of the first call matching `pred`.
    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.0.lock().unwrap().iter().position(|c| pred(c))
    }
}

pub(crate) struct RecordingEngine {
    journal: Journal,
    failing: HashSet<EngineCommand>,
}

impl RecordingEngine {
    pub fn new(journal: Journal) -> Self {
        Self { journal, failing: HashSet::new() }
    }

    /// Makes every `command` report failure (after being recorded).
    pub fn failing(mut self, command: EngineCommand) -> Self {
        self.failing.insert(command);
        self
    }

    fn outcome(&self, command: EngineCommand) -> EngineResult {
        if self.failing.contains(&command) {
            Err(EngineError::new(command, "injected failure"))
        } else {
            Ok(())
        }
    }
}

impl Engine<MockSurface> for RecordingEngine {
    fn init(&mut self, surface: &mut MockSurface, _assets: &AssetManager, _config: &SurfaceConfig) -> EngineResult {
        self.journal.push(Call::Init(surface.id));
        self.outcome(EngineCommand::Init)
    }

    fn resize(&mut self, width: u32, height: u32) -> EngineResult {
        self.journal.push(Call::Resize(width, height));
        self.outcome(EngineCommand::Resize)
    }

    fn update(&mut self) -> EngineResult {
        self.journal.push(Call::Update);
        self.outcome(EngineCommand::Update)
    }

    fn render(&mut self, _surface: &mut MockSurface) -> EngineResult {
        self.journal.push(Call::Render);
        self.outcome(EngineCommand::Render)
    }

    fn move_camera(&mut self, dx: f32, dy: f32, dz: f32) {
        self.journal.push(Call::MoveCamera(dx, dy, dz));
    }

    fn destroy(&mut self, _surface: &mut MockSurface) -> EngineResult {
        self.journal.push(Call::Destroy);
        self.outcome(EngineCommand::Destroy)
    }
}

pub(crate) struct MockSurface {
    pub id: u64,
    config: SurfaceConfig,
    size: (u32, u32),
    journal: Journal,
}

impl MockSurface {
    /// A surface whose release is not recorded anywhere shared.
    pub fn detached(id: u64) -> Self {
        Self {
            id,
            config: SurfaceConfig::default(),
            size: (640, 480),
            journal: Journal::default(),
        }
    }
}

impl RenderSurface for MockSurface {
    fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        self.journal.push(Call::SurfaceReleased(self.id));
    }
}

pub(crate) struct MockHost {
    journal: Journal,
    next_id: Arc<AtomicU64>,
    supported: Vec<SurfaceConfig>,
    size: (u32, u32),
}

impl MockHost {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            next_id: Arc::new(AtomicU64::new(1)),
            supported: vec![SurfaceConfig::default()],
            size: (640, 480),
        }
    }

    /// A fresh host continuing this one's surface numbering.
    pub fn rebuilt(&self) -> Self {
        Self {
            journal: self.journal.clone(),
            next_id: Arc::clone(&self.next_id),
            supported: self.supported.clone(),
            size: self.size,
        }
    }

    pub fn supporting(mut self, supported: Vec<SurfaceConfig>) -> Self {
        self.supported = supported;
        self
    }
}

impl SurfaceHost for MockHost {
    type Surface = MockSurface;

    fn assets(&self) -> AssetManager {
        AssetManager::default()
    }

    fn create_surface(&mut self, requested: &SurfaceConfig) -> Result<MockSurface, SurfaceError> {
        let config = choose_config(requested, &self.supported)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.journal.push(Call::SurfaceCreated(id));
        Ok(MockSurface {
            id,
            config,
            size: self.size,
            journal: self.journal.clone(),
        })
    }
}
