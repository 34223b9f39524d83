use std::fmt;

/// Failure reported by an engine command.
///
/// The runtime never interprets the cause; it logs the failure and keeps
/// issuing commands in order.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineError {
    pub command: EngineCommand,
    pub message: String,
}

impl EngineError {
    pub fn new(command: EngineCommand, msg: impl Into<String>) -> Self {
        Self { command, message: msg.into() }
    }
}

/// The engine command surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EngineCommand {
    Init,
    Resize,
    Update,
    Render,
    MoveCamera,
    Destroy,
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Resize => "resize",
            Self::Update => "update",
            Self::Render => "render",
            Self::MoveCamera => "moveCamera",
            Self::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine {} failed: {}", self.command, self.message)
    }
}

impl std::error::Error for EngineError {}
