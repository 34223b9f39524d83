use std::fmt;

/// Kind of a pointer event delivered by the window system.
///
/// The window system distinguishes the first contact of a gesture (primary)
/// from every contact that joins while it is held (secondary).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerEventKind {
    PrimaryDown,
    PrimaryUp,
    SecondaryDown,
    SecondaryUp,
    Move,

    /// Platform action code not represented here.
    Unknown(u32),
}

/// A single pointer event in surface pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Window-system pointer id, stable for the duration of the contact.
    pub pointer_id: u32,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, pointer_id: u32, x: f32, y: f32) -> Self {
        Self { kind, pointer_id, x, y }
    }
}

/// Relative camera translation derived from one primary-pointer move.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CameraDelta {
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
}

impl CameraDelta {
    pub const fn new(dx: f32, dy: f32, dz: f32) -> Self {
        Self { dx, dy, dz }
    }
}

/// Gesture tracker tuning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GestureConfig {
    /// Scale applied to pixel movement before it becomes a camera delta.
    pub sensitivity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { sensitivity: 0.005 }
    }
}

impl fmt::Display for PointerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "Unknown(action={code})"),
            other => write!(f, "{other:?}"),
        }
    }
}
