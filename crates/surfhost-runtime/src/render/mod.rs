//! Rendering context.
//!
//! A dedicated thread owns the surface, the host and the engine. The control
//! side talks to it only through an ordered task queue.

mod driver;
mod thread;

pub use driver::FrameDriver;
pub use thread::FrameMode;

pub(crate) use thread::{RenderTask, RenderThread};
