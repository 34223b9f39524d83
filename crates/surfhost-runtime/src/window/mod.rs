//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and maps their events onto the
//! surface lifecycle and the gesture tracker.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
