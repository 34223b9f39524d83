//! Surface lifecycle runtime.
//!
//! Keeps a GPU rendering surface alive across application foreground and
//! background transitions, drives an `Engine` on a dedicated rendering
//! thread, and turns touch input into camera pan deltas.

pub mod assets;
pub mod device;
pub mod engine;
pub mod gesture;
pub mod lifecycle;
pub mod logging;
pub mod render;
pub mod surface;
pub mod time;
pub mod window;

#[cfg(test)]
mod testing;
