//! Frame timing for the rendering thread.
//!
//! One `FramePacer` lives on the rendering thread. `tick()` is called once per
//! continuous-mode frame; `reset()` whenever a new surface generation starts.

mod frame_pacer;

pub use frame_pacer::FramePacer;
