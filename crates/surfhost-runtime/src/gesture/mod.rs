//! Gesture tracking.
//!
//! Converts raw multi-touch input into camera pan deltas. The public API does
//! not expose window-system types; `platform` holds the translators.

mod pointer_table;
mod tracker;
mod types;

pub mod platform;

pub use pointer_table::{InsertOutcome, PointerState, PointerTable, POINTER_CAPACITY};
pub use tracker::GestureTracker;
pub use types::{CameraDelta, GestureConfig, PointerEvent, PointerEventKind};
