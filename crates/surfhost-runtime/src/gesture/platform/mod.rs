//! Window-system adapters producing [`PointerEvent`](super::PointerEvent)s.

pub mod winit;
