//! Surface lifecycle.
//!
//! `SurfaceLifecycle` is the state machine over [`LifecyclePhase`];
//! `LifecycleAdapter` sits in front of it and absorbs the quirks of the
//! application host's create/stop/resume/destroy signals.

mod adapter;
mod controller;
mod error;
mod phase;

pub use adapter::LifecycleAdapter;
pub use controller::{LifecycleConfig, SurfaceLifecycle};
pub use error::LifecycleError;
pub use phase::LifecyclePhase;
