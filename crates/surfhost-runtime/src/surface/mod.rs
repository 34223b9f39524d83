//! Surface configuration and the host capability that creates surfaces.

mod config;
mod error;
mod host;

pub use config::{choose_config, ApiVersion, SurfaceConfig};
pub use error::SurfaceError;
pub use host::{RenderSurface, SurfaceHost};
