//! wgpu-backed surface host.
//!
//! Everything here runs on the rendering thread once the host is attached:
//! adapter/device acquisition, surface configuration and format selection
//! against the requested `SurfaceConfig`.

mod error;
mod formats;
mod frame;
mod gpu;
mod host;
mod init;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::GpuSurface;
pub use host::WgpuHost;
pub use init::GpuInit;
