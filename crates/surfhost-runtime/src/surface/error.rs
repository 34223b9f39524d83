use std::fmt;

use super::config::SurfaceConfig;

/// Failure to obtain a surface and graphics context.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// No supported configuration satisfies the request. Not recoverable
    /// without changing the request.
    ConfigMismatch {
        requested: SurfaceConfig,
        /// How many configurations the display subsystem offered.
        supported: usize,
    },

    /// The platform refused to create the surface, adapter or device.
    Backend(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMismatch { requested, supported } => write!(
                f,
                "no surface configuration matches {requested} ({supported} offered)"
            ),
            Self::Backend(msg) => write!(f, "surface backend error: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}
