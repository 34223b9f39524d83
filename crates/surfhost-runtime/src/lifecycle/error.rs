use std::fmt;

use crate::surface::SurfaceError;

/// Failure of a lifecycle transition.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleError {
    /// The host could not provide a surface. Fatal for this transition.
    Surface(SurfaceError),
    /// The rendering thread exited before completing the transition.
    RenderThreadGone,
}

impl From<SurfaceError> for LifecycleError {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "surface creation failed: {e}"),
            Self::RenderThreadGone => f.write_str("rendering thread is no longer running"),
        }
    }
}

impl std::error::Error for LifecycleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::RenderThreadGone => None,
        }
    }
}
