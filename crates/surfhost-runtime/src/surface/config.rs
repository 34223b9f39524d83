use std::fmt;

use super::error::SurfaceError;

/// Graphics API version as `major.minor`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ApiVersion {
    pub major: u8,
    pub minor: u8,
}

impl ApiVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Surface/context descriptor, chosen once when a surface is created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SurfaceConfig {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub api_version: ApiVersion,
}

impl SurfaceConfig {
    pub const fn rgb8(depth_bits: u8, stencil_bits: u8, api_version: ApiVersion) -> Self {
        Self {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 0,
            depth_bits,
            stencil_bits,
            api_version,
        }
    }

    /// Colour channel depths as `(r, g, b, a)`.
    pub fn color_bits(&self) -> (u8, u8, u8, u8) {
        (self.red_bits, self.green_bits, self.blue_bits, self.alpha_bits)
    }

    /// Whether `candidate` can serve a request for `self`.
    ///
    /// Colour depths must match exactly or the surface and context disagree on
    /// pixel format; depth, stencil and API version only need to be at least
    /// what was asked for.
    pub fn is_satisfied_by(&self, candidate: &SurfaceConfig) -> bool {
        candidate.color_bits() == self.color_bits()
            && candidate.depth_bits >= self.depth_bits
            && candidate.stencil_bits >= self.stencil_bits
            && candidate.api_version >= self.api_version
    }
}

impl Default for SurfaceConfig {
    /// RGB 8/8/8, no alpha, 16-bit depth, no stencil, API 2.0.
    fn default() -> Self {
        Self::rgb8(16, 0, ApiVersion::new(2, 0))
    }
}

impl fmt::Display for SurfaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba {}/{}/{}/{} depth {} stencil {} api {}",
            self.red_bits,
            self.green_bits,
            self.blue_bits,
            self.alpha_bits,
            self.depth_bits,
            self.stencil_bits,
            self.api_version,
        )
    }
}

/// Picks the first supported configuration that satisfies `requested`.
///
/// `supported` is expected in the display subsystem's preference order.
pub fn choose_config(
    requested: &SurfaceConfig,
    supported: &[SurfaceConfig],
) -> Result<SurfaceConfig, SurfaceError> {
    supported
        .iter()
        .find(|c| requested.is_satisfied_by(c))
        .copied()
        .ok_or(SurfaceError::ConfigMismatch {
            requested: *requested,
            supported: supported.len(),
        })
}
