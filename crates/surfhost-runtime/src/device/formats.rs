use crate::surface::{ApiVersion, SurfaceConfig};

use super::SurfaceErrorAction;

/// API level reported for every wgpu adapter; wgpu's floor is GLES 3.0.
pub(crate) const WGPU_API_VERSION: ApiVersion = ApiVersion::new(3, 0);

/// Depth attachment formats offered, with their (depth, stencil) bit counts.
const DEPTH_FORMATS: [(Option<wgpu::TextureFormat>, u8, u8); 5] = [
    (None, 0, 0),
    (Some(wgpu::TextureFormat::Depth16Unorm), 16, 0),
    (Some(wgpu::TextureFormat::Depth24Plus), 24, 0),
    (Some(wgpu::TextureFormat::Depth24PlusStencil8), 24, 8),
    (Some(wgpu::TextureFormat::Depth32Float), 32, 0),
];

/// A supported configuration and the wgpu formats that realise it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub config: SurfaceConfig,
    pub color: wgpu::TextureFormat,
    pub depth: Option<wgpu::TextureFormat>,
}

/// Channel depths of a colour format as `(r, g, b, a)`.
///
/// An opaque surface composites as if alpha did not exist, so it reports
/// zero alpha bits.
pub(crate) fn color_bits(format: wgpu::TextureFormat, opaque: bool) -> Option<(u8, u8, u8, u8)> {
    use wgpu::TextureFormat as F;

    let (r, g, b, a) = match format {
        F::Bgra8Unorm | F::Bgra8UnormSrgb | F::Rgba8Unorm | F::Rgba8UnormSrgb => (8, 8, 8, 8),
        F::Rgb10a2Unorm => (10, 10, 10, 2),
        F::Rgba16Float => (16, 16, 16, 16),
        _ => return None,
    };
    Some((r, g, b, if opaque { 0 } else { a }))
}

pub(crate) fn is_opaque(mode: wgpu::CompositeAlphaMode) -> bool {
    matches!(mode, wgpu::CompositeAlphaMode::Opaque | wgpu::CompositeAlphaMode::Auto)
}

/// Picks a composite alpha mode, honouring whether the surface wants alpha.
pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    want_alpha: bool,
) -> wgpu::CompositeAlphaMode {
    use wgpu::CompositeAlphaMode as M;

    let preferred: &[M] = if want_alpha {
        &[M::PreMultiplied, M::PostMultiplied, M::Inherit]
    } else {
        &[M::Opaque]
    };

    preferred
        .iter()
        .find(|m| supported.contains(m))
        .or_else(|| supported.first())
        .copied()
        .unwrap_or(M::Auto)
}

/// Every (colour format × depth format) pairing the surface can offer, in
/// preference order: sRGB colour first when asked for, then by depth size.
pub(crate) fn enumerate_candidates(
    formats: &[wgpu::TextureFormat],
    opaque: bool,
    prefer_srgb: bool,
    api_version: ApiVersion,
) -> Vec<Candidate> {
    let mut colors: Vec<wgpu::TextureFormat> = formats.to_vec();
    if prefer_srgb {
        // Stable sort keeps the surface's own order within each group.
        colors.sort_by_key(|f| !f.is_srgb());
    }

    colors
        .into_iter()
        .filter_map(|color| color_bits(color, opaque).map(|bits| (color, bits)))
        .flat_map(|(color, (r, g, b, a))| {
            DEPTH_FORMATS.iter().map(move |&(depth, depth_bits, stencil_bits)| Candidate {
                config: SurfaceConfig {
                    red_bits: r,
                    green_bits: g,
                    blue_bits: b,
                    alpha_bits: a,
                    depth_bits,
                    stencil_bits,
                    api_version,
                },
                color,
                depth,
            })
        })
        .collect()
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: (u32, u32),
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.0 > 0 && size.1 > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::choose_config;
    use wgpu::{CompositeAlphaMode as M, TextureFormat as F};

    #[test]
    fn opaque_formats_drop_alpha() {
        assert_eq!(color_bits(F::Bgra8UnormSrgb, true), Some((8, 8, 8, 0)));
        assert_eq!(color_bits(F::Bgra8UnormSrgb, false), Some((8, 8, 8, 8)));
        assert_eq!(color_bits(F::R8Unorm, true), None);
    }

    #[test]
    fn alpha_mode_preference() {
        assert_eq!(choose_alpha_mode(&[M::PreMultiplied, M::Opaque], false), M::Opaque);
        assert_eq!(choose_alpha_mode(&[M::Opaque, M::PreMultiplied], true), M::PreMultiplied);
        assert_eq!(choose_alpha_mode(&[M::Inherit], false), M::Inherit);
        assert_eq!(choose_alpha_mode(&[], false), M::Auto);
    }

    #[test]
    fn srgb_candidates_come_first() {
        let c = enumerate_candidates(&[F::Bgra8Unorm, F::Bgra8UnormSrgb], true, true, WGPU_API_VERSION);
        assert_eq!(c.len(), 2 * DEPTH_FORMATS.len());
        assert_eq!(c[0].color, F::Bgra8UnormSrgb);
        assert_eq!(c[DEPTH_FORMATS.len()].color, F::Bgra8Unorm);
    }

    #[test]
    fn default_request_gets_depth16_on_srgb() {
        let c = enumerate_candidates(&[F::Bgra8Unorm, F::Bgra8UnormSrgb], true, true, WGPU_API_VERSION);
        let configs: Vec<_> = c.iter().map(|c| c.config).collect();

        let chosen = choose_config(&SurfaceConfig::default(), &configs).unwrap();
        let candidate = c.iter().find(|c| c.config == chosen).unwrap();
        assert_eq!(candidate.color, F::Bgra8UnormSrgb);
        assert_eq!(candidate.depth, Some(F::Depth16Unorm));
    }

    #[test]
    fn stencil_request_selects_combined_format() {
        let c = enumerate_candidates(&[F::Rgba8Unorm], true, false, WGPU_API_VERSION);
        let configs: Vec<_> = c.iter().map(|c| c.config).collect();

        let want = SurfaceConfig::rgb8(16, 8, ApiVersion::new(2, 0));
        let chosen = choose_config(&want, &configs).unwrap();
        let candidate = c.iter().find(|c| c.config == chosen).unwrap();
        assert_eq!(candidate.depth, Some(F::Depth24PlusStencil8));
    }
}
