use super::{SurfaceErrorAction, SurfaceSize};

/// Bits per color channel of an uncompressed color format.
///
/// Returns `None` for depth/stencil, compressed and planar formats.
pub(crate) fn channel_bits(format: wgpu::TextureFormat) -> Option<u32> {
    if format.is_depth_stencil_format() || format.is_compressed() {
        return None;
    }
    let bytes = format.block_copy_size(None)?;
    let components = u32::from(format.components());
    if components == 0 {
        return None;
    }
    Some(bytes * 8 / components)
}

/// Whether the adapter can present to a surface with these capabilities.
///
/// An adapter from another backend than the surface reports empty lists.
pub(crate) fn is_presentable(caps: &wgpu::SurfaceCapabilities) -> bool {
    !caps.formats.is_empty() && !caps.present_modes.is_empty()
}

/// Picks the first supported format with at least `min_bits` per channel and
/// three or more color components.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
    min_bits: u8,
) -> Option<wgpu::TextureFormat> {
    let qualifies = |f: &wgpu::TextureFormat| {
        f.components() >= 3 && channel_bits(*f).is_some_and(|b| b >= u32::from(min_bits))
    };

    if prefer_srgb {
        if let Some(f) = formats.iter().find(|f| f.is_srgb() && qualifies(f)) {
            return Some(*f);
        }
    }

    formats.iter().copied().find(|f| qualifies(f))
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Applies `new_size` to the surface configuration.
///
/// wgpu does not support configuring a surface with a 0x0 size; in that case
/// the configuration is left untouched and `false` is returned.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    new_size: SurfaceSize,
) -> bool {
    if new_size.is_empty() {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
    true
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if config.width > 0 && config.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
