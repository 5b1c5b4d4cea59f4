use hero_core::BufferSize;

/// Multisampled color target resolved into the swapchain texture each frame.
pub(crate) struct MsaaTarget {
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

pub(crate) fn create_msaa_target(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    size: BufferSize,
    sample_count: u32,
) -> Option<MsaaTarget> {
    if sample_count <= 1 {
        return None;
    }
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("msaa_color"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    Some(MsaaTarget { texture, view })
}

/// Prefer an sRGB swapchain format; otherwise the caller renders through an
/// sRGB view of whatever the surface offers.
pub(crate) fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| {
            matches!(
                f,
                wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
            )
        })
        .or_else(|| formats.first().copied())
}

pub(crate) fn pick_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    transparent: bool,
) -> Option<wgpu::CompositeAlphaMode> {
    if transparent && modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
        return Some(wgpu::CompositeAlphaMode::PreMultiplied);
    }
    modes.first().copied()
}
