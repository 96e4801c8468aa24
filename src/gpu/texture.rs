//! Off-screen render-target textures.

/// Format of the supersampled scene color buffer.
pub const SCENE_COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
/// Format of the scene depth buffer.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A render-target texture and its default view.
///
/// Created with `RENDER_ATTACHMENT | TEXTURE_BINDING | COPY_SRC` so it can
/// be drawn into, then sampled by a later pass or read back.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    /// Create a new render-target texture with the given dimensions and
    /// format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        (width, height): (u32, u32),
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Texture size `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

/// Internal draw-buffer size for a surface of `width × height` at
/// `pixel_ratio`, scaled down uniformly so neither edge exceeds
/// `max_dimension`. Never returns a zero edge.
pub fn scaled_target_size(
    width: u32,
    height: u32,
    pixel_ratio: f32,
    max_dimension: u32,
) -> (u32, u32) {
    let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    };
    let mut w = width as f32 * ratio;
    let mut h = height as f32 * ratio;
    let longest = w.max(h);
    let max = max_dimension.max(1) as f32;
    if longest > max {
        let fit = max / longest;
        w *= fit;
        h *= fit;
    }
    (
        (w.round() as u32).clamp(1, max_dimension.max(1)),
        (h.round() as u32).clamp(1, max_dimension.max(1)),
    )
}
