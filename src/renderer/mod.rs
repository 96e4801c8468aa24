//! Scene rendering.
//!
//! [`SceneRenderer`] is the seam between the application context and the
//! GPU: the context only sizes the renderer and asks it to draw.
//! [`GpuRenderer`] implements it with wgpu, rasterizing the scene into a
//! supersampled HDR buffer, filtering that down to the output and
//! compositing the nav bar on top.

mod blit;
mod mesh_pass;
mod nav_overlay;
pub(crate) mod pipeline_util;
/// GPU uniform layouts.
pub mod uniforms;

use blit::BlitPass;
use mesh_pass::MeshPass;
use nav_overlay::NavOverlay;

use crate::camera::Camera;
use crate::error::StageError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::{
    scaled_target_size, RenderTarget, DEPTH_FORMAT, SCENE_COLOR_FORMAT,
};
use crate::nav::NavBar;
use crate::scene::Scene;
use crate::util::color::Color;

/// Something that can draw the scene into an output of a given size.
pub trait SceneRenderer {
    /// Resize the output and any internal draw buffers. Zero dimensions are
    /// recorded; drawing is skipped until the size is non-zero again.
    fn set_size(&mut self, width: u32, height: u32);

    /// Internal resolution multiplier over the output size.
    fn set_pixel_ratio(&mut self, ratio: f32);

    /// Draw one frame.
    fn draw(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        nav: &NavBar,
    ) -> Result<(), StageError>;
}

/// wgpu implementation of [`SceneRenderer`].
pub struct GpuRenderer {
    context: RenderContext,
    output_size: (u32, u32),
    pixel_ratio: f32,
    clear_color: wgpu::Color,

    color_target: RenderTarget,
    depth_target: RenderTarget,
    /// Final image when there is no surface to present to.
    headless_output: Option<RenderTarget>,

    mesh_pass: MeshPass,
    blit: BlitPass,
    nav_overlay: NavOverlay,
}

impl GpuRenderer {
    /// Build every pass for `context`, drawing at its current size with a
    /// pixel ratio of 1 until [`SceneRenderer::set_pixel_ratio`] is called.
    pub fn new(
        context: RenderContext,
        clear_color: Color,
    ) -> Result<Self, StageError> {
        let mut shader_composer = ShaderComposer::new()?;
        let output_size = context.size();
        let internal = scaled_target_size(
            output_size.0,
            output_size.1,
            1.0,
            context.max_texture_dimension(),
        );

        let color_target = RenderTarget::new(
            &context.device,
            "Scene Color",
            internal,
            SCENE_COLOR_FORMAT,
        );
        let depth_target = RenderTarget::new(
            &context.device,
            "Scene Depth",
            internal,
            DEPTH_FORMAT,
        );
        let headless_output = (!context.has_surface()).then(|| {
            RenderTarget::new(
                &context.device,
                "Headless Output",
                output_size,
                context.format(),
            )
        });

        let mesh_pass = MeshPass::new(&context, &mut shader_composer)?;
        let blit =
            BlitPass::new(&context, &mut shader_composer, &color_target.view)?;
        let nav_overlay = NavOverlay::new(&context, &mut shader_composer)?;

        let [r, g, b] = clear_color.to_linear();
        log::info!(
            "renderer ready: {}x{} output, {:?}",
            output_size.0,
            output_size.1,
            context.format()
        );

        Ok(Self {
            context,
            output_size,
            pixel_ratio: 1.0,
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
            color_target,
            depth_target,
            headless_output,
            mesh_pass,
            blit,
            nav_overlay,
        })
    }

    /// The underlying GPU context.
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Size of the supersampled scene buffers.
    pub fn internal_size(&self) -> (u32, u32) {
        self.color_target.size()
    }

    /// The last headless frame, if this renderer has no surface.
    pub fn headless_output(&self) -> Option<&wgpu::Texture> {
        self.headless_output.as_ref().map(|t| &t.texture)
    }

    /// Reconfigure the surface after it was lost or became outdated.
    pub fn reconfigure(&self) {
        self.context.configure_surface();
    }

    fn rebuild_targets(&mut self) {
        let (width, height) = self.output_size;
        if width == 0 || height == 0 {
            return;
        }
        let max = self.context.max_texture_dimension();
        let internal = scaled_target_size(width, height, self.pixel_ratio, max);
        if internal.0 < (width as f32 * self.pixel_ratio) as u32
            || internal.1 < (height as f32 * self.pixel_ratio) as u32
        {
            log::warn!(
                "pixel ratio {} clamped to device limit {max}",
                self.pixel_ratio
            );
        }

        if self.color_target.size() != internal {
            let device = &self.context.device;
            self.color_target =
                RenderTarget::new(device, "Scene Color", internal, SCENE_COLOR_FORMAT);
            self.depth_target =
                RenderTarget::new(device, "Scene Depth", internal, DEPTH_FORMAT);
            self.blit.set_source(device, &self.color_target.view);
            log::debug!(
                "scene targets {}x{} (pixel ratio {})",
                internal.0,
                internal.1,
                self.pixel_ratio
            );
        }

        if let Some(output) = &self.headless_output {
            if output.size() != self.output_size {
                self.headless_output = Some(RenderTarget::new(
                    &self.context.device,
                    "Headless Output",
                    self.output_size,
                    self.context.format(),
                ));
            }
        }
    }
}

impl SceneRenderer for GpuRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.output_size = (width, height);
        if width == 0 || height == 0 {
            log::debug!("output is zero-sized, drawing paused");
            return;
        }
        self.context.resize(width, height);
        self.rebuild_targets();
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            log::warn!("invalid pixel ratio {ratio}, using 1");
            1.0
        };
        self.rebuild_targets();
    }

    fn draw(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        nav: &NavBar,
    ) -> Result<(), StageError> {
        let (width, height) = self.output_size;
        if width == 0 || height == 0 {
            log::trace!("draw skipped: zero-sized output");
            return Ok(());
        }

        self.mesh_pass.prepare(&self.context, scene, camera);
        self.nav_overlay.prepare(&self.context.queue, nav, height);

        let (frame, output_view) = match &self.headless_output {
            Some(target) => (None, target.view.clone()),
            None => {
                let frame = self.context.get_next_frame()?;
                let view = frame
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                (Some(frame), view)
            }
        };

        let mut encoder = self.context.create_encoder();
        self.mesh_pass.render(
            &mut encoder,
            &self.color_target.view,
            &self.depth_target.view,
            self.clear_color,
            scene,
        );
        self.blit.render(&mut encoder, &output_view);
        self.nav_overlay.render(&mut encoder, &output_view);
        self.context.submit(encoder);

        if let Some(frame) = frame {
            frame.present();
        }
        Ok(())
    }
}
