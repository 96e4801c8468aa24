//! Nav bar overlay composited over the final output.

use super::uniforms::NavUniform;
use crate::error::StageError;
use crate::gpu::pipeline_helpers::{create_screen_space_pipeline, uniform_buffer};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::nav::NavBar;

/// Alpha-blended quad spanning the output's width.
pub(crate) struct NavOverlay {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    visible: bool,
}

impl NavOverlay {
    pub(crate) fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, StageError> {
        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Nav Overlay Layout"),
                entries: &[uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
            },
        );
        let uniform_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Nav Uniform"),
            size: size_of::<NavUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Nav Overlay Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = shader_composer.compose(
            &context.device,
            "Nav Overlay Shader",
            "screen/nav_overlay.wgsl",
        )?;
        let pipeline = create_screen_space_pipeline(
            &context.device,
            "Nav Overlay",
            &shader,
            context.format(),
            Some(wgpu::BlendState::ALPHA_BLENDING),
            &[&layout],
        );

        Ok(Self {
            pipeline,
            uniform_buffer,
            bind_group,
            visible: false,
        })
    }

    /// Write the bar geometry for an output `output_height` pixels tall.
    pub(crate) fn prepare(
        &mut self,
        queue: &wgpu::Queue,
        nav: &NavBar,
        output_height: u32,
    ) {
        match NavUniform::from_nav(nav, output_height) {
            Some(uniform) => {
                queue.write_buffer(
                    &self.uniform_buffer,
                    0,
                    bytemuck::cast_slice(&[uniform]),
                );
                self.visible = true;
            }
            None => self.visible = false,
        }
    }

    pub(crate) fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
    ) {
        if !self.visible {
            return;
        }
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Nav Overlay Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..6, 0..1);
    }
}
