//! Lit indexed-mesh pass for scene geometry.
//!
//! Geometry is immutable once a node is added, so each mesh is tessellated
//! and uploaded the first time it is drawn and cached by [`NodeId`].
//! Camera, lighting and per-node model uniforms are rewritten every frame.

use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use super::pipeline_util;
use super::uniforms::{CameraUniform, LightingUniform, ModelUniform};
use crate::camera::Camera;
use crate::error::StageError;
use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::scene::{Mesh, NodeId, Scene, Side, Transform, Vertex};

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Create an indexed-mesh render pipeline drawing into the scene targets.
fn create_mesh_pipeline(
    context: &RenderContext,
    label: &str,
    shader: &wgpu::ShaderModule,
    cull_mode: Option<wgpu::Face>,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        },
    );

    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::scene_color_target(),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

/// Buffers for one uploaded scene mesh.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    side: Side,
}

/// Draws every mesh of a [`Scene`] with one point light and ambient.
pub(crate) struct MeshPass {
    front_pipeline: wgpu::RenderPipeline,
    back_pipeline: wgpu::RenderPipeline,
    double_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    meshes: FxHashMap<NodeId, GpuMesh>,
}

impl MeshPass {
    pub(crate) fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, StageError> {
        let device = &context.device;
        let stages = wgpu::ShaderStages::VERTEX_FRAGMENT;

        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Mesh Frame Layout"),
                entries: &[uniform_buffer(0, stages), uniform_buffer(1, stages)],
            });
        let model_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Mesh Model Layout"),
                entries: &[uniform_buffer(0, stages)],
            });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Uniform"),
            size: size_of::<CameraUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let lighting_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Lighting Uniform"),
            size: size_of::<LightingUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Mesh Frame Bind Group"),
                layout: &frame_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: lighting_buffer.as_entire_binding(),
                    },
                ],
            });

        let shader = shader_composer.compose(
            device,
            "Mesh Shader",
            "raster/mesh.wgsl",
        )?;
        let layouts = [&frame_layout, &model_layout];
        let pipeline = |label, side: Side| {
            create_mesh_pipeline(context, label, &shader, side.cull_mode(), &layouts)
        };

        Ok(Self {
            front_pipeline: pipeline("Mesh Front", Side::Front),
            back_pipeline: pipeline("Mesh Back", Side::Back),
            double_pipeline: pipeline("Mesh Double", Side::Double),
            camera_buffer,
            lighting_buffer,
            frame_bind_group,
            model_layout,
            meshes: FxHashMap::default(),
        })
    }

    /// Upload any new meshes and write this frame's uniforms.
    pub(crate) fn prepare(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        camera: &Camera,
    ) {
        let queue = &context.queue;
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::from_camera(camera)]),
        );
        queue.write_buffer(
            &self.lighting_buffer,
            0,
            bytemuck::cast_slice(&[LightingUniform::from_scene(scene)]),
        );

        for (id, mesh, transform) in scene.meshes() {
            let uniform = ModelUniform::new(transform, mesh.material());
            if let Some(gpu) = self.meshes.get(&id) {
                queue.write_buffer(
                    &gpu.model_buffer,
                    0,
                    bytemuck::cast_slice(&[uniform]),
                );
            } else {
                let gpu = self.upload(&context.device, id, mesh, transform);
                let _ = self.meshes.insert(id, gpu);
            }
        }
    }

    fn upload(
        &self,
        device: &wgpu::Device,
        id: NodeId,
        mesh: &Mesh,
        transform: &Transform,
    ) -> GpuMesh {
        let data = mesh.geometry().tessellate();
        log::debug!(
            "uploading mesh {}: {} vertices, {} triangles",
            id.index(),
            data.vertices.len(),
            data.triangle_count()
        );

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertices"),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Indices"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let model_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Model Uniform"),
                contents: bytemuck::cast_slice(&[ModelUniform::new(
                    transform,
                    mesh.material(),
                )]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let model_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Model Bind Group"),
                layout: &self.model_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: model_buffer.as_entire_binding(),
                }],
            });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            model_buffer,
            model_bind_group,
            side: mesh.material().side,
        }
    }

    fn pipeline(&self, side: Side) -> &wgpu::RenderPipeline {
        match side {
            Side::Front => &self.front_pipeline,
            Side::Back => &self.back_pipeline,
            Side::Double => &self.double_pipeline,
        }
    }

    /// Clear the scene targets and draw every prepared mesh in scene order.
    pub(crate) fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        clear_color: wgpu::Color,
        scene: &Scene,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Mesh Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for (id, _, _) in scene.meshes() {
            let Some(gpu) = self.meshes.get(&id) else {
                continue;
            };
            if gpu.index_count == 0 {
                continue;
            }
            pass.set_pipeline(self.pipeline(gpu.side));
            pass.set_bind_group(1, &gpu.model_bind_group, &[]);
            pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            pass.set_index_buffer(
                gpu.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..gpu.index_count, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_vertex_struct() {
        let layout = vertex_layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }
}
