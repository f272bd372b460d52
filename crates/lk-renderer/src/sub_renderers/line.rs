//! Axis line renderer
//!
//! Each line segment is one instance; the vertex shader picks the start or
//! end point from the vertex index.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::constants::instances;
use crate::instanced::InstanceBuffer;
use crate::pipeline::{PipelineBuilder, RenderTargets, create_uniform_bind_group};

/// Line segment instance data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LineInstance {
    /// Start point (w unused).
    pub start: [f32; 4],
    /// End point (w unused).
    pub end: [f32; 4],
    /// Line color (RGBA).
    pub color: [f32; 4],
}

impl LineInstance {
    /// Creates a new line instance.
    pub fn new(start: Vec3, end: Vec3, color: [f32; 4]) -> Self {
        Self {
            start: start.extend(1.0).to_array(),
            end: end.extend(1.0).to_array(),
            color,
        }
    }
}

/// Renderer for anatomical axis lines
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
    instances: InstanceBuffer<LineInstance>,
    bind_group: wgpu::BindGroup,
}

impl LineRenderer {
    /// Creates a new line renderer.
    pub fn new(
        device: &wgpu::Device,
        targets: RenderTargets,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_uniform_bind_group(device, camera_bind_group_layout, camera_buffer, "Line Camera");

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 32,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        };

        let pipeline = PipelineBuilder::new(
            "Line",
            include_str!("../shaders/line.wgsl"),
            targets,
            &[camera_bind_group_layout],
        )
        .vertex_layouts(vec![instance_layout])
        .topology(wgpu::PrimitiveTopology::LineList)
        .build(device);

        let instances = InstanceBuffer::new(device, "Line", instances::MAX_LINES);

        Self {
            pipeline,
            instances,
            bind_group,
        }
    }

    /// Replace all lines
    pub fn update_instances(&mut self, queue: &wgpu::Queue, instances: &[LineInstance]) {
        self.instances.update(queue, instances);
    }

    /// Remove all lines
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Number of lines drawn
    pub fn count(&self) -> u32 {
        self.instances.count()
    }

    /// Draws all lines.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.instances.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instances.slice());
        render_pass.draw(0..2, 0..self.instances.count());
    }
}
