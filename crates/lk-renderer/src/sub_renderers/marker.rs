//! Landmark marker renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::constants::{instances, marker as constants};
use crate::instanced::InstanceBuffer;
use crate::pipeline::{DepthMode, PipelineBuilder, RenderTargets, create_uniform_bind_group};
use crate::vertex::PositionVertex;

/// Marker instance data - passed as vertex instance
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    /// Marker center position in world space.
    pub position: [f32; 3],
    /// Marker sphere radius.
    pub radius: f32,
    /// Marker color (RGBA).
    pub color: [f32; 4],
}

impl MarkerInstance {
    /// Creates a new marker instance.
    pub fn new(position: Vec3, radius: f32, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            radius,
            color,
        }
    }
}

fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MarkerInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    }
}

/// Sphere renderer for landmarks
pub struct MarkerRenderer {
    pipeline: wgpu::RenderPipeline,
    /// Pipeline for highlighted markers (always on top, no depth test)
    highlight_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instances: InstanceBuffer<MarkerInstance>,
    highlighted: InstanceBuffer<MarkerInstance>,
    bind_group: wgpu::BindGroup,
}

impl MarkerRenderer {
    /// Creates a new marker renderer.
    pub fn new(
        device: &wgpu::Device,
        targets: RenderTargets,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_uniform_bind_group(device, camera_bind_group_layout, camera_buffer, "Marker Camera");

        let pipeline = PipelineBuilder::new(
            "Marker",
            include_str!("../shaders/marker.wgsl"),
            targets,
            &[camera_bind_group_layout],
        )
        .vertex_layouts(vec![PositionVertex::layout(), instance_layout()])
        .cull_back_faces()
        .build(device);

        let highlight_pipeline = PipelineBuilder::new(
            "Highlighted Marker",
            include_str!("../shaders/marker.wgsl"),
            targets,
            &[camera_bind_group_layout],
        )
        .vertex_layouts(vec![PositionVertex::layout(), instance_layout()])
        .cull_back_faces()
        .depth(DepthMode::Overlay)
        .build(device);

        let (vertices, indices) = generate_sphere(constants::SEGMENTS, constants::RINGS);
        let index_count = indices.len() as u32;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            highlight_pipeline,
            vertex_buffer,
            index_buffer,
            index_count,
            instances: InstanceBuffer::new(device, "Marker", instances::MAX_MARKERS),
            highlighted: InstanceBuffer::new(device, "Highlighted Marker", instances::MAX_MARKERS),
            bind_group,
        }
    }

    /// Update depth-tested markers
    pub fn update_instances(&mut self, queue: &wgpu::Queue, instances: &[MarkerInstance]) {
        self.instances.update(queue, instances);
    }

    /// Update markers drawn over the bones (hovered or dragged)
    pub fn update_highlighted(&mut self, queue: &wgpu::Queue, instances: &[MarkerInstance]) {
        self.highlighted.update(queue, instances);
    }

    /// Clear all markers
    pub fn clear(&mut self) {
        self.instances.clear();
        self.highlighted.clear();
    }

    fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        pipeline: &'a wgpu::RenderPipeline,
        instances: &'a InstanceBuffer<MarkerInstance>,
    ) {
        if instances.is_empty() {
            return;
        }
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, instances.slice());
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..instances.count());
    }

    /// Renders all marker instances.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        self.draw(render_pass, &self.pipeline, &self.instances);
        self.draw(render_pass, &self.highlight_pipeline, &self.highlighted);
    }
}

/// Generate a unit sphere mesh
fn generate_sphere(segments: u32, rings: u32) -> (Vec<PositionVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let (ring_radius, y) = phi.sin_cos();

        for seg in 0..=segments {
            let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
            vertices.push(PositionVertex {
                position: [ring_radius * theta.cos(), y, ring_radius * theta.sin()],
            });
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;
            indices.extend_from_slice(&[current, next, current + 1, current + 1, next, next + 1]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_on_unit_sphere() {
        let (vertices, indices) = generate_sphere(8, 6);
        assert_eq!(vertices.len(), 9 * 7);
        assert_eq!(indices.len(), 8 * 6 * 6);
        for v in &vertices {
            assert!((Vec3::from(v.position).length() - 1.0).abs() < 1e-5);
        }
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }
}
