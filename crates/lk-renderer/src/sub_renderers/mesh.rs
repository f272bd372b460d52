//! Bone mesh renderer

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use lk_core::BoneMesh;

use crate::pipeline::{
    PipelineBuilder, RenderTargets, create_uniform_bind_group, create_uniform_bind_group_layout,
};
use crate::vertex::MeshVertex;

/// Per-bone uniform: transform and color
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MeshInstance {
    /// Model transformation matrix.
    pub model: [[f32; 4]; 4],
    /// Surface color (RGBA).
    pub color: [f32; 4],
}

impl Default for MeshInstance {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color: [0.7, 0.7, 0.7, 1.0],
        }
    }
}

/// Expand an indexed bone into flat-shaded triangles
pub fn flat_vertices(mesh: &BoneMesh) -> Vec<MeshVertex> {
    let mut vertices = Vec::with_capacity(mesh.indices.len());

    for (i, chunk) in mesh.indices.chunks_exact(3).enumerate() {
        let normal = mesh.normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]);
        for &idx in chunk {
            let Some(position) = mesh.vertices.get(idx as usize) else {
                continue;
            };
            vertices.push(MeshVertex {
                position: *position,
                normal,
            });
        }
    }

    vertices
}

/// GPU buffers of one bone
pub struct MeshData {
    /// Vertex buffer containing flat-shaded triangles.
    pub vertex_buffer: wgpu::Buffer,
    /// Number of vertices.
    pub vertex_count: u32,
    /// Instance data (transform, color).
    pub instance: MeshInstance,
    /// GPU buffer for instance data.
    pub instance_buffer: wgpu::Buffer,
    /// Bind group over `instance_buffer`.
    pub bind_group: wgpu::BindGroup,
}

impl MeshData {
    /// Update instance color
    pub fn update_color(&mut self, queue: &wgpu::Queue, color: [f32; 4]) {
        self.instance.color = color;
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&[self.instance]),
        );
    }
}

/// Lit, double-sided bone surface renderer
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    instance_bind_group_layout: wgpu::BindGroupLayout,
    light_bind_group_layout: wgpu::BindGroupLayout,
}

impl MeshRenderer {
    /// Creates a new mesh renderer.
    pub fn new(
        device: &wgpu::Device,
        targets: RenderTargets,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let camera_bind_group =
            create_uniform_bind_group(device, camera_bind_group_layout, camera_buffer, "Mesh Camera");
        let instance_bind_group_layout = create_uniform_bind_group_layout(device, "Mesh Instance");
        let light_bind_group_layout = create_uniform_bind_group_layout(device, "Light");

        let pipeline = PipelineBuilder::new(
            "Mesh",
            include_str!("../shaders/mesh.wgsl"),
            targets,
            &[
                camera_bind_group_layout,
                &instance_bind_group_layout,
                &light_bind_group_layout,
            ],
        )
        .vertex_layouts(vec![MeshVertex::layout()])
        .build(device);

        Self {
            pipeline,
            camera_bind_group,
            instance_bind_group_layout,
            light_bind_group_layout,
        }
    }

    /// Layout the light bind group must be created with
    pub fn light_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.light_bind_group_layout
    }

    /// Upload a bone mesh
    pub fn upload(&self, device: &wgpu::Device, mesh: &BoneMesh) -> MeshData {
        let vertices = flat_vertices(mesh);
        tracing::info!(
            "Uploading {} ({}): {} GPU vertices",
            mesh.kind.name(),
            mesh.name,
            vertices.len()
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", mesh.kind.name())),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance = MeshInstance {
            model: mesh.transform.to_cols_array_2d(),
            color: mesh.color,
        };
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", mesh.kind.name())),
            contents: bytemuck::cast_slice(&[instance]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = create_uniform_bind_group(
            device,
            &self.instance_bind_group_layout,
            &instance_buffer,
            "Mesh Instance",
        );

        MeshData {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            instance,
            instance_buffer,
            bind_group,
        }
    }

    /// Draw one bone
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        mesh: &'a MeshData,
        light_bind_group: &'a wgpu::BindGroup,
    ) {
        if mesh.vertex_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &mesh.bind_group, &[]);
        render_pass.set_bind_group(2, light_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.draw(0..mesh.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lk_core::BoneKind;

    #[test]
    fn test_flat_vertices_use_face_normals() {
        let mut mesh = BoneMesh::new(BoneKind::Femur, "quad");
        mesh.vertices = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        mesh.indices = vec![0, 1, 2, 0, 2, 3];
        mesh.normals = vec![[0.0, 0.0, 1.0], [0.0, 0.0, -1.0]];

        let vertices = flat_vertices(&mesh);

        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[2].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[3].normal, [0.0, 0.0, -1.0]);
        assert_eq!(vertices[5].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_missing_normals_default_to_z() {
        let mut mesh = BoneMesh::new(BoneKind::Tibia, "tri");
        mesh.vertices = vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        mesh.indices = vec![0, 1, 2];

        let vertices = flat_vertices(&mesh);
        assert!(vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }
}
