//! Translate gizmo for dragging the captured landmark

pub mod collision;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use lk_core::Ray;
use wgpu::util::DeviceExt;

use crate::constants::gizmo as constants;
use crate::pipeline::{DepthMode, PipelineBuilder, RenderTargets, create_uniform_bind_group};
use crate::vertex::mat4_instance_attributes;

pub use collision::ray_cylinder_intersection;

/// Which gizmo handle is hovered or dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoAxis {
    /// No handle
    #[default]
    None,
    /// X handle
    X,
    /// Y handle
    Y,
    /// Z handle
    Z,
}

impl GizmoAxis {
    /// Handles in drawing order
    pub const HANDLES: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    /// Shader-side index, -1 for none
    pub fn to_index(&self) -> i32 {
        match self {
            GizmoAxis::None => -1,
            GizmoAxis::X => 0,
            GizmoAxis::Y => 1,
            GizmoAxis::Z => 2,
        }
    }

    /// Unit world direction of the handle
    pub fn direction(&self) -> Vec3 {
        match self {
            GizmoAxis::None => Vec3::ZERO,
            GizmoAxis::X => Vec3::X,
            GizmoAxis::Y => Vec3::Y,
            GizmoAxis::Z => Vec3::Z,
        }
    }
}

/// Gizmo instance data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GizmoInstance {
    /// Placement at the landmark position.
    pub transform: [[f32; 4]; 4],
    /// Size multiplier before distance scaling.
    pub scale: f32,
    /// -1 = none, 0 = X, 1 = Y, 2 = Z.
    pub highlighted_axis: f32,
    /// Screen-size factor applied per camera distance.
    pub distance_scale: f32,
    /// Padding for alignment.
    pub _pad: f32,
}

impl Default for GizmoInstance {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY.to_cols_array_2d(),
            scale: 1.0,
            highlighted_axis: -1.0,
            distance_scale: constants::DISTANCE_SCALE,
            _pad: 0.0,
        }
    }
}

/// Gizmo vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct GizmoVertex {
    position: [f32; 3],
    color: [f32; 4],
    axis_id: u32,
}

/// Translate gizmo renderer
pub struct GizmoRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    visible: bool,
    highlighted_axis: GizmoAxis,
    position: Vec3,
    instance: GizmoInstance,
}

impl GizmoRenderer {
    /// Creates a new gizmo renderer with arrows in `axis_colors` (X, Y, Z).
    pub fn new(
        device: &wgpu::Device,
        targets: RenderTargets,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        axis_colors: [[f32; 4]; 3],
    ) -> Self {
        let bind_group =
            create_uniform_bind_group(device, camera_bind_group_layout, camera_buffer, "Gizmo Camera");

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GizmoVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 28,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        };

        let mat4_attrs = mat4_instance_attributes(3);
        let instance_attrs = [
            mat4_attrs[0],
            mat4_attrs[1],
            mat4_attrs[2],
            mat4_attrs[3],
            wgpu::VertexAttribute {
                offset: 64,
                shader_location: 7,
                format: wgpu::VertexFormat::Float32x4,
            },
        ];
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GizmoInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &instance_attrs,
        };

        let pipeline = PipelineBuilder::new(
            "Gizmo",
            include_str!("../../shaders/gizmo.wgsl"),
            targets,
            &[camera_bind_group_layout],
        )
        .vertex_layouts(vec![vertex_layout, instance_layout])
        .depth(DepthMode::Overlay)
        .build(device);

        let (vertices, indices) = generate_translation_gizmo(axis_colors);
        let index_count = indices.len() as u32;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Gizmo Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Gizmo Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance = GizmoInstance::default();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Gizmo Instance Buffer"),
            contents: bytemuck::cast_slice(&[instance]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count,
            instance_buffer,
            bind_group,
            visible: false,
            highlighted_axis: GizmoAxis::None,
            position: Vec3::ZERO,
            instance,
        }
    }

    /// Whether the gizmo is drawn
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Gizmo origin
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Show the gizmo at `position`
    pub fn show(&mut self, queue: &wgpu::Queue, position: Vec3, scale: f32) {
        self.visible = true;
        self.position = position;
        self.instance.transform = Mat4::from_translation(position).to_cols_array_2d();
        self.instance.scale = scale;
        self.update_buffer(queue);
    }

    /// Hide the gizmo
    pub fn hide(&mut self) {
        self.visible = false;
        self.highlighted_axis = GizmoAxis::None;
        self.instance.highlighted_axis = -1.0;
    }

    /// Set highlighted handle
    pub fn set_highlighted(&mut self, queue: &wgpu::Queue, axis: GizmoAxis) {
        if self.highlighted_axis == axis {
            return;
        }
        self.highlighted_axis = axis;
        self.instance.highlighted_axis = axis.to_index() as f32;
        self.update_buffer(queue);
    }

    fn update_buffer(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&[self.instance]));
    }

    /// Draws the gizmo when visible.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if !self.visible {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Closest handle hit by `ray` for a gizmo at `gizmo_pos` drawn at world size `scale`
pub fn hit_test(ray: &Ray, gizmo_pos: Vec3, scale: f32) -> GizmoAxis {
    let handle_radius = constants::HIT_RADIUS_MULTIPLIER * scale;
    let handle_length = constants::ARROW_LENGTH * scale;

    GizmoAxis::HANDLES
        .into_iter()
        .filter_map(|axis| {
            ray_cylinder_intersection(
                ray.origin,
                ray.direction,
                gizmo_pos,
                gizmo_pos + axis.direction() * handle_length,
                handle_radius,
            )
            .map(|t| (axis, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(axis, _)| axis)
        .unwrap_or_default()
}

/// Generate translation gizmo geometry (3 arrows)
fn generate_translation_gizmo(axis_colors: [[f32; 4]; 3]) -> (Vec<GizmoVertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let segments = constants::SEGMENTS;
    let shaft_end = constants::ARROW_LENGTH - constants::HEAD_LENGTH;

    for (axis_id, color) in axis_colors.into_iter().enumerate() {
        // Arrows are built along +Y and rotated onto their axis
        let rotation = match axis_id {
            0 => Mat4::from_rotation_z(-std::f32::consts::FRAC_PI_2),
            2 => Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2),
            _ => Mat4::IDENTITY,
        };
        let shaft_base = vertices.len() as u32;
        let mut push = |p: Vec3| {
            vertices.push(GizmoVertex {
                position: rotation.transform_point3(p).into(),
                color,
                axis_id: axis_id as u32,
            });
            vertices.len() as u32 - 1
        };

        let ring = |i: u32, radius: f32| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            (angle.cos() * radius, angle.sin() * radius)
        };

        // Shaft
        for i in 0..=segments {
            let (x, z) = ring(i, constants::SHAFT_RADIUS);
            push(Vec3::new(x, 0.0, z));
            push(Vec3::new(x, shaft_end, z));
        }
        for i in 0..segments {
            let i0 = shaft_base + i * 2;
            let i1 = i0 + 1;
            let i2 = i0 + 2;
            let i3 = i0 + 3;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }

        // Cone
        let tip = push(Vec3::new(0.0, constants::ARROW_LENGTH, 0.0));
        for i in 0..=segments {
            let (x, z) = ring(i, constants::HEAD_RADIUS);
            push(Vec3::new(x, shaft_end, z));
        }
        let center = push(Vec3::new(0.0, shaft_end, 0.0));
        for i in 0..segments {
            let i0 = tip + 1 + i;
            let i1 = i0 + 1;
            indices.extend_from_slice(&[tip, i1, i0]);
            indices.extend_from_slice(&[center, i0, i1]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_picks_handle() {
        let ray = Ray::new(Vec3::new(0.5, 0.0, 10.0), Vec3::NEG_Z);
        assert_eq!(hit_test(&ray, Vec3::ZERO, 1.0), GizmoAxis::X);

        let ray = Ray::new(Vec3::new(10.0, 0.5, 0.0), Vec3::NEG_X);
        assert_eq!(hit_test(&ray, Vec3::ZERO, 1.0), GizmoAxis::Y);
    }

    #[test]
    fn test_hit_test_respects_scale_and_position() {
        let pos = Vec3::new(5.0, 5.0, 5.0);
        let ray = Ray::new(Vec3::new(5.0, 5.0, 10.0), Vec3::NEG_X);
        assert_eq!(hit_test(&ray, pos, 1.0), GizmoAxis::None);

        let ray = Ray::new(Vec3::new(5.0, 20.0, 9.0), Vec3::NEG_Y);
        assert_eq!(hit_test(&ray, pos, 1.0), GizmoAxis::None);
        assert_eq!(hit_test(&ray, pos, 10.0), GizmoAxis::Z);
    }

    #[test]
    fn test_gizmo_geometry_indices_in_range() {
        let (vertices, indices) = generate_translation_gizmo([[1.0; 4]; 3]);
        assert!(!indices.is_empty());
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        assert!(vertices.iter().any(|v| v.axis_id == 2));
    }
}
