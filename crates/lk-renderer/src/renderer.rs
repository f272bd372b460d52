//! Main renderer combining all sub-renderers

use std::collections::HashMap;

use glam::Vec3;
use lk_core::{BoneKind, BoneMesh, Ray};
use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::config::RendererConfig;
use crate::constants::gizmo::DISTANCE_SCALE;
use crate::constants::viewport::DEPTH_FORMAT;
use crate::light::DirectionalLight;
use crate::pipeline::{RenderTargets, create_uniform_bind_group, create_uniform_bind_group_layout};
use crate::sub_renderers::gizmo::{self, GizmoAxis, GizmoRenderer};
use crate::sub_renderers::{
    LineInstance, LineRenderer, MarkerInstance, MarkerRenderer, MeshData, MeshRenderer,
};

/// Main renderer
pub struct Renderer {
    camera: Camera,
    camera_buffer: wgpu::Buffer,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,

    #[allow(dead_code)]
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,

    mesh_renderer: MeshRenderer,
    line_renderer: LineRenderer,
    marker_renderer: MarkerRenderer,
    gizmo_renderer: GizmoRenderer,

    bones: HashMap<BoneKind, MeshData>,

    show_bones: bool,
    show_lines: bool,
    show_markers: bool,
    gizmo_scale: f32,

    clear_color: wgpu::Color,
    sample_count: u32,
    format: wgpu::TextureFormat,
}

impl Renderer {
    /// Create a renderer targeting `format` at `width` x `height`
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: &RendererConfig,
    ) -> Self {
        let sample_count = config.viewport.sample_count();
        let camera = Camera::from_config(&config.camera, width.max(1) as f32 / height.max(1) as f32);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group_layout = create_uniform_bind_group_layout(device, "Camera");

        let depth_view = Self::create_depth_view(device, width, height, sample_count);
        let msaa_view = Self::create_msaa_view(device, format, width, height, sample_count);
        let targets = RenderTargets {
            color: format,
            depth: DEPTH_FORMAT,
            samples: sample_count,
        };

        let mesh_renderer = MeshRenderer::new(
            device,
            targets,
            &camera_bind_group_layout,
            &camera_buffer,
        );
        let line_renderer = LineRenderer::new(
            device,
            targets,
            &camera_bind_group_layout,
            &camera_buffer,
        );
        let marker_renderer = MarkerRenderer::new(
            device,
            targets,
            &camera_bind_group_layout,
            &camera_buffer,
        );
        let gizmo_renderer = GizmoRenderer::new(
            device,
            targets,
            &camera_bind_group_layout,
            &camera_buffer,
            config.gizmo.axis_colors(),
        );

        let light = DirectionalLight::from_config(&config.lighting);
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[light.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_bind_group = create_uniform_bind_group(
            device,
            mesh_renderer.light_bind_group_layout(),
            &light_buffer,
            "Light",
        );

        tracing::info!(
            "Renderer created: {}x{}, {:?}, {}x MSAA",
            width,
            height,
            format,
            sample_count
        );

        Self {
            camera,
            camera_buffer,
            depth_view,
            msaa_view,
            light_buffer,
            light_bind_group,
            mesh_renderer,
            line_renderer,
            marker_renderer,
            gizmo_renderer,
            bones: HashMap::new(),
            show_bones: true,
            show_lines: true,
            show_markers: true,
            gizmo_scale: if config.gizmo.enabled {
                config.gizmo.scale
            } else {
                0.0
            },
            clear_color: config.clear_color(),
            sample_count,
            format,
        }
    }

    // ========== Camera accessors ==========

    /// Get a reference to the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Get a mutable reference to the camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    // ========== Display options ==========

    /// Whether bones are drawn.
    pub fn show_bones(&self) -> bool {
        self.show_bones
    }

    /// Set whether bones are drawn.
    pub fn set_show_bones(&mut self, show: bool) {
        self.show_bones = show;
    }

    /// Whether axis lines are drawn.
    pub fn show_lines(&self) -> bool {
        self.show_lines
    }

    /// Set whether axis lines are drawn.
    pub fn set_show_lines(&mut self, show: bool) {
        self.show_lines = show;
    }

    /// Whether landmark markers are drawn.
    pub fn show_markers(&self) -> bool {
        self.show_markers
    }

    /// Set whether landmark markers are drawn.
    pub fn set_show_markers(&mut self, show: bool) {
        self.show_markers = show;
    }

    /// Output texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn create_depth_view(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_msaa_view(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count <= 1 {
            return None;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Color Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    /// Resize render targets.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.update_aspect(width as f32 / height as f32);
        self.depth_view = Self::create_depth_view(device, width, height, self.sample_count);
        self.msaa_view =
            Self::create_msaa_view(device, self.format, width, height, self.sample_count);
    }

    // ========== Bones ==========

    /// Upload a bone, replacing any bone of the same kind.
    pub fn set_bone(&mut self, device: &wgpu::Device, mesh: &BoneMesh) {
        let data = self.mesh_renderer.upload(device, mesh);
        if self.bones.insert(mesh.kind, data).is_some() {
            tracing::info!("Replaced {} mesh", mesh.kind.name());
        }
    }

    /// Recolor a loaded bone.
    pub fn set_bone_color(&mut self, queue: &wgpu::Queue, kind: BoneKind, color: [f32; 4]) {
        if let Some(data) = self.bones.get_mut(&kind) {
            data.update_color(queue, color);
        }
    }

    // ========== Landmarks and lines ==========

    /// Update depth-tested and highlighted landmark markers.
    pub fn update_markers(
        &mut self,
        queue: &wgpu::Queue,
        markers: &[MarkerInstance],
        highlighted: &[MarkerInstance],
    ) {
        self.marker_renderer.update_instances(queue, markers);
        self.marker_renderer.update_highlighted(queue, highlighted);
    }

    /// Replace the axis lines.
    pub fn update_lines(&mut self, queue: &wgpu::Queue, lines: &[LineInstance]) {
        self.line_renderer.update_instances(queue, lines);
    }

    // ========== Gizmo ==========

    /// Show the gizmo at a landmark position.
    pub fn show_gizmo(&mut self, queue: &wgpu::Queue, position: Vec3) {
        if self.gizmo_scale <= 0.0 {
            return;
        }
        self.gizmo_renderer.show(queue, position, self.gizmo_scale);
    }

    /// Hide the gizmo.
    pub fn hide_gizmo(&mut self) {
        self.gizmo_renderer.hide();
    }

    /// Highlight a gizmo handle.
    pub fn set_gizmo_highlight(&mut self, queue: &wgpu::Queue, axis: GizmoAxis) {
        self.gizmo_renderer.set_highlighted(queue, axis);
    }

    /// Handle under `ray`, sized the way the gizmo shader sizes it.
    pub fn gizmo_hit_test(&self, ray: &Ray) -> GizmoAxis {
        if !self.gizmo_renderer.visible() {
            return GizmoAxis::None;
        }
        let gizmo_pos = self.gizmo_renderer.position();
        let camera_distance = (self.camera.position - gizmo_pos).length();
        let scale = self.gizmo_scale * camera_distance * DISTANCE_SCALE;
        gizmo::hit_test(ray, gizmo_pos, scale)
    }

    /// Render the scene.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.uniform()]),
        );

        let ops = wgpu::Operations {
            load: wgpu::LoadOp::Clear(self.clear_color),
            store: wgpu::StoreOp::Store,
        };
        let color_attachment = match &self.msaa_view {
            // Render to the multisample texture, resolve to the output
            Some(msaa_view) => wgpu::RenderPassColorAttachment {
                view: msaa_view,
                resolve_target: Some(view),
                ops,
            },
            None => wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops,
            },
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Render Pass"),
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.show_bones {
            for kind in BoneKind::ALL {
                if let Some(data) = self.bones.get(kind) {
                    self.mesh_renderer
                        .render(&mut render_pass, data, &self.light_bind_group);
                }
            }
        }

        if self.show_lines {
            self.line_renderer.render(&mut render_pass);
        }

        if self.show_markers {
            self.marker_renderer.render(&mut render_pass);
        }

        // Gizmo last, drawn over everything
        self.gizmo_renderer.render(&mut render_pass);
    }
}
