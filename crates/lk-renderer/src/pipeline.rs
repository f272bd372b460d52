//! Render pipeline construction shared by the sub-renderers

/// Color/depth formats and MSAA sample count every scene pipeline draws into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargets {
    /// Viewport color format
    pub color: wgpu::TextureFormat,
    /// Depth buffer format
    pub depth: wgpu::TextureFormat,
    /// MSAA samples per pixel
    pub samples: u32,
}

/// How a pipeline interacts with the depth buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthMode {
    /// Depth tested and written
    Tested,
    /// Drawn over the scene: always passes, never writes
    Overlay,
}

/// Builder for one scene pipeline.
///
/// Shaders expose `vs_main` and `fs_main`. Output is alpha blended.
pub struct PipelineBuilder<'a> {
    label: &'a str,
    shader_source: &'a str,
    targets: RenderTargets,
    bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    vertex_layouts: Vec<wgpu::VertexBufferLayout<'a>>,
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    depth: DepthMode,
}

impl<'a> PipelineBuilder<'a> {
    /// Triangle list, no culling, depth tested
    pub fn new(
        label: &'a str,
        shader_source: &'a str,
        targets: RenderTargets,
        bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    ) -> Self {
        Self {
            label,
            shader_source,
            targets,
            bind_group_layouts,
            vertex_layouts: Vec::new(),
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            depth: DepthMode::Tested,
        }
    }

    /// Vertex and instance buffer layouts, in slot order
    pub fn vertex_layouts(mut self, layouts: Vec<wgpu::VertexBufferLayout<'a>>) -> Self {
        self.vertex_layouts = layouts;
        self
    }

    #[allow(missing_docs)]
    pub fn topology(mut self, topology: wgpu::PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    #[allow(missing_docs)]
    pub fn cull_back_faces(mut self) -> Self {
        self.cull_mode = Some(wgpu::Face::Back);
        self
    }

    #[allow(missing_docs)]
    pub fn depth(mut self, depth: DepthMode) -> Self {
        self.depth = depth;
        self
    }

    /// Compile the shader and create the pipeline
    pub fn build(self, device: &wgpu::Device) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} Shader", self.label)),
            source: wgpu::ShaderSource::Wgsl(self.shader_source.into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", self.label)),
            bind_group_layouts: self.bind_group_layouts,
            push_constant_ranges: &[],
        });

        let (depth_write_enabled, depth_compare) = match self.depth {
            DepthMode::Tested => (true, wgpu::CompareFunction::Less),
            DepthMode::Overlay => (false, wgpu::CompareFunction::Always),
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Pipeline", self.label)),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &self.vertex_layouts,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.targets.color,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: self.topology,
                cull_mode: self.cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: self.targets.depth,
                depth_write_enabled,
                depth_compare,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: self.targets.samples.max(1),
                ..Default::default()
            },
            multiview: None,
            cache: None,
        })
    }
}

/// Layout with one uniform buffer at binding 0, visible to both stages
pub fn create_uniform_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{} Bind Group Layout", label)),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Bind all of `buffer` at binding 0 of `layout`
pub fn create_uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{} Bind Group", label)),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}
