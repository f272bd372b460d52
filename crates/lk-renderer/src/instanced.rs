//! Instance buffer management for the marker, line and gizmo renderers

use bytemuck::Pod;
use std::marker::PhantomData;

/// Pre-allocated instance buffer with a tracked instance count.
///
/// Uploads beyond the capacity are truncated with a warning.
pub struct InstanceBuffer<T: Pod> {
    buffer: wgpu::Buffer,
    count: u32,
    max_instances: u32,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    /// Create a buffer holding up to `max_instances` instances.
    pub fn new(device: &wgpu::Device, label: &str, max_instances: u32) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Instance Buffer", label)),
            size: (max_instances as usize * std::mem::size_of::<T>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            count: 0,
            max_instances,
            _marker: PhantomData,
        }
    }

    /// Replace the buffer contents with `instances`.
    pub fn update(&mut self, queue: &wgpu::Queue, instances: &[T]) {
        let count = instances.len();

        if count > self.max_instances as usize {
            tracing::warn!(
                "Instance count {} exceeds maximum {}, truncating",
                count,
                self.max_instances
            );
        }

        let count = count.min(self.max_instances as usize);
        self.count = count as u32;

        if count > 0 {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&instances[..count]));
        }
    }

    /// Clear all instances.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Current instance count.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Buffer slice for use in render passes.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}
