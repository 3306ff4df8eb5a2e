/*!
Typed uniform buffers.

The `Params` layout mirrors the `Params` struct in `compute.wgsl`; field order
and padding must stay in step with the shader.
*/

use std::marker::PhantomData;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::animation::Frame;

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Params {
    pub resolution: [f32; 2],
    pub center: [f32; 2],
    pub scale: f32,
    pub hue_shift: f32,
    pub max_iterations: u32,
    pub padding: u32,
}

impl From<&Frame> for Params {
    fn from(frame: &Frame) -> Self {
        Self {
            resolution: [frame.size.width as f32, frame.size.height as f32],
            center: [
                frame.view.center.real as f32,
                frame.view.center.imaginary as f32,
            ],
            scale: frame.view.scale as f32,
            hue_shift: frame.hue_shift as f32,
            max_iterations: frame.max_iterations,
            padding: 0,
        }
    }
}

/// A GPU buffer holding exactly one `A`.
pub struct Uniform<A> {
    buffer: wgpu::Buffer,
    phantom_data: PhantomData<A>,
}

impl<A: Pod + Zeroable> Uniform<A> {
    pub fn new(device: &wgpu::Device, label: &str, contents: A) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[contents]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            phantom_data: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, contents: A) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[contents]));
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}
