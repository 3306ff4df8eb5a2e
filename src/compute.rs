use bytemuck::Zeroable;
use log::debug;

use crate::{
    animation::Frame,
    error::Result,
    gpu::{self, Gpu, ResultTexture},
    screen,
    uniform::{Params, Uniform},
};

/// Workgroup size along x for `compute.wgsl#mandelbrot`.
pub const MANDELBROT_WORKGROUP_SIZE_X: u32 = 8;

/// Workgroup size along y for `compute.wgsl#mandelbrot`.
pub const MANDELBROT_WORKGROUP_SIZE_Y: u32 = 8;

/**
Dispatch size for `compute.wgsl#mandelbrot`.

[WGSL compute shader workgroups reference](https://www.w3.org/TR/WGSL/#compute-shader-workgroups)

The shader runs one invocation per pixel and uses `global_invocation_id.xy` as
the pixel position. With `@workgroup_size(8, 8, 1)`, a dispatch of `(x, y, 1)`
covers `8x * 8y` pixels, so each dimension is rounded up to cover the surface.
Invocations that land past the right or bottom edge return without writing.

A 4k surface needs `(480, 270, 1)`, well under the 65535 per-dimension limit
([maxComputeWorkgroupsPerDimension](https://www.w3.org/TR/webgpu/#dom-supported-limits-maxcomputeworkgroupsperdimension)).
*/
pub fn mandelbrot_dispatch_size(size: screen::Size) -> (u32, u32, u32) {
    (
        (size.width + MANDELBROT_WORKGROUP_SIZE_X - 1) / MANDELBROT_WORKGROUP_SIZE_X,
        (size.height + MANDELBROT_WORKGROUP_SIZE_Y - 1) / MANDELBROT_WORKGROUP_SIZE_Y,
        1,
    )
}

/// The `compute.wgsl#mandelbrot` pipeline and the resources bound to it.
pub struct MandelbrotPipeline {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    params: Uniform<Params>,
}

impl MandelbrotPipeline {
    pub fn new(gpu: &Gpu) -> Result<Self> {
        let device = &gpu.device;

        let shader_module = gpu::validated(device, "compute-shader", || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("compute-shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("compute.wgsl").into()),
            })
        })?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("compute-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: gpu::RESULT_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("compute-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = gpu::validated(device, "compute-pipeline", || {
            device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("compute-pipeline"),
                layout: Some(&pipeline_layout),
                module: &shader_module,
                entry_point: "mandelbrot",
            })
        })?;
        debug!("compute pipeline ready");

        let params = Uniform::new(device, "params-buffer", Params::zeroed());
        let bind_group = Self::create_bind_group(device, &bind_group_layout, gpu.result(), &params);

        Ok(Self {
            pipeline,
            bind_group_layout,
            bind_group,
            params,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        result: &ResultTexture,
        params: &Uniform<Params>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("compute-bind-group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(result.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params.binding_resource(),
                },
            ],
        })
    }

    /// Rebind to the result texture after [`Gpu::resize`] replaced it.
    pub fn resize(&mut self, gpu: &Gpu) {
        self.bind_group = Self::create_bind_group(
            &gpu.device,
            &self.bind_group_layout,
            gpu.result(),
            &self.params,
        );
    }

    pub fn encode(&self, gpu: &Gpu, command_encoder: &mut wgpu::CommandEncoder, frame: &Frame) {
        self.params.write(&gpu.queue, Params::from(frame));

        let (x, y, z) = mandelbrot_dispatch_size(frame.size);

        command_encoder.push_debug_group("compute-pass");
        {
            let mut compute_pass = command_encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("compute-pass"),
            });

            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &self.bind_group, &[]);
            compute_pass.insert_debug_marker("mandelbrot");
            compute_pass.dispatch_workgroups(x, y, z);
        }
        command_encoder.pop_debug_group();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_covers_every_pixel() {
        assert_eq!(
            mandelbrot_dispatch_size(screen::Size::new(3840, 2160).unwrap()),
            (480, 270, 1)
        );
        assert_eq!(
            mandelbrot_dispatch_size(screen::Size::new(801, 601).unwrap()),
            (101, 76, 1)
        );
        assert_eq!(
            mandelbrot_dispatch_size(screen::Size::new(1, 1).unwrap()),
            (1, 1, 1)
        );
    }
}
