//! Where a frame's pixels are computed before they reach the screen.

use log::trace;

use crate::{
    animation::Frame,
    compute::MandelbrotPipeline,
    cpu::Canvas,
    error::Result,
    gpu::Gpu,
};

/// A frame source that fills the [`Gpu`]'s result texture.
///
/// Both variants evaluate every pixel from scratch and produce the same image
/// up to floating point precision: the shader works in `f32`, the canvas in `f64`.
pub enum RenderTarget {
    /// `compute.wgsl` writes the texture directly.
    Shader(MandelbrotPipeline),
    /// Rows are rendered on a rayon pool and uploaded.
    Buffer(Canvas),
}

impl RenderTarget {
    pub fn shader(gpu: &Gpu) -> Result<Self> {
        Ok(RenderTarget::Shader(MandelbrotPipeline::new(gpu)?))
    }

    pub fn buffer(gpu: &Gpu, threads: usize) -> Result<Self> {
        Ok(RenderTarget::Buffer(Canvas::new(gpu.size(), threads)?))
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderTarget::Shader(_) => "shader",
            RenderTarget::Buffer(_) => "buffer",
        }
    }

    /// Follow the result texture after [`Gpu::resize`].
    pub fn resize(&mut self, gpu: &Gpu) {
        match self {
            RenderTarget::Shader(pipeline) => pipeline.resize(gpu),
            RenderTarget::Buffer(canvas) => canvas.resize(gpu.size()),
        }
    }

    pub fn encode(
        &mut self,
        gpu: &Gpu,
        command_encoder: &mut wgpu::CommandEncoder,
        frame: &Frame,
    ) -> Result<()> {
        trace!(
            "{} frame: scale {} hue {} iterations {}",
            self.name(),
            frame.view.scale,
            frame.hue_shift,
            frame.max_iterations
        );

        match self {
            RenderTarget::Shader(pipeline) => pipeline.encode(gpu, command_encoder, frame),
            RenderTarget::Buffer(canvas) => {
                debug_assert_eq!(canvas.size(), gpu.size());
                canvas.draw(&frame.bounds(), frame.max_iterations, frame.hue_shift)?;
                gpu.result().upload(&gpu.queue, canvas.pixels());
            }
        }
        Ok(())
    }
}
