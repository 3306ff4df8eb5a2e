//! The windowed, continuously animated renderer.

use std::time::Instant;

use log::{debug, error, info, warn};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::{
    animation::{Animation, AnimationConfig},
    error::{Error, Result},
    gpu::Gpu,
    screen,
    target::RenderTarget,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Shader,
    Buffer { threads: usize },
}

/// Open a window and animate until it is closed.
///
/// Initialisation failures are returned before the first frame. Once the event
/// loop starts it never returns; the process exits when the loop does.
pub fn run(config: AnimationConfig, kind: TargetKind, window_size: screen::Size) -> Result<()> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("mandelzoom")
        .with_inner_size(PhysicalSize::new(window_size.width, window_size.height))
        .build(&event_loop)?;

    let mut gpu = Gpu::new(&window)?;
    let mut target = match kind {
        TargetKind::Shader => RenderTarget::shader(&gpu)?,
        TargetKind::Buffer { threads } => RenderTarget::buffer(&gpu, threads)?,
    };
    info!("rendering with the {} target", target.name());

    let mut animation = Animation::new(config);
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        // To present frames in realtime, *don't* set `control_flow` to `Wait`.
        match event {
            Event::MainEventsCleared => {
                let now = Instant::now();
                animation.advance(now - last_frame);
                last_frame = now;

                window.request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(keycode),
                            ..
                        },
                    ..
                } => match keycode {
                    VirtualKeyCode::Escape => *control_flow = ControlFlow::Exit,
                    VirtualKeyCode::Space => {
                        animation.toggle_pause();
                        debug!("paused: {}", animation.is_paused());
                    }
                    _ => {}
                },
                WindowEvent::Resized(size) => {
                    let size = screen::Size::from(size);
                    // Minimised windows report 0x0; keep the old surface until they come back.
                    if !size.is_empty() {
                        gpu.resize(size);
                        target.resize(&gpu);
                        window.request_redraw();
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                let frame = match animation.frame(gpu.size()) {
                    Ok(frame) => frame,
                    Err(err) => {
                        warn!("skipping frame: {}", err);
                        return;
                    }
                };

                match gpu.render(&mut target, &frame) {
                    Ok(()) => {}
                    Err(Error::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                        debug!("surface lost or outdated, reconfiguring");
                        gpu.reconfigure();
                    }
                    Err(Error::Surface(wgpu::SurfaceError::Timeout)) => {
                        warn!("surface timed out, skipping frame");
                    }
                    Err(err) => {
                        error!("{}", err);
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            _ => {}
        }
    })
}
