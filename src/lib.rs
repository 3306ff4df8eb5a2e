/*!
Animated Mandelbrot zoom.

The escape-time core ([`view`], [`escape`], [`colour`]) is shared by two
drivers: a windowed renderer that recomputes every pixel each frame, either in
a WGSL compute shader or on a rayon pool ([`app`], [`target`]), and a
single-threaded still renderer that writes a PNG ([`still`], [`cpu`]).
*/

pub mod animation;
pub mod app;
pub mod colour;
pub mod compute;
pub mod config;
pub mod cpu;
pub mod error;
pub mod escape;
pub mod gpu;
pub mod pixel;
pub mod screen;
pub mod still;
pub mod target;
pub mod uniform;
pub mod view;

pub use error::{Error, Result};
