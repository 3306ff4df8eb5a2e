//! CPU rendering into RGBA pixel buffers.

use log::{debug, trace};
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::{
    colour::colour,
    error::{Error, Result},
    escape::escape_time,
    pixel::Pixel,
    screen,
    view::Bounds,
};

/// Bytes per pixel: R, G, B, A.
pub const BYTES_PER_PIXEL: usize = 4;

fn check_buffer(size: screen::Size, pixels: &[u8]) -> Result<()> {
    if size.is_empty() {
        return Err(Error::InvalidParameter(format!(
            "cannot render into an empty {}x{} buffer",
            size.width, size.height
        )));
    }
    let expected = size.pixel_count() * BYTES_PER_PIXEL;
    if pixels.len() != expected {
        return Err(Error::InvalidParameter(format!(
            "buffer holds {} bytes, a {}x{} RGBA image needs {}",
            pixels.len(),
            size.width,
            size.height,
            expected
        )));
    }
    Ok(())
}

fn render_row(
    row: &mut [u8],
    y: u32,
    bounds: &Bounds,
    size: screen::Size,
    max_iterations: u32,
    hue_shift: f64,
) {
    for (x, rgba) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
        let point = bounds.pixel_to_point(size, Pixel::new(x as u32, y));
        let result = escape_time(point, max_iterations);
        rgba.copy_from_slice(&colour(result, hue_shift, max_iterations).to_rgba());
    }
}

/**
Render `bounds` into `pixels`, one row at a time from the top-left corner.

`pixels` is row-major RGBA with exactly `size.width * size.height * 4` bytes.
Runs on the calling thread and returns once every pixel is written.
*/
pub fn render(
    bounds: &Bounds,
    size: screen::Size,
    max_iterations: u32,
    hue_shift: f64,
    pixels: &mut [u8],
) -> Result<()> {
    check_buffer(size, pixels)?;

    let row_length = size.width as usize * BYTES_PER_PIXEL;
    for (y, row) in pixels.chunks_exact_mut(row_length).enumerate() {
        render_row(row, y as u32, bounds, size, max_iterations, hue_shift);
    }

    debug!(
        "rendered {}x{} with {} iterations",
        size.width, size.height, max_iterations
    );
    Ok(())
}

/// Like [`render`], but rows are spread across the current rayon pool.
pub fn render_parallel(
    bounds: &Bounds,
    size: screen::Size,
    max_iterations: u32,
    hue_shift: f64,
    pixels: &mut [u8],
) -> Result<()> {
    check_buffer(size, pixels)?;
    sweep(bounds, size, max_iterations, hue_shift, pixels);
    Ok(())
}

fn sweep(
    bounds: &Bounds,
    size: screen::Size,
    max_iterations: u32,
    hue_shift: f64,
    pixels: &mut [u8],
) {
    trace!("begin sweep");
    let row_length = size.width as usize * BYTES_PER_PIXEL;
    pixels
        .par_chunks_mut(row_length)
        .enumerate()
        .for_each(|(y, row)| {
            render_row(row, y as u32, bounds, size, max_iterations, hue_shift);
        });
    trace!("end sweep");
}

/// An owned RGBA buffer that is re-rendered in full on every frame.
pub struct Canvas {
    size: screen::Size,
    pixels: Vec<u8>,
    pool: rayon::ThreadPool,
}

impl Canvas {
    pub fn new(size: screen::Size, threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("canvas-{}", index))
            .build()?;
        debug!("canvas using {} threads", pool.current_num_threads());

        Ok(Self {
            size,
            pixels: vec![0; size.pixel_count() * BYTES_PER_PIXEL],
            pool,
        })
    }

    pub fn size(&self) -> screen::Size {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn resize(&mut self, size: screen::Size) {
        self.size = size;
        self.pixels.resize(size.pixel_count() * BYTES_PER_PIXEL, 0);
    }

    pub fn draw(&mut self, bounds: &Bounds, max_iterations: u32, hue_shift: f64) -> Result<()> {
        check_buffer(self.size, &self.pixels)?;

        let Self { size, pixels, pool } = self;
        pool.install(|| sweep(bounds, *size, max_iterations, hue_shift, pixels));
        Ok(())
    }
}
