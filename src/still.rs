//! Single static renders written to disk.

use std::path::Path;

use log::info;

use crate::{cpu, error::Result, screen, view::Bounds};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Still {
    pub bounds: Bounds,
    pub size: screen::Size,
    pub max_iterations: u32,
    pub hue_shift: f64,
}

impl Still {
    /// Render into a freshly allocated RGBA buffer.
    pub fn render(&self) -> Result<Vec<u8>> {
        let mut pixels = vec![0; self.size.pixel_count() * cpu::BYTES_PER_PIXEL];
        cpu::render(
            &self.bounds,
            self.size,
            self.max_iterations,
            self.hue_shift,
            &mut pixels,
        )?;
        Ok(pixels)
    }

    /// Render and save as a PNG at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let pixels = self.render()?;
        image::save_buffer(
            path,
            &pixels,
            self.size.width,
            self.size.height,
            image::ColorType::Rgba8,
        )?;
        info!(
            "wrote {}x{} render to {}",
            self.size.width,
            self.size.height,
            path.display()
        );
        Ok(())
    }
}
