//! Mapping from screen space to the complex plane.

use crate::{
    error::{Error, Result},
    pixel::{Complex, Pixel},
    screen,
};

/// Width of the complex-plane window at `scale == 1.0`.
pub const BASE_WIDTH: f64 = 3.5;

/// A rectangular region of the complex plane.
///
/// `y_min` is the imaginary part sampled by the top row of pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        if !(x_min < x_max && y_min < y_max) {
            return Err(Error::InvalidParameter(format!(
                "bounds must satisfy x_min < x_max and y_min < y_max, got [{}, {}] x [{}, {}]",
                x_min, x_max, y_min, y_max
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Linearly interpolate `pixel` across the bounds.
    ///
    /// Pixel `(0, 0)` lands exactly on `(x_min, y_min)`; the last column and row
    /// stop one pixel-width short of `x_max` and `y_max`.
    pub fn pixel_to_point(&self, size: screen::Size, pixel: Pixel) -> Complex {
        Complex {
            real: self.x_min + (pixel.x as f64 / size.width as f64) * (self.x_max - self.x_min),
            imaginary: self.y_min
                + (pixel.y as f64 / size.height as f64) * (self.y_max - self.y_min),
        }
    }
}

/// A view of the complex plane described by its center and zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewWindow {
    pub center: Complex,
    pub scale: f64,
    pub aspect_ratio: f64,
}

impl ViewWindow {
    pub fn new(center: Complex, scale: f64, aspect_ratio: f64) -> Result<Self> {
        if !(scale > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "scale must be positive, got {}",
                scale
            )));
        }
        if !(aspect_ratio > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "aspect ratio must be positive, got {}",
                aspect_ratio
            )));
        }
        Ok(Self {
            center,
            scale,
            aspect_ratio,
        })
    }

    /// The window covering a buffer of `size`, whose aspect ratio it takes.
    pub fn for_size(center: Complex, scale: f64, size: screen::Size) -> Result<Self> {
        if size.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "cannot fit a view to an empty {}x{} buffer",
                size.width, size.height
            )));
        }
        Self::new(center, scale, size.aspect_ratio())
    }

    pub fn width(&self) -> f64 {
        BASE_WIDTH / self.scale
    }

    pub fn height(&self) -> f64 {
        self.width() * self.aspect_ratio
    }

    pub fn bounds(&self) -> Bounds {
        let (half_width, half_height) = (self.width() / 2.0, self.height() / 2.0);
        Bounds {
            x_min: self.center.real - half_width,
            x_max: self.center.real + half_width,
            y_min: self.center.imaginary - half_height,
            y_max: self.center.imaginary + half_height,
        }
    }

    pub fn pixel_to_point(&self, size: screen::Size, pixel: Pixel) -> Complex {
        self.bounds().pixel_to_point(size, pixel)
    }
}
