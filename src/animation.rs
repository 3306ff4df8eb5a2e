//! Per-frame animation state for the continuous renderer.
//!
//! The event loop calls [`Animation::advance`] once per displayed frame with the
//! elapsed time, then asks for the [`Frame`] to draw. Nothing else mutates the
//! zoom or the hue.

use std::time::Duration;

use crate::{
    error::Result,
    escape::dynamic_max_iterations,
    pixel::Complex,
    screen,
    view::{Bounds, ViewWindow},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    pub center: Complex,
    /// Factor the scale is multiplied by per second.
    pub zoom_rate: f64,
    /// Scale at which the zoom restarts from 1.0.
    pub scale_ceiling: f64,
    /// Degrees of hue rotation per second.
    pub hue_rate: f64,
    pub max_iterations_cap: Option<u32>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            center: Complex::new(-0.745, 0.186),
            zoom_rate: 1.25,
            scale_ceiling: 10_000.0,
            hue_rate: 30.0,
            max_iterations_cap: None,
        }
    }
}

/// Everything needed to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub size: screen::Size,
    pub view: ViewWindow,
    pub max_iterations: u32,
    pub hue_shift: f64,
}

impl Frame {
    pub fn bounds(&self) -> Bounds {
        self.view.bounds()
    }
}

#[derive(Debug)]
pub struct Animation {
    config: AnimationConfig,
    scale: f64,
    hue_shift: f64,
    paused: bool,
}

impl Animation {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            scale: 1.0,
            hue_shift: 0.0,
            paused: false,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn hue_shift(&self) -> f64 {
        self.hue_shift
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Move the zoom and hue forward by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.paused {
            return;
        }

        let seconds = elapsed.as_secs_f64();
        self.scale *= self.config.zoom_rate.powf(seconds);
        if self.scale >= self.config.scale_ceiling {
            self.scale = 1.0;
        }
        self.hue_shift = (self.hue_shift + self.config.hue_rate * seconds).rem_euclid(360.0);
    }

    pub fn frame(&self, size: screen::Size) -> Result<Frame> {
        Ok(Frame {
            size,
            view: ViewWindow::for_size(self.config.center, self.scale, size)?,
            max_iterations: dynamic_max_iterations(self.scale, self.config.max_iterations_cap),
            hue_shift: self.hue_shift,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animation() -> Animation {
        Animation::new(AnimationConfig {
            zoom_rate: 2.0,
            scale_ceiling: 100.0,
            hue_rate: 90.0,
            ..AnimationConfig::default()
        })
    }

    #[test]
    fn starts_unzoomed() {
        let animation = animation();
        let frame = animation.frame(screen::Size::new(400, 300).unwrap()).unwrap();
        assert_eq!(frame.view.scale, 1.0);
        assert_eq!(frame.max_iterations, 500);
        assert_eq!(frame.hue_shift, 0.0);
    }

    #[test]
    fn zoom_grows_geometrically() {
        let mut animation = animation();
        animation.advance(Duration::from_secs(1));
        assert!((animation.scale() - 2.0).abs() < 1e-9);
        animation.advance(Duration::from_secs(2));
        assert!((animation.scale() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_resets_at_ceiling() {
        let mut animation = animation();
        // 2^7 = 128 passes the ceiling of 100.
        animation.advance(Duration::from_secs(7));
        assert_eq!(animation.scale(), 1.0);
    }

    #[test]
    fn hue_wraps() {
        let mut animation = animation();
        animation.advance(Duration::from_secs(5));
        assert!((animation.hue_shift() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn paused_animation_holds_still() {
        let mut animation = animation();
        animation.toggle_pause();
        animation.advance(Duration::from_secs(3));
        assert_eq!(animation.scale(), 1.0);
        assert_eq!(animation.hue_shift(), 0.0);
        animation.toggle_pause();
        assert!(!animation.is_paused());
    }

    #[test]
    fn iteration_budget_follows_zoom() {
        let mut animation = animation();
        animation.advance(Duration::from_secs(4));
        let frame = animation.frame(screen::Size::new(10, 10).unwrap()).unwrap();
        // floor(500 + 100 * ln 16) = 777
        assert_eq!(frame.max_iterations, 777);
    }

    #[test]
    fn cap_limits_budget() {
        let mut animation = Animation::new(AnimationConfig {
            zoom_rate: 2.0,
            scale_ceiling: 1e9,
            max_iterations_cap: Some(600),
            ..AnimationConfig::default()
        });
        animation.advance(Duration::from_secs(10));
        let frame = animation.frame(screen::Size::new(10, 10).unwrap()).unwrap();
        assert_eq!(frame.max_iterations, 600);
    }

    #[test]
    fn empty_surface_has_no_frame() {
        let animation = animation();
        assert!(animation.frame(screen::Size { width: 0, height: 0 }).is_err());
    }
}
