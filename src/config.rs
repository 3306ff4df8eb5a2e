use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    animation::AnimationConfig,
    error::{Error, Result},
    pixel::Complex,
    screen,
    still::Still,
    view::Bounds,
};

#[derive(Parser, Debug)]
#[command(name = "mandelzoom", version, about = "Animated Mandelbrot zoom")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Zoom into the set in a window, cycling the palette.
    Animate(AnimateArgs),
    /// Render one image on the CPU and save it as a PNG.
    Render(RenderArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// WGSL compute shader.
    Shader,
    /// Multi-threaded CPU sweep uploaded every frame.
    Cpu,
}

#[derive(Args, Debug)]
pub struct AnimateArgs {
    #[arg(long, value_enum, default_value_t = Target::Shader)]
    pub target: Target,

    #[arg(long, default_value_t = -0.745, allow_hyphen_values = true)]
    pub center_x: f64,

    #[arg(long, default_value_t = 0.186, allow_hyphen_values = true)]
    pub center_y: f64,

    /// Factor the zoom grows by each second.
    #[arg(long, default_value_t = 1.25)]
    pub zoom_rate: f64,

    /// Zoom at which the animation restarts from 1.
    #[arg(long, default_value_t = 10_000.0)]
    pub scale_ceiling: f64,

    /// Palette rotation in degrees per second.
    #[arg(long, default_value_t = 30.0, allow_hyphen_values = true)]
    pub hue_rate: f64,

    /// Upper bound on the zoom-dependent iteration budget.
    #[arg(long)]
    pub max_iterations_cap: Option<u32>,

    /// Worker threads for the CPU target (defaults to the number of CPUs).
    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    #[arg(long, default_value_t = 768)]
    pub height: u32,
}

impl AnimateArgs {
    pub fn animation_config(&self) -> Result<AnimationConfig> {
        // A rate of 1 or less never reaches the ceiling and decays the scale to 0.
        if !(self.zoom_rate > 1.0) {
            return Err(Error::InvalidParameter(format!(
                "zoom rate must be greater than 1, got {}",
                self.zoom_rate
            )));
        }
        if !(self.scale_ceiling > 1.0) {
            return Err(Error::InvalidParameter(format!(
                "scale ceiling must be greater than 1, got {}",
                self.scale_ceiling
            )));
        }

        Ok(AnimationConfig {
            center: Complex::new(self.center_x, self.center_y),
            zoom_rate: self.zoom_rate,
            scale_ceiling: self.scale_ceiling,
            hue_rate: self.hue_rate,
            max_iterations_cap: self.max_iterations_cap,
        })
    }

    pub fn threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }

    pub fn window_size(&self) -> Result<screen::Size> {
        screen::Size::new(self.width, self.height)
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// PNG file to write.
    #[arg(long, short)]
    pub output: PathBuf,

    #[arg(long, default_value_t = 1050)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    #[arg(long, default_value_t = -2.5, allow_hyphen_values = true)]
    pub x_min: f64,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub x_max: f64,

    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub y_min: f64,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub y_max: f64,

    #[arg(long, default_value_t = 500)]
    pub max_iterations: u32,

    /// Palette rotation in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub hue_shift: f64,
}

impl RenderArgs {
    pub fn still(&self) -> Result<Still> {
        Ok(Still {
            bounds: Bounds::new(self.x_min, self.x_max, self.y_min, self.y_max)?,
            size: screen::Size::new(self.width, self.height)?,
            max_iterations: self.max_iterations,
            hue_shift: self.hue_shift,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::Animation;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mandelzoom").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn animate_defaults() {
        let Command::Animate(args) = parse(&["animate"]).command else {
            panic!("expected animate");
        };
        assert_eq!(args.target, Target::Shader);
        let config = args.animation_config().unwrap();
        assert_eq!(config, AnimationConfig::default());
        assert!(args.threads() >= 1);
    }

    #[test]
    fn animate_accepts_negative_center() {
        let Command::Animate(args) = parse(&[
            "animate",
            "--target",
            "cpu",
            "--center-x",
            "-1.25",
            "--max-iterations-cap",
            "2000",
            "--threads",
            "3",
        ])
        .command
        else {
            panic!("expected animate");
        };
        assert_eq!(args.target, Target::Cpu);
        let config = args.animation_config().unwrap();
        assert_eq!(config.center.real, -1.25);
        assert_eq!(config.max_iterations_cap, Some(2000));
        assert_eq!(args.threads(), 3);
    }

    #[test]
    fn animate_rejects_non_growing_zoom_rate() {
        for rate in ["0.5", "1", "0"] {
            let Command::Animate(args) = parse(&["animate", "--zoom-rate", rate]).command else {
                panic!("expected animate");
            };
            assert!(args.animation_config().is_err(), "zoom rate {}", rate);
        }

        let Command::Animate(args) = parse(&["animate", "--zoom-rate", "1.01"]).command else {
            panic!("expected animate");
        };
        let mut animation = Animation::new(args.animation_config().unwrap());
        for _ in 0..1200 {
            animation.advance(Duration::from_secs(1));
        }
        assert!(animation.scale() >= 1.0);
        assert!(animation.frame(screen::Size::new(10, 10).unwrap()).is_ok());
    }

    #[test]
    fn animate_rejects_shrinking_zoom_ceiling() {
        let Command::Animate(args) = parse(&["animate", "--scale-ceiling", "0.5"]).command else {
            panic!("expected animate");
        };
        assert!(args.animation_config().is_err());
    }

    #[test]
    fn render_builds_still() {
        let Command::Render(args) = parse(&[
            "render",
            "--output",
            "out.png",
            "--width",
            "40",
            "--height",
            "30",
            "--hue-shift",
            "-90",
        ])
        .command
        else {
            panic!("expected render");
        };
        let still = args.still().unwrap();
        assert_eq!(still.size, screen::Size::new(40, 30).unwrap());
        assert_eq!(still.bounds, Bounds::new(-2.5, 1.0, -1.0, 1.0).unwrap());
        assert_eq!(still.max_iterations, 500);
        assert_eq!(still.hue_shift, -90.0);
    }

    #[test]
    fn render_rejects_empty_image() {
        let Command::Render(args) = parse(&["render", "-o", "out.png", "--width", "0"]).command
        else {
            panic!("expected render");
        };
        assert!(args.still().is_err());
    }
}
