//! Escape-time evaluation of the quadratic map `z -> z^2 + c`.

use crate::pixel::Complex;

/// `|z|^2` above which an orbit is considered divergent (`|z| > 2`).
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Iteration budget at `scale == 1.0`.
pub const BASE_MAX_ITERATIONS: f64 = 500.0;

/// Extra iterations per unit of `ln(scale)`.
pub const ITERATIONS_PER_ZOOM: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IterationResult {
    /// Index of the update that escaped, or the cap if the orbit stayed bounded.
    pub iterations: u32,
    pub escaped: bool,
}

impl IterationResult {
    pub fn bounded(max_iterations: u32) -> Self {
        Self {
            iterations: max_iterations,
            escaped: false,
        }
    }
}

/// Iterate `z_{n+1} = z_n^2 + c` from `z_0 = 0`, checking `|z|^2` after each update.
pub fn escape_time(c: Complex, max_iterations: u32) -> IterationResult {
    let (mut x, mut y) = (0.0f64, 0.0f64);

    for iteration in 0..max_iterations {
        let x_next = x * x - y * y + c.real;
        y = 2.0 * x * y + c.imaginary;
        x = x_next;

        if x * x + y * y > ESCAPE_RADIUS_SQUARED {
            return IterationResult {
                iterations: iteration,
                escaped: true,
            };
        }
    }

    IterationResult::bounded(max_iterations)
}

/**
Iteration budget for a zoom level: `floor(500 + 100 * ln(scale))`.

Deeper zooms resolve finer boundary detail and need longer orbits. Scales
below 1 are treated as 1 so the budget never drops under 500. The result is
not bounded above unless `cap` is given.
*/
pub fn dynamic_max_iterations(scale: f64, cap: Option<u32>) -> u32 {
    let budget = (BASE_MAX_ITERATIONS + ITERATIONS_PER_ZOOM * scale.max(1.0).ln()).floor();
    // `as` saturates at u32::MAX for very deep zooms.
    let budget = budget as u32;
    match cap {
        Some(cap) => budget.min(cap),
        None => budget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for max_iterations in [1, 2, 10, 500, 5000] {
            assert_eq!(
                escape_time(Complex::ZERO, max_iterations),
                IterationResult::bounded(max_iterations)
            );
        }
    }

    #[test]
    fn zero_budget_is_bounded_immediately() {
        assert_eq!(
            escape_time(Complex::new(100.0, 100.0), 0),
            IterationResult {
                iterations: 0,
                escaped: false
            }
        );
    }

    #[test]
    fn far_point_escapes_on_first_update() {
        let result = escape_time(Complex::new(3.0, 0.0), 100);
        assert_eq!(
            result,
            IterationResult {
                iterations: 0,
                escaped: true
            }
        );
    }

    #[test]
    fn two_sits_on_the_radius_then_escapes() {
        // Escape needs |z|^2 > 4 strictly: z_1 = 2 sits on |z|^2 == 4, z_2 = 6 is past it.
        let result = escape_time(Complex::new(2.0, 0.0), 100);
        assert_eq!(
            result,
            IterationResult {
                iterations: 1,
                escaped: true
            }
        );
    }

    #[test]
    fn period_two_orbit_is_bounded() {
        // c = -1 cycles 0 -> -1 -> 0.
        assert_eq!(
            escape_time(Complex::new(-1.0, 0.0), 1000),
            IterationResult::bounded(1000)
        );
    }

    #[test]
    fn counts_updates_before_escape() {
        // c = 1: 1, 2, 5 -> escapes on the third update (index 2).
        assert_eq!(
            escape_time(Complex::new(1.0, 0.0), 100),
            IterationResult {
                iterations: 2,
                escaped: true
            }
        );
        // With fewer updates than needed the orbit looks bounded.
        assert_eq!(
            escape_time(Complex::new(1.0, 0.0), 2),
            IterationResult::bounded(2)
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let c = Complex::new(-0.743_643_887, 0.131_825_904);
        let first = escape_time(c, 2000);
        for _ in 0..10 {
            assert_eq!(escape_time(c, 2000), first);
        }
    }

    #[test]
    fn unit_scale_budget_is_500() {
        assert_eq!(dynamic_max_iterations(1.0, None), 500);
    }

    #[test]
    fn budget_grows_with_zoom() {
        // 500 + 100 * ln(e^2) = 700, floored.
        let scale = std::f64::consts::E.powi(2);
        let budget = dynamic_max_iterations(scale, None);
        assert!(budget == 700 || budget == 699);
        assert!(dynamic_max_iterations(1000.0, None) > dynamic_max_iterations(10.0, None));
    }

    #[test]
    fn budget_is_guarded_below_unit_scale() {
        assert_eq!(dynamic_max_iterations(0.25, None), 500);
    }

    #[test]
    fn cap_bounds_budget() {
        assert_eq!(dynamic_max_iterations(1e12, Some(1200)), 1200);
        assert_eq!(dynamic_max_iterations(1.0, Some(1200)), 500);
    }
}
