//! Alternating reciprocal series accumulator.
//!
//! Computes `4 * (1 + Σ_{i=1}^{N} [ -1/(a*i - b) + 1/(a*i + b) ])`, which for
//! `a = 4`, `b = 1` is the Leibniz series for π taken two terms at a time.

use std::f64::consts::PI;

use serde::Serialize;
use thiserror::Error;

/// Number of terms summed by the reference benchmark.
pub const DEFAULT_ITERATIONS: u64 = 200_000_000;

/// Slope of the denominator progression.
pub const DEFAULT_COEFF_A: f64 = 4.0;

/// Offset of the denominator progression.
pub const DEFAULT_COEFF_B: f64 = 1.0;

/// Largest count for which every `i as f64` is exact.
pub const MAX_ITERATIONS: u64 = 1 << f64::MANTISSA_DIGITS;

const INITIAL_TOTAL: f64 = 1.0;
const SCALE: f64 = 4.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("iteration count {iterations} exceeds the exact f64 integer range (max {max})")]
    IterationCountTooLarge { iterations: u64, max: u64 },

    #[error("coefficient `{name}` must be finite, got {value}")]
    NonFiniteCoefficient { name: &'static str, value: f64 },

    #[error("denominator is zero at iteration {iteration} (a = {a}, b = {b})")]
    ZeroDenominator { iteration: u64, a: f64, b: f64 },

    #[error("series total is not finite ({value}) for a = {a}, b = {b}")]
    NonFiniteResult { value: f64, a: f64, b: f64 },
}

/// Inputs of one accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesParams {
    /// Number of term pairs summed before scaling
    pub iterations: u64,

    /// Denominator slope
    pub a: f64,

    /// Denominator offset
    pub b: f64,
}

impl Default for SeriesParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            a: DEFAULT_COEFF_A,
            b: DEFAULT_COEFF_B,
        }
    }
}

impl SeriesParams {
    pub const fn new(iterations: u64, a: f64, b: f64) -> Self {
        Self { iterations, a, b }
    }

    /// Reject parameters the loop cannot evaluate to a finite value.
    pub fn validate(&self) -> Result<(), SeriesError> {
        if self.iterations > MAX_ITERATIONS {
            return Err(SeriesError::IterationCountTooLarge {
                iterations: self.iterations,
                max: MAX_ITERATIONS,
            });
        }

        for (name, value) in [("a", self.a), ("b", self.b)] {
            if !value.is_finite() {
                return Err(SeriesError::NonFiniteCoefficient { name, value });
            }
        }

        if let Some(iteration) = self.zero_denominator() {
            return Err(SeriesError::ZeroDenominator {
                iteration,
                a: self.a,
                b: self.b,
            });
        }

        Ok(())
    }

    /// First iteration whose `x*a - b` or `x*a + b` evaluates to exactly zero.
    ///
    /// Rounded multiplication is monotonic in `x`, so a zero can only sit next
    /// to `±b/a`; probing the neighbours of those two points is sufficient.
    fn zero_denominator(&self) -> Option<u64> {
        if self.iterations == 0 {
            return None;
        }

        if self.a == 0.0 {
            return (self.b == 0.0).then_some(1);
        }

        [self.b / self.a, -self.b / self.a]
            .into_iter()
            .map(f64::round)
            .flat_map(|center| [center - 1.0, center, center + 1.0])
            .filter(|candidate| *candidate >= 1.0 && *candidate <= self.iterations as f64)
            .map(|candidate| candidate as u64)
            .filter(|&i| {
                let x = i as f64;
                x * self.a - self.b == 0.0 || x * self.a + self.b == 0.0
            })
            .min()
    }
}

/// Validate `params` and sum the series.
pub fn accumulate(params: &SeriesParams) -> Result<f64, SeriesError> {
    params.validate()?;
    accumulate_validated(params)
}

/// Sum the series for parameters that already passed [`SeriesParams::validate`].
pub(crate) fn accumulate_validated(params: &SeriesParams) -> Result<f64, SeriesError> {
    let value = sum_terms(params.iterations, params.a, params.b);
    if !value.is_finite() {
        return Err(SeriesError::NonFiniteResult {
            value,
            a: params.a,
            b: params.b,
        });
    }
    Ok(value)
}

// Operation order is fixed: the rounding trajectory, and therefore the
// printed digits, depend on it.
#[inline(never)]
fn sum_terms(iterations: u64, a: f64, b: f64) -> f64 {
    let mut total = INITIAL_TOTAL;
    for i in 1..=iterations {
        let x = i as f64;
        let j = x * a - b;
        total -= 1.0 / j;
        let j = x * a + b;
        total += 1.0 / j;
    }
    total * SCALE
}

/// Distance between `value` and π.
pub fn absolute_error(value: f64) -> f64 {
    (value - PI).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(iterations: u64) -> f64 {
        accumulate(&SeriesParams::new(iterations, 4.0, 1.0)).unwrap()
    }

    #[test]
    fn zero_iterations_returns_base_value() {
        assert_eq!(run(0).to_bits(), 4.0_f64.to_bits());
    }

    #[test]
    fn single_iteration_matches_closed_form() {
        let expected = 4.0 * (1.0 - 1.0 / 3.0 + 1.0 / 5.0);
        assert!((run(1) - expected).abs() < 1e-9);
    }

    #[test]
    fn two_iterations_follow_loop_order() {
        let mut total = 1.0_f64;
        total -= 1.0 / 3.0;
        total += 1.0 / 5.0;
        total -= 1.0 / 7.0;
        total += 1.0 / 9.0;
        assert_eq!(run(2).to_bits(), (total * 4.0).to_bits());
    }

    #[test]
    fn error_shrinks_as_iterations_grow() {
        let coarse = absolute_error(run(10));
        let medium = absolute_error(run(1_000));
        let fine = absolute_error(run(1_000_000));
        assert!(medium < coarse);
        assert!(fine < medium);
        assert!(fine < 1e-5);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        assert_eq!(run(100_000).to_bits(), run(100_000).to_bits());
    }

    #[test]
    fn default_params_are_reference_constants() {
        let params = SeriesParams::default();
        assert_eq!(params.iterations, 200_000_000);
        assert_eq!(params.a, 4.0);
        assert_eq!(params.b, 1.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_zero_in_subtracted_denominator() {
        let err = accumulate(&SeriesParams::new(10, 2.0, 4.0)).unwrap_err();
        assert_eq!(
            err,
            SeriesError::ZeroDenominator {
                iteration: 2,
                a: 2.0,
                b: 4.0
            }
        );
    }

    #[test]
    fn rejects_zero_in_added_denominator() {
        let err = accumulate(&SeriesParams::new(10, 3.0, -9.0)).unwrap_err();
        assert!(matches!(err, SeriesError::ZeroDenominator { iteration: 3, .. }));
    }

    #[test]
    fn zero_outside_range_is_accepted() {
        // a*i - b hits zero at i = 5, past the last iteration
        assert!(accumulate(&SeriesParams::new(4, 2.0, 10.0)).is_ok());
    }

    #[test]
    fn zero_slope_and_offset_is_rejected() {
        let err = accumulate(&SeriesParams::new(1, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, SeriesError::ZeroDenominator { iteration: 1, .. }));
    }

    #[test]
    fn zero_slope_with_offset_is_accepted() {
        // every pair cancels: -1/(-2) + 1/2 = 1
        let value = accumulate(&SeriesParams::new(3, 0.0, 2.0)).unwrap();
        assert_eq!(value, 4.0 * (1.0 + 3.0));
    }

    #[test]
    fn prevalidated_path_matches_checked_path() {
        let params = SeriesParams::new(50_000, 4.0, 1.0);
        params.validate().unwrap();
        assert_eq!(
            accumulate_validated(&params).unwrap().to_bits(),
            accumulate(&params).unwrap().to_bits()
        );
    }

    #[test]
    fn prevalidated_path_still_rejects_non_finite_total() {
        let params = SeriesParams::new(1, 1e-320, 0.0);
        params.validate().unwrap();
        assert!(matches!(
            accumulate_validated(&params),
            Err(SeriesError::NonFiniteResult { .. })
        ));
    }

    #[test]
    fn reports_first_zero_for_fractional_coefficients() {
        let params = SeriesParams::new(100, 0.5, 1.5);
        assert!(matches!(
            params.validate(),
            Err(SeriesError::ZeroDenominator { iteration: 3, .. })
        ));
    }

    #[test]
    fn zero_iterations_skip_denominator_check() {
        assert_eq!(accumulate(&SeriesParams::new(0, 0.0, 0.0)).unwrap(), 4.0);
    }

    #[test]
    fn rejects_non_finite_coefficients() {
        let err = accumulate(&SeriesParams::new(1, f64::NAN, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::NonFiniteCoefficient { name: "a", .. }
        ));

        let err = accumulate(&SeriesParams::new(1, 4.0, f64::INFINITY)).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::NonFiniteCoefficient { name: "b", .. }
        ));
    }

    #[test]
    fn rejects_inexact_iteration_counts() {
        let params = SeriesParams::new(MAX_ITERATIONS + 1, 4.0, 1.0);
        assert!(matches!(
            params.validate(),
            Err(SeriesError::IterationCountTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_overflowing_total() {
        // 1/(1e-320 - 0) overflows to infinity
        let err = accumulate(&SeriesParams::new(1, 1e-320, 0.0)).unwrap_err();
        assert!(matches!(err, SeriesError::NonFiniteResult { .. }));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = SeriesError::ZeroDenominator {
            iteration: 2,
            a: 2.0,
            b: 4.0,
        };
        assert_eq!(
            err.to_string(),
            "denominator is zero at iteration 2 (a = 2, b = 4)"
        );
    }
}
